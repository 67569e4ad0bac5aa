//! Lowering error taxonomy.
//!
//! Every failure the renderer can hit is one of these kinds; all of them
//! are deterministic functions of the AST and the module state at the
//! time of the call. The renderer is strictly fail-fast: the first error
//! aborts the node's lowering and propagates upward as a `Result`, never
//! as a panic and never as a sentinel value.

use thiserror::Error;

/// A lowering failure.
///
/// Variants carry resolved identifier text (not interner handles) so the
/// message is readable without the interner in hand. Formatting routes —
/// stderr, diagnostics UI — are the caller's concern.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LowerError {
    /// A variable reference with no slot in the current symbol table.
    #[error("unknown variable name '{0}'")]
    UnknownVariable(String),

    /// The left side of `=` was not a bare variable reference.
    #[error("destination of '=' must be a variable")]
    InvalidAssignmentTarget,

    /// A binary operator outside the supported set.
    #[error("unknown binary operator '{0}'")]
    UnknownOperator(char),

    /// A call to a name with no declaration in the module.
    #[error("unknown function referenced: '{0}'")]
    UnknownFunction(String),

    /// A call whose argument count disagrees with the callee's arity.
    #[error("incorrect number of arguments passed to '{callee}': expected {expected}, found {found}")]
    ArityMismatch {
        callee: String,
        expected: usize,
        found: usize,
    },

    /// A second definition of an already-defined function.
    #[error("redefinition of function '{0}'")]
    DuplicateDefinition(String),

    /// A redeclaration whose arity disagrees with the existing one.
    #[error("redeclaration of function '{0}' with different number of arguments")]
    ArityConflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_self_contained() {
        let err = LowerError::ArityMismatch {
            callee: "f".into(),
            expected: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "incorrect number of arguments passed to 'f': expected 2, found 1"
        );
        assert_eq!(
            LowerError::UnknownVariable("x".into()).to_string(),
            "unknown variable name 'x'"
        );
        assert_eq!(
            LowerError::UnknownOperator('%').to_string(),
            "unknown binary operator '%'"
        );
    }
}
