//! Arena-allocated abstract syntax tree.
//!
//! The front end builds this tree and hands it to the renderer by
//! reference; lowering never mutates it. Expressions live in a flat
//! [`ExprArena`] and refer to each other through [`ExprId`] indices —
//! no `Box<Expr>`, keeping nodes small and comparisons cheap.
//!
//! The variant set is closed: the renderer dispatches with an exhaustive
//! `match`, so adding a node kind is a compile-time-checked exercise.

use std::fmt;

use crate::Name;

/// Index into an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Create a new `ExprId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Expression variants.
///
/// All values in the language are `f64`; there is no type annotation on
/// any node. Children are arena indices, not boxes.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Numeric literal: `4.0`
    Number(f64),

    /// Variable reference: `x`
    Variable(Name),

    /// Binary operation: `lhs op rhs`.
    ///
    /// The operator is the raw source character; the renderer decides
    /// which symbols are supported (`=`, `+`, `-`, `*`, `<`, `>`) and
    /// rejects the rest, so an unsupported symbol survives parsing all
    /// the way to a proper lowering error.
    Binary { op: char, lhs: ExprId, rhs: ExprId },

    /// Function call: `callee(args...)`
    Call { callee: Name, args: Vec<ExprId> },
}

/// Flat storage for a compilation unit's expressions.
#[derive(Debug, Default)]
pub struct ExprArena {
    exprs: Vec<ExprKind>,
}

impl ExprArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, returning its id.
    pub fn alloc(&mut self, kind: ExprKind) -> ExprId {
        let idx = self.exprs.len();
        assert!(idx < u32::MAX as usize, "expression arena overflow");
        self.exprs.push(kind);
        ExprId::new(idx as u32)
    }

    /// Get the expression behind an id.
    pub fn get(&self, id: ExprId) -> &ExprKind {
        &self.exprs[id.index()]
    }

    /// Number of allocated expressions.
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

/// A function signature: name plus ordered parameter names.
///
/// Standing alone it declares a callable with no body (the `extern`
/// form); inside a [`FunctionDef`] it names the function being defined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prototype {
    pub name: Name,
    pub params: Vec<Name>,
}

impl Prototype {
    pub fn new(name: Name, params: Vec<Name>) -> Self {
        Self { name, params }
    }

    /// Declared parameter count.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A function definition: prototype plus a body expression.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub proto: Prototype,
    pub body: ExprId,
}

/// A top-level AST item, one per source statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    /// Forward declaration: `extern f(a b)`
    Prototype(Prototype),
    /// Definition: `def f(a b) ...`
    Function(FunctionDef),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_alloc_and_get() {
        let mut arena = ExprArena::new();
        let one = arena.alloc(ExprKind::Number(1.0));
        let two = arena.alloc(ExprKind::Number(2.0));
        let sum = arena.alloc(ExprKind::Binary {
            op: '+',
            lhs: one,
            rhs: two,
        });
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.get(one), &ExprKind::Number(1.0));
        match arena.get(sum) {
            ExprKind::Binary { op, lhs, rhs } => {
                assert_eq!(*op, '+');
                assert_eq!(*lhs, one);
                assert_eq!(*rhs, two);
            }
            other => panic!("expected binary, got {other:?}"),
        }
    }
}
