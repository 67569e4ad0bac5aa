//! Lowering rules: the failure paths.
//!
//! Every error kind, plus the rollback guarantees: a failed definition
//! must never leave a partially-built (or freshly declared) function
//! behind.

use pretty_assertions::assert_eq;

use super::TestUnit;
use crate::LowerError;

#[test]
fn test_unknown_variable() {
    let mut t = TestUnit::new();
    let body = t.var("y");
    let err = t.define("f", &["x"], body).unwrap_err();
    assert_eq!(err, LowerError::UnknownVariable("y".into()));
    // The fresh declaration was retracted with the failed body.
    assert!(t.ctx.module().is_empty());
}

#[test]
fn test_variables_do_not_leak_across_functions() {
    let mut t = TestUnit::new();
    let body = t.var("x");
    t.define("f", &["x"], body).unwrap();

    // `x` was f's parameter; g's table starts empty.
    let body = t.var("x");
    let err = t.define("g", &[], body).unwrap_err();
    assert_eq!(err, LowerError::UnknownVariable("x".into()));
}

#[test]
fn test_assignment_target_must_be_variable() {
    let mut t = TestUnit::new();
    // def f(x) 1 = 2
    let one = t.num(1.0);
    let two = t.num(2.0);
    let body = t.bin('=', one, two);
    let err = t.define("f", &["x"], body).unwrap_err();
    assert_eq!(err, LowerError::InvalidAssignmentTarget);

    // def g(x) (x + 1) = 2 — a compound lhs is no better.
    let x = t.var("x");
    let one = t.num(1.0);
    let sum = t.bin('+', x, one);
    let two = t.num(2.0);
    let body = t.bin('=', sum, two);
    let err = t.define("g", &["x"], body).unwrap_err();
    assert_eq!(err, LowerError::InvalidAssignmentTarget);
}

#[test]
fn test_assignment_to_unbound_name() {
    let mut t = TestUnit::new();
    let y = t.var("y");
    let five = t.num(5.0);
    let body = t.bin('=', y, five);
    let err = t.define("f", &["x"], body).unwrap_err();
    assert_eq!(err, LowerError::UnknownVariable("y".into()));
}

#[test]
fn test_unknown_operator_leaves_module_untouched() {
    let mut t = TestUnit::new();
    let one = t.num(1.0);
    let two = t.num(2.0);
    let rem = t.bin('%', one, two);
    let err = t.ctx.render_expr_statement(&t.arena, rem).unwrap_err();
    assert_eq!(err, LowerError::UnknownOperator('%'));
    assert!(t.ctx.module().is_empty());
}

#[test]
fn test_unknown_function() {
    let mut t = TestUnit::new();
    let one = t.num(1.0);
    let body = t.call("missing", vec![one]);
    let err = t.ctx.render_expr_statement(&t.arena, body).unwrap_err();
    assert_eq!(err, LowerError::UnknownFunction("missing".into()));
}

#[test]
fn test_call_arity_mismatch() {
    let mut t = TestUnit::new();
    t.declare("f", &["a", "b"]).unwrap();

    let one = t.num(1.0);
    let body = t.call("f", vec![one]);
    let err = t.ctx.render_expr_statement(&t.arena, body).unwrap_err();
    assert_eq!(
        err,
        LowerError::ArityMismatch {
            callee: "f".into(),
            expected: 2,
            found: 1,
        }
    );
    // Only the extern survives; the anonymous wrapper was retracted.
    assert_eq!(t.ctx.module().len(), 1);
}

#[test]
fn test_duplicate_definition() {
    let mut t = TestUnit::new();
    let one = t.num(1.0);
    t.define("f", &[], one).unwrap();

    let two = t.num(2.0);
    let err = t.define("f", &[], two).unwrap_err();
    assert_eq!(err, LowerError::DuplicateDefinition("f".into()));

    // The first definition is untouched.
    assert_eq!(t.ctx.module().len(), 1);
    let name = t.ctx.interner_mut().intern("f");
    let id = t.ctx.module().lookup(name).unwrap();
    assert!(!t.func(id).is_declaration());
}

#[test]
fn test_redeclaration_arity_conflict() {
    let mut t = TestUnit::new();
    t.declare("f", &["a", "b"]).unwrap();
    let err = t.declare("f", &["a"]).unwrap_err();
    assert_eq!(err, LowerError::ArityConflict("f".into()));
}

#[test]
fn test_definition_arity_conflict_with_extern() {
    let mut t = TestUnit::new();
    t.declare("f", &["a", "b"]).unwrap();

    let body = t.var("a");
    let err = t.define("f", &["a"], body).unwrap_err();
    assert_eq!(err, LowerError::ArityConflict("f".into()));
}

#[test]
fn test_failed_body_keeps_earlier_extern() {
    let mut t = TestUnit::new();
    let id = t.declare("f", &["x"]).unwrap();

    // def f(x) y — the body fails, but the earlier extern must survive
    // as a declaration.
    let body = t.var("y");
    let err = t.define("f", &["x"], body).unwrap_err();
    assert_eq!(err, LowerError::UnknownVariable("y".into()));
    assert_eq!(t.ctx.module().len(), 1);
    assert!(t.func(id).is_declaration());
}

#[test]
fn test_failure_in_nested_subexpression_propagates() {
    let mut t = TestUnit::new();
    // def f(x) x + (2 * y)
    let x = t.var("x");
    let two = t.num(2.0);
    let y = t.var("y");
    let prod = t.bin('*', two, y);
    let body = t.bin('+', x, prod);
    let err = t.define("f", &["x"], body).unwrap_err();
    assert_eq!(err, LowerError::UnknownVariable("y".into()));
    assert!(t.ctx.module().is_empty());
}
