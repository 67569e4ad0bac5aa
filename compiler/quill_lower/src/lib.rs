//! AST-to-IR lowering for Quill.
//!
//! This crate is the lowering core of the Quill compiler: it walks the
//! arena AST the front end built (see `quill_ir::ast`), emits register
//! IR through a staging builder, resolves variables through a
//! per-function symbol table, reconciles forward declarations with
//! definitions, and runs the standard optimization pipeline over every
//! finished body.
//!
//! # Entry points
//!
//! - [`RenderContext::render`] — lower one top-level item (an `extern`
//!   prototype or a function definition),
//! - [`RenderContext::render_expr_statement`] — lower a bare top-level
//!   expression by wrapping it in an anonymous function.
//!
//! Both return `Result`; see [`LowerError`] for the failure taxonomy.
//! All lowering is fail-fast and deterministic, and a failed definition
//! never leaves a partially-built function in the module.
//!
//! # Example
//!
//! ```
//! use quill_ir::ast::{ExprArena, ExprKind, FunctionDef, Item, Prototype};
//! use quill_lower::RenderContext;
//!
//! let mut ctx = RenderContext::new();
//! let name = ctx.interner_mut().intern("double");
//! let x = ctx.interner_mut().intern("x");
//!
//! // def double(x) x * 2
//! let mut arena = ExprArena::new();
//! let var = arena.alloc(ExprKind::Variable(x));
//! let two = arena.alloc(ExprKind::Number(2.0));
//! let body = arena.alloc(ExprKind::Binary { op: '*', lhs: var, rhs: two });
//! let item = Item::Function(FunctionDef {
//!     proto: Prototype::new(name, vec![x]),
//!     body,
//! });
//!
//! let id = ctx.render(&arena, &item).unwrap();
//! assert_eq!(ctx.module().func(id).arity(), 1);
//! ```
//!
//! # Debugging
//!
//! `RUST_LOG=quill_lower=debug` traces item lowering;
//! `RUST_LOG=quill_lower=trace` follows individual rules.

mod context;
mod error;
mod render;

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests use unwrap for brevity"
)]
mod tests;

pub use context::RenderContext;
pub use error::LowerError;
