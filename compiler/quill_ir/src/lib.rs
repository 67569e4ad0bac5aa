//! Data model for the Quill compiler: AST, register IR, and passes.
//!
//! Quill is a tiny expression-oriented language with a single value type
//! (`f64`). This crate holds the pure-data side of its compilation
//! pipeline:
//!
//! - [`StringInterner`] / [`Name`]: compact identifier handles shared
//!   between the front end and the lowering stage,
//! - [`ast`]: the arena-allocated syntax tree the front end produces,
//! - [`ir`]: the register-based intermediate representation lowering
//!   emits — module, functions, blocks, instructions, and the
//!   [`FunctionBuilder`](ir::FunctionBuilder) staging area,
//! - [`passes`]: the function-pass pipeline run over finalized bodies,
//! - [`print`]: textual IR output.
//!
//! The lowering logic itself lives in `quill_lower`.
//!
//! # Debugging
//!
//! Enable tracing with `RUST_LOG=quill_ir=trace` to follow pass
//! pipeline activity.

pub mod ast;
pub mod ir;
pub mod passes;
pub mod print;

mod interner;
mod name;

pub use interner::StringInterner;
pub use name::Name;
