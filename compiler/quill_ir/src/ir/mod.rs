//! Register-based intermediate representation.
//!
//! The IR a function lowers into: a list of basic blocks holding
//! instructions that define single-assignment values ([`ValueId`]) and
//! read/write named stack slots ([`SlotId`]). The instruction set is the
//! exact footprint the renderer emits for the language — f64 constants,
//! the three arithmetic ops, the unordered less-than compare plus its
//! widening conversion, slot traffic, calls, and returns.
//!
//! Well-formedness (relied on by the optimizer):
//! - every value has exactly one defining instruction (or is a parameter),
//! - every function has exactly one entry block, with all `Alloca`
//!   instructions placed before any other instruction,
//! - a block's instructions after the first `Ret` are unreachable.

mod builder;
mod function;
mod instr;
mod module;

pub use builder::FunctionBuilder;
pub use function::{Block, Function};
pub use instr::{ArithOp, CallArgs, Instr, SlotId, ValueId};
pub use module::{FuncId, Module};
