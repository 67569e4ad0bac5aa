//! Instruction and operand definitions.

use std::fmt;

use smallvec::SmallVec;

use crate::ir::FuncId;

/// A single-assignment value inside one function.
///
/// Values `0..arity` are the function's incoming parameters; every other
/// value is defined by exactly one instruction.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ValueId(u32);

impl ValueId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ValueId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// A named, function-local stack slot.
///
/// One slot is reserved per logical variable; slots are never aliased
/// across variables, which is what lets the slot-promotion pass rewrite
/// loads and stores without an aliasing analysis.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct SlotId(u32);

impl SlotId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        SlotId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot{}", self.0)
    }
}

/// Floating-point arithmetic opcode.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ArithOp {
    FAdd,
    FSub,
    FMul,
}

impl ArithOp {
    /// Whether operand order does not matter.
    pub fn is_commutative(self) -> bool {
        matches!(self, ArithOp::FAdd | ArithOp::FMul)
    }

    /// Mnemonic used by the printer.
    pub fn mnemonic(self) -> &'static str {
        match self {
            ArithOp::FAdd => "fadd",
            ArithOp::FSub => "fsub",
            ArithOp::FMul => "fmul",
        }
    }
}

/// Call argument list; calls in this language are almost always short.
pub type CallArgs = SmallVec<[ValueId; 4]>;

/// An IR instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum Instr {
    /// `dst = <f64 literal>`
    Const { dst: ValueId, value: f64 },

    /// Reserve a stack slot. Only valid in the entry block's alloca
    /// prefix, before any non-alloca instruction.
    Alloca { slot: SlotId },

    /// `dst = *slot`
    Load { dst: ValueId, slot: SlotId },

    /// `*slot = value`
    Store { slot: SlotId, value: ValueId },

    /// `dst = lhs <op> rhs`
    Arith {
        dst: ValueId,
        op: ArithOp,
        lhs: ValueId,
        rhs: ValueId,
    },

    /// `dst = (lhs <u rhs)` — unordered less-than, boolean-valued.
    FCmpULt {
        dst: ValueId,
        lhs: ValueId,
        rhs: ValueId,
    },

    /// `dst = uitofp(src)` — widen a compare result to 1.0/0.0.
    UiToFp { dst: ValueId, src: ValueId },

    /// `dst = callee(args...)`
    Call {
        dst: ValueId,
        callee: FuncId,
        args: CallArgs,
    },

    /// Return `value` to the caller. Block terminator.
    Ret { value: ValueId },
}

impl Instr {
    /// The value this instruction defines, if any.
    pub fn dst(&self) -> Option<ValueId> {
        match *self {
            Instr::Const { dst, .. }
            | Instr::Load { dst, .. }
            | Instr::Arith { dst, .. }
            | Instr::FCmpULt { dst, .. }
            | Instr::UiToFp { dst, .. }
            | Instr::Call { dst, .. } => Some(dst),
            Instr::Alloca { .. } | Instr::Store { .. } | Instr::Ret { .. } => None,
        }
    }

    /// Whether the instruction has no side effects beyond defining `dst`.
    ///
    /// Pure instructions may be deduplicated or dropped once their value
    /// is unused. Calls are not pure: a callee body is opaque here.
    pub fn is_pure(&self) -> bool {
        matches!(
            self,
            Instr::Const { .. }
                | Instr::Load { .. }
                | Instr::Arith { .. }
                | Instr::FCmpULt { .. }
                | Instr::UiToFp { .. }
        )
    }

    /// Whether the instruction ends its block.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Instr::Ret { .. })
    }

    /// Visit every value operand (not definitions) mutably.
    pub fn for_each_operand_mut(&mut self, mut f: impl FnMut(&mut ValueId)) {
        match self {
            Instr::Const { .. } | Instr::Alloca { .. } | Instr::Load { .. } => {}
            Instr::Store { value, .. } => f(value),
            Instr::Arith { lhs, rhs, .. } | Instr::FCmpULt { lhs, rhs, .. } => {
                f(lhs);
                f(rhs);
            }
            Instr::UiToFp { src, .. } => f(src),
            Instr::Call { args, .. } => {
                for arg in args {
                    f(arg);
                }
            }
            Instr::Ret { value } => f(value),
        }
    }

    /// Visit every value operand (not definitions).
    pub fn for_each_operand(&self, mut f: impl FnMut(ValueId)) {
        match self {
            Instr::Const { .. } | Instr::Alloca { .. } | Instr::Load { .. } => {}
            Instr::Store { value, .. } => f(*value),
            Instr::Arith { lhs, rhs, .. } | Instr::FCmpULt { lhs, rhs, .. } => {
                f(*lhs);
                f(*rhs);
            }
            Instr::UiToFp { src, .. } => f(*src),
            Instr::Call { args, .. } => {
                for arg in args {
                    f(*arg);
                }
            }
            Instr::Ret { value } => f(*value),
        }
    }
}
