//! Commutative canonicalization.
//!
//! Moves constant operands of commutative instructions to the right, so
//! that expressions differing only in operand order hash identically for
//! the value-numbering pass that runs next.

use tracing::trace;

use super::{const_values, FunctionPass};
use crate::ir::{Function, Instr};

pub struct Reassociate;

impl FunctionPass for Reassociate {
    fn name(&self) -> &'static str {
        "reassociate"
    }

    fn run(&self, func: &mut Function) {
        let consts = const_values(func);
        let mut swapped = 0usize;

        for block in &mut func.blocks {
            for instr in &mut block.instrs {
                if let Instr::Arith { op, lhs, rhs, .. } = instr {
                    if op.is_commutative()
                        && consts.contains_key(lhs)
                        && !consts.contains_key(rhs)
                    {
                        std::mem::swap(lhs, rhs);
                        swapped += 1;
                    }
                }
            }
        }
        trace!(swapped, "reassociation done");
    }
}
