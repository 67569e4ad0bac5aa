//! Instruction combining: constant folding.
//!
//! Rewrites instructions whose operands are all constants into `Const`
//! definitions. The compare folds with the same unordered rule the
//! instruction has at runtime (NaN on either side makes `<` true), so
//! folding never changes an observable result.

use tracing::trace;

use super::{const_values, sweep_dead_values, FunctionPass};
use crate::ir::{ArithOp, Function, Instr};

pub struct CombineInstrs;

impl FunctionPass for CombineInstrs {
    fn name(&self) -> &'static str {
        "combine-instrs"
    }

    fn run(&self, func: &mut Function) {
        let mut consts = const_values(func);
        let mut folded = 0usize;

        for block in &mut func.blocks {
            for instr in &mut block.instrs {
                let replacement = match *instr {
                    Instr::Arith { dst, op, lhs, rhs } => {
                        match (consts.get(&lhs), consts.get(&rhs)) {
                            (Some(&l), Some(&r)) => {
                                let value = match op {
                                    ArithOp::FAdd => l + r,
                                    ArithOp::FSub => l - r,
                                    ArithOp::FMul => l * r,
                                };
                                Some(Instr::Const { dst, value })
                            }
                            _ => None,
                        }
                    }
                    Instr::FCmpULt { dst, lhs, rhs } => {
                        match (consts.get(&lhs), consts.get(&rhs)) {
                            (Some(&l), Some(&r)) => {
                                // Unordered less-than: true on NaN operands.
                                let value = if l.is_nan() || r.is_nan() || l < r {
                                    1.0
                                } else {
                                    0.0
                                };
                                Some(Instr::Const { dst, value })
                            }
                            _ => None,
                        }
                    }
                    // The compare already folded to 1.0/0.0; widening a
                    // constant boolean is the identity.
                    Instr::UiToFp { dst, src } => consts
                        .get(&src)
                        .map(|&value| Instr::Const { dst, value }),
                    _ => None,
                };

                if let Some(new_instr) = replacement {
                    if let Instr::Const { dst, value } = new_instr {
                        consts.insert(dst, value);
                    }
                    *instr = new_instr;
                    folded += 1;
                }
            }
        }

        sweep_dead_values(func);
        trace!(folded, "constant folding done");
    }
}
