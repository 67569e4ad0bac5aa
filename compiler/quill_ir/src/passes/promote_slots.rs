//! Memory-to-register promotion.
//!
//! The renderer gives every variable a stack slot and goes through
//! load/store for each read and write. In a straight-line body the
//! value held by a slot at any load is just the most recent store, so
//! the loads can be replaced by the stored values directly; once no
//! load of a slot remains, its stores and its alloca are dead.
//!
//! Slots are never aliased across variables, so a store to one slot
//! cannot change what a load of another observes.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use super::{apply_substitution, sweep_dead_values, FunctionPass};
use crate::ir::{Function, Instr, SlotId, ValueId};

pub struct PromoteSlots;

impl FunctionPass for PromoteSlots {
    fn name(&self) -> &'static str {
        "promote-slots"
    }

    fn run(&self, func: &mut Function) {
        // Store-to-load forwarding below assumes straight-line code.
        if func.blocks.len() != 1 {
            return;
        }

        let mut current: FxHashMap<SlotId, ValueId> = FxHashMap::default();
        let mut subst: FxHashMap<ValueId, ValueId> = FxHashMap::default();
        // Slots with a load no store dominates; these keep their memory.
        let mut pinned: FxHashSet<SlotId> = FxHashSet::default();

        for instr in &func.blocks[0].instrs {
            match *instr {
                Instr::Store { slot, value } => {
                    current.insert(slot, value);
                }
                Instr::Load { dst, slot } => {
                    if let Some(&value) = current.get(&slot) {
                        subst.insert(dst, value);
                    } else {
                        pinned.insert(slot);
                    }
                }
                _ => {}
            }
        }

        let promoted = subst.len();
        func.blocks[0].instrs.retain(|instr| match *instr {
            Instr::Load { dst, .. } => !subst.contains_key(&dst),
            Instr::Store { slot, .. } | Instr::Alloca { slot } => pinned.contains(&slot),
            _ => true,
        });

        apply_substitution(func, &subst);
        sweep_dead_values(func);
        trace!(promoted, pinned = pinned.len(), "slot promotion done");
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::ir::{ArithOp, FunctionBuilder};
    use crate::StringInterner;

    #[test]
    fn test_promotes_parameter_slot() {
        let mut interner = StringInterner::new();
        let f = interner.intern("f");
        let x = interner.intern("x");

        // fn f(x): alloca; store x; ret load(x) + 1.0
        let mut bx = FunctionBuilder::new(f, vec![x]);
        let slot = bx.entry_alloca(x);
        bx.store(slot, bx.param(0));
        let v = bx.load(slot);
        let one = bx.const_f64(1.0);
        let sum = bx.arith(ArithOp::FAdd, v, one);
        bx.ret(sum);
        let mut func = bx.finish();

        PromoteSlots.run(&mut func);

        // Alloca, store, and load are gone; the add reads the parameter.
        assert!(!func
            .all_instrs()
            .any(|i| matches!(i, Instr::Alloca { .. } | Instr::Store { .. } | Instr::Load { .. })));
        let add = func
            .all_instrs()
            .find(|i| matches!(i, Instr::Arith { .. }))
            .unwrap();
        if let Instr::Arith { lhs, .. } = add {
            assert_eq!(*lhs, func.param_value(0));
        }
        assert!(func.is_well_formed());
    }

    #[test]
    fn test_store_then_load_forwards_latest() {
        let mut interner = StringInterner::new();
        let f = interner.intern("f");
        let x = interner.intern("x");

        // x = 5.0; then read x twice.
        let mut bx = FunctionBuilder::new(f, vec![x]);
        let slot = bx.entry_alloca(x);
        bx.store(slot, bx.param(0));
        let five = bx.const_f64(5.0);
        bx.store(slot, five);
        let a = bx.load(slot);
        let b = bx.load(slot);
        let sum = bx.arith(ArithOp::FAdd, a, b);
        bx.ret(sum);
        let mut func = bx.finish();

        PromoteSlots.run(&mut func);

        if let Some(Instr::Arith { lhs, rhs, .. }) =
            func.all_instrs().find(|i| matches!(i, Instr::Arith { .. }))
        {
            assert_eq!(*lhs, five);
            assert_eq!(*rhs, five);
        } else {
            panic!("add disappeared");
        };
    }
}
