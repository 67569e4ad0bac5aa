//! Redundant-expression elimination.
//!
//! A local value-numbering sweep: pure instructions computing something
//! already computed are deleted and their uses rewired to the earlier
//! value. Loads are skipped — whether a load is redundant depends on the
//! stores between, which is slot promotion's territory, not this pass's.

use rustc_hash::FxHashMap;
use tracing::trace;

use super::{apply_substitution, sweep_dead_values, FunctionPass};
use crate::ir::{ArithOp, Function, Instr, ValueId};

/// Hashable identity of a pure computation.
#[derive(Hash, Eq, PartialEq)]
enum ExprKey {
    Const(u64),
    Arith(ArithOp, ValueId, ValueId),
    CmpULt(ValueId, ValueId),
    Widen(ValueId),
}

pub struct ValueNumbering;

impl FunctionPass for ValueNumbering {
    fn name(&self) -> &'static str {
        "value-numbering"
    }

    fn run(&self, func: &mut Function) {
        let mut table: FxHashMap<ExprKey, ValueId> = FxHashMap::default();
        let mut subst: FxHashMap<ValueId, ValueId> = FxHashMap::default();

        for block in &mut func.blocks {
            for instr in &block.instrs {
                let resolve = |mut v: ValueId| {
                    while let Some(&n) = subst.get(&v) {
                        v = n;
                    }
                    v
                };
                let key = match *instr {
                    Instr::Const { value, .. } => Some(ExprKey::Const(value.to_bits())),
                    Instr::Arith { op, lhs, rhs, .. } => {
                        Some(ExprKey::Arith(op, resolve(lhs), resolve(rhs)))
                    }
                    Instr::FCmpULt { lhs, rhs, .. } => {
                        Some(ExprKey::CmpULt(resolve(lhs), resolve(rhs)))
                    }
                    Instr::UiToFp { src, .. } => Some(ExprKey::Widen(resolve(src))),
                    // Loads and effectful instructions never dedup.
                    _ => None,
                };
                let (Some(key), Some(dst)) = (key, instr.dst()) else {
                    continue;
                };
                match table.get(&key) {
                    Some(&existing) => {
                        subst.insert(dst, existing);
                    }
                    None => {
                        table.insert(key, dst);
                    }
                }
            }
            // The duplicates are exactly the substitution sources.
            block
                .instrs
                .retain(|instr| !matches!(instr.dst(), Some(d) if subst.contains_key(&d)));
        }

        let eliminated = subst.len();
        apply_substitution(func, &subst);
        sweep_dead_values(func);
        trace!(eliminated, "value numbering done");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::FunctionBuilder;
    use crate::StringInterner;

    #[test]
    fn test_dedups_repeated_computation() {
        let mut interner = StringInterner::new();
        let f = interner.intern("f");
        let x = interner.intern("x");

        // (x + 1) + (x + 1), built without sharing.
        let mut bx = FunctionBuilder::new(f, vec![x]);
        let one_a = bx.const_f64(1.0);
        let sum_a = bx.arith(ArithOp::FAdd, bx.param(0), one_a);
        let one_b = bx.const_f64(1.0);
        let sum_b = bx.arith(ArithOp::FAdd, bx.param(0), one_b);
        let total = bx.arith(ArithOp::FAdd, sum_a, sum_b);
        bx.ret(total);
        let mut func = bx.finish();

        ValueNumbering.run(&mut func);

        // One const, one x+1, one final add.
        let consts = func
            .all_instrs()
            .filter(|i| matches!(i, Instr::Const { .. }))
            .count();
        let ariths = func
            .all_instrs()
            .filter(|i| matches!(i, Instr::Arith { .. }))
            .count();
        assert_eq!(consts, 1);
        assert_eq!(ariths, 2);
        if let Some(Instr::Arith { lhs, rhs, .. }) = func
            .all_instrs()
            .filter(|i| matches!(i, Instr::Arith { .. }))
            .last()
        {
            assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn test_calls_never_dedup() {
        use crate::ir::{CallArgs, FuncId};

        let mut interner = StringInterner::new();
        let f = interner.intern("f");

        let mut bx = FunctionBuilder::new(f, vec![]);
        let callee = FuncId::new(0);
        let a = bx.call(callee, CallArgs::new());
        let b = bx.call(callee, CallArgs::new());
        let sum = bx.arith(ArithOp::FAdd, a, b);
        bx.ret(sum);
        let mut func = bx.finish();

        ValueNumbering.run(&mut func);

        let calls = func
            .all_instrs()
            .filter(|i| matches!(i, Instr::Call { .. }))
            .count();
        assert_eq!(calls, 2);
    }
}
