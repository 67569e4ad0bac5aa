//! IR-to-IR optimization passes.
//!
//! The lowering core treats this module as an external service: it
//! builds the [`PassPipeline::standard`] sequence once per render
//! context and runs it over every finalized function body. The pipeline
//! order mirrors the classic function-pass-manager setup — promote
//! memory to registers, combine instructions, reassociate, eliminate
//! redundancies, simplify control flow.
//!
//! Contract with the caller: the function handed in must be well-formed
//! (allocas packed at the entry-block head, nothing after the
//! terminator), passes are total on well-formed input, and nothing
//! outside the given function is touched.

mod combine;
mod promote_slots;
mod reassociate;
mod simplify;
mod value_numbering;

pub use combine::CombineInstrs;
pub use promote_slots::PromoteSlots;
pub use reassociate::Reassociate;
pub use simplify::SimplifyBlocks;
pub use value_numbering::ValueNumbering;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace_span};

use crate::ir::{Function, Instr, ValueId};

/// A transformation over one function body.
pub trait FunctionPass {
    /// Pass name for logging.
    fn name(&self) -> &'static str;

    /// Transform the function in place. Must preserve well-formedness
    /// and observable behavior.
    fn run(&self, func: &mut Function);
}

/// An ordered, fixed sequence of function passes.
pub struct PassPipeline {
    passes: Vec<Box<dyn FunctionPass>>,
}

impl PassPipeline {
    /// The standard pipeline, in the order the original pass manager
    /// registered its passes. There is no alias-analysis entry: stack
    /// slots are unaliased by construction (one slot per variable), so
    /// slot promotion needs no separate analysis.
    pub fn standard() -> Self {
        Self {
            passes: vec![
                Box::new(PromoteSlots),
                Box::new(CombineInstrs),
                Box::new(Reassociate),
                Box::new(ValueNumbering),
                Box::new(SimplifyBlocks),
            ],
        }
    }

    /// A pipeline that leaves functions untouched. Used by tests that
    /// assert on the renderer's raw output.
    pub fn empty() -> Self {
        Self { passes: Vec::new() }
    }

    /// Run every pass, in order, over the function.
    pub fn run(&self, func: &mut Function) {
        debug_assert!(func.is_well_formed(), "pipeline input not well-formed");
        for pass in &self.passes {
            let _span = trace_span!("pass", name = pass.name()).entered();
            pass.run(func);
            debug_assert!(
                func.is_well_formed(),
                "pass {} broke well-formedness",
                pass.name()
            );
        }
        debug!(passes = self.passes.len(), "pipeline finished");
    }

    /// Number of passes in the pipeline.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Whether the pipeline holds no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl std::fmt::Debug for PassPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.passes.iter().map(|p| p.name()))
            .finish()
    }
}

// -- Helpers shared by the passes --

/// Rewrite every operand through the substitution map, following chains
/// (`a -> b`, `b -> c` rewrites uses of `a` to `c`).
fn apply_substitution(func: &mut Function, subst: &FxHashMap<ValueId, ValueId>) {
    if subst.is_empty() {
        return;
    }
    let resolve = |mut v: ValueId| {
        while let Some(&next) = subst.get(&v) {
            v = next;
        }
        v
    };
    for block in &mut func.blocks {
        for instr in &mut block.instrs {
            instr.for_each_operand_mut(|op| *op = resolve(*op));
        }
    }
}

/// Drop pure instructions whose result is never used, repeating until
/// nothing else becomes dead.
fn sweep_dead_values(func: &mut Function) {
    loop {
        let mut used: FxHashSet<ValueId> = FxHashSet::default();
        for instr in func.all_instrs() {
            instr.for_each_operand(|v| {
                used.insert(v);
            });
        }
        let mut removed = false;
        for block in &mut func.blocks {
            block.instrs.retain(|instr| match instr.dst() {
                Some(dst) if instr.is_pure() && !used.contains(&dst) => {
                    removed = true;
                    false
                }
                _ => true,
            });
        }
        if !removed {
            return;
        }
    }
}

/// Collect the constant value behind each `Const` definition.
fn const_values(func: &Function) -> FxHashMap<ValueId, f64> {
    let mut consts = FxHashMap::default();
    for instr in func.all_instrs() {
        if let Instr::Const { dst, value } = *instr {
            consts.insert(dst, value);
        }
    }
    consts
}
