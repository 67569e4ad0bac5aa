//! Function and basic-block containers.

use crate::ir::{Instr, SlotId, ValueId};
use crate::Name;

/// A straight-line sequence of instructions ending in a terminator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    pub instrs: Vec<Instr>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }
}

/// An IR function: signature plus, for definitions, a body.
///
/// A function with no blocks is a declaration — a callable signature
/// whose body lives elsewhere (or has not been rendered yet). The
/// name→function index lives in the owning [`Module`](crate::ir::Module).
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub name: Name,
    /// Ordered parameter names. Parameter `i` is value `i` in the body.
    pub params: Vec<Name>,
    /// Variable name backing each stack slot.
    pub slots: Vec<Name>,
    /// Body blocks; empty for declarations. Block 0 is the entry block.
    pub blocks: Vec<Block>,
    /// Upper bound on value ids used by the body (parameters included).
    /// Optimization may leave gaps below this bound.
    pub num_values: u32,
}

impl Function {
    /// Create a bodiless declaration.
    pub fn declaration(name: Name, params: Vec<Name>) -> Self {
        let num_values = params.len() as u32;
        Self {
            name,
            params,
            slots: Vec::new(),
            blocks: Vec::new(),
            num_values,
        }
    }

    /// Declared parameter count.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether this is a declaration without a body.
    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The value id of parameter `i`.
    pub fn param_value(&self, i: usize) -> ValueId {
        debug_assert!(i < self.params.len());
        ValueId::new(i as u32)
    }

    /// The variable name behind a slot.
    pub fn slot_name(&self, slot: SlotId) -> Name {
        self.slots[slot.index()]
    }

    /// Iterate over all instructions across all blocks.
    pub fn all_instrs(&self) -> impl Iterator<Item = &Instr> {
        self.blocks.iter().flat_map(|b| b.instrs.iter())
    }

    /// Check the entry-block layout invariant: all allocas first, and no
    /// instruction after the first terminator. Used by debug assertions
    /// and the pass pipeline's precondition.
    pub fn is_well_formed(&self) -> bool {
        let Some(entry) = self.blocks.first() else {
            // Declarations are trivially well-formed.
            return true;
        };
        let mut seen_non_alloca = false;
        let mut seen_terminator = false;
        for instr in &entry.instrs {
            if seen_terminator {
                return false;
            }
            match instr {
                Instr::Alloca { .. } => {
                    if seen_non_alloca {
                        return false;
                    }
                }
                other => {
                    seen_non_alloca = true;
                    if other.is_terminator() {
                        seen_terminator = true;
                    }
                }
            }
        }
        // Non-entry blocks must not hold allocas.
        self.blocks[1..]
            .iter()
            .all(|b| b.instrs.iter().all(|i| !matches!(i, Instr::Alloca { .. })))
    }
}
