//! Function body builder.
//!
//! `FunctionBuilder` is the staging area for one function body: the
//! renderer emits instructions into it, and only a fully rendered body
//! is turned into a [`Function`] and committed to the module. A body
//! abandoned halfway is simply dropped, so no half-built function is
//! ever observable through module lookups.
//!
//! The builder is also where the IR's structural invariants are made
//! unforgeable: value ids are handed out once per defining instruction,
//! and allocas go through [`FunctionBuilder::entry_alloca`], which keeps
//! them packed at the head of the entry block the way the slot-promotion
//! pass expects.

use crate::ir::{ArithOp, Block, CallArgs, FuncId, Function, Instr, SlotId, ValueId};
use crate::Name;

/// Builds one function body, instruction by instruction.
#[derive(Debug)]
pub struct FunctionBuilder {
    name: Name,
    params: Vec<Name>,
    slots: Vec<Name>,
    entry: Vec<Instr>,
    /// Number of leading `Alloca` instructions in `entry`.
    alloca_prefix: usize,
    next_value: u32,
    terminated: bool,
}

impl FunctionBuilder {
    /// Start a body for a function with the given signature.
    ///
    /// Parameters become values `0..params.len()`.
    pub fn new(name: Name, params: Vec<Name>) -> Self {
        let next_value = params.len() as u32;
        Self {
            name,
            params,
            slots: Vec::new(),
            entry: Vec::new(),
            alloca_prefix: 0,
            next_value,
            terminated: false,
        }
    }

    /// The incoming value of parameter `i`.
    pub fn param(&self, i: usize) -> ValueId {
        debug_assert!(i < self.params.len());
        ValueId::new(i as u32)
    }

    fn fresh(&mut self) -> ValueId {
        let id = ValueId::new(self.next_value);
        self.next_value += 1;
        id
    }

    fn push(&mut self, instr: Instr) {
        debug_assert!(!self.terminated, "emitting past the terminator");
        self.entry.push(instr);
    }

    /// Reserve a stack slot for a variable, placing its `Alloca` in the
    /// entry block's alloca prefix regardless of the current position.
    pub fn entry_alloca(&mut self, var: Name) -> SlotId {
        let slot = SlotId::new(self.slots.len() as u32);
        self.slots.push(var);
        self.entry
            .insert(self.alloca_prefix, Instr::Alloca { slot });
        self.alloca_prefix += 1;
        slot
    }

    /// Emit an f64 constant.
    pub fn const_f64(&mut self, value: f64) -> ValueId {
        let dst = self.fresh();
        self.push(Instr::Const { dst, value });
        dst
    }

    /// Emit a load from a slot.
    pub fn load(&mut self, slot: SlotId) -> ValueId {
        let dst = self.fresh();
        self.push(Instr::Load { dst, slot });
        dst
    }

    /// Emit a store into a slot.
    pub fn store(&mut self, slot: SlotId, value: ValueId) {
        self.push(Instr::Store { slot, value });
    }

    /// Emit a floating-point arithmetic instruction.
    pub fn arith(&mut self, op: ArithOp, lhs: ValueId, rhs: ValueId) -> ValueId {
        let dst = self.fresh();
        self.push(Instr::Arith { dst, op, lhs, rhs });
        dst
    }

    /// Emit an unordered less-than compare (boolean-valued result).
    pub fn fcmp_ult(&mut self, lhs: ValueId, rhs: ValueId) -> ValueId {
        let dst = self.fresh();
        self.push(Instr::FCmpULt { dst, lhs, rhs });
        dst
    }

    /// Widen a compare result to the language's f64 representation.
    pub fn ui_to_fp(&mut self, src: ValueId) -> ValueId {
        let dst = self.fresh();
        self.push(Instr::UiToFp { dst, src });
        dst
    }

    /// Emit a call.
    pub fn call(&mut self, callee: FuncId, args: CallArgs) -> ValueId {
        let dst = self.fresh();
        self.push(Instr::Call { dst, callee, args });
        dst
    }

    /// Emit the return and close the body.
    pub fn ret(&mut self, value: ValueId) {
        self.push(Instr::Ret { value });
        self.terminated = true;
    }

    /// Finish the body into a `Function`.
    ///
    /// # Panics
    /// Panics if no terminator was emitted; the renderer always returns
    /// the body expression's value, so an unterminated body is a bug.
    pub fn finish(self) -> Function {
        assert!(self.terminated, "function body has no terminator");
        let func = Function {
            name: self.name,
            params: self.params,
            slots: self.slots,
            blocks: vec![Block { instrs: self.entry }],
            num_values: self.next_value,
        };
        debug_assert!(func.is_well_formed());
        func
    }
}
