//! Textual IR output.
//!
//! Stand-in for a `dump()` on functions and modules: a stable, readable
//! rendering used for debugging and for the structural-equivalence
//! checks in tests. `Name` handles only mean something next to their
//! interner, so the entry points take one and return a wrapper that
//! implements [`fmt::Display`].
//!
//! Sample output:
//!
//! ```text
//! fn @fib(n) {
//! entry:
//!   alloca $n
//!   store $n, %0
//!   %1 = load $n
//!   ret %1
//! }
//! ```

use std::fmt;

use crate::ir::{FuncId, Function, Instr, Module, SlotId};
use crate::StringInterner;

/// Display wrapper for one function.
pub struct FunctionDisplay<'a> {
    func: &'a Function,
    module: &'a Module,
    interner: &'a StringInterner,
}

/// Display wrapper for a whole module, functions in declaration order.
pub struct ModuleDisplay<'a> {
    module: &'a Module,
    interner: &'a StringInterner,
}

/// Print one function (the module resolves callee names in `call`s).
pub fn display_function<'a>(
    func: &'a Function,
    module: &'a Module,
    interner: &'a StringInterner,
) -> FunctionDisplay<'a> {
    FunctionDisplay {
        func,
        module,
        interner,
    }
}

/// Print every function in the module.
pub fn display_module<'a>(module: &'a Module, interner: &'a StringInterner) -> ModuleDisplay<'a> {
    ModuleDisplay { module, interner }
}

impl fmt::Display for FunctionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.interner.lookup(self.func.name);
        if self.func.is_declaration() {
            write!(f, "declare @{name}(")?;
            write_params(f, self.func, self.interner)?;
            return writeln!(f, ")");
        }
        write!(f, "fn @{name}(")?;
        write_params(f, self.func, self.interner)?;
        writeln!(f, ") {{")?;
        for (i, block) in self.func.blocks.iter().enumerate() {
            if i == 0 {
                writeln!(f, "entry:")?;
            } else {
                writeln!(f, "bb{i}:")?;
            }
            for instr in &block.instrs {
                write!(f, "  ")?;
                write_instr(f, instr, self.func, self.module, self.interner)?;
                writeln!(f)?;
            }
        }
        writeln!(f, "}}")
    }
}

impl fmt::Display for ModuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, func)) in self.module.functions().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", display_function(func, self.module, self.interner))?;
        }
        Ok(())
    }
}

fn write_params(f: &mut fmt::Formatter<'_>, func: &Function, interner: &StringInterner) -> fmt::Result {
    for (i, &param) in func.params.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", interner.lookup(param))?;
    }
    Ok(())
}

fn write_slot(
    f: &mut fmt::Formatter<'_>,
    slot: SlotId,
    func: &Function,
    interner: &StringInterner,
) -> fmt::Result {
    write!(f, "${}", interner.lookup(func.slot_name(slot)))
}

fn callee_name(module: &Module, interner: &StringInterner, id: FuncId) -> String {
    interner.lookup(module.func(id).name).to_owned()
}

fn write_instr(
    f: &mut fmt::Formatter<'_>,
    instr: &Instr,
    func: &Function,
    module: &Module,
    interner: &StringInterner,
) -> fmt::Result {
    match instr {
        Instr::Const { dst, value } => write!(f, "%{} = const {value:?}", dst.index()),
        Instr::Alloca { slot } => {
            write!(f, "alloca ")?;
            write_slot(f, *slot, func, interner)
        }
        Instr::Load { dst, slot } => {
            write!(f, "%{} = load ", dst.index())?;
            write_slot(f, *slot, func, interner)
        }
        Instr::Store { slot, value } => {
            write!(f, "store ")?;
            write_slot(f, *slot, func, interner)?;
            write!(f, ", %{}", value.index())
        }
        Instr::Arith { dst, op, lhs, rhs } => write!(
            f,
            "%{} = {} %{}, %{}",
            dst.index(),
            op.mnemonic(),
            lhs.index(),
            rhs.index()
        ),
        Instr::FCmpULt { dst, lhs, rhs } => write!(
            f,
            "%{} = fcmp.ult %{}, %{}",
            dst.index(),
            lhs.index(),
            rhs.index()
        ),
        Instr::UiToFp { dst, src } => {
            write!(f, "%{} = uitofp %{}", dst.index(), src.index())
        }
        Instr::Call { dst, callee, args } => {
            write!(
                f,
                "%{} = call @{}(",
                dst.index(),
                callee_name(module, interner, *callee)
            )?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "%{}", arg.index())?;
            }
            write!(f, ")")
        }
        Instr::Ret { value } => write!(f, "ret %{}", value.index()),
    }
}
