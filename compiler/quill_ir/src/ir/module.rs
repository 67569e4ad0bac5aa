//! Module: the lifetime-owning container of IR functions.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ir::Function;
use crate::Name;

/// Handle to a function within one [`Module`].
///
/// Handles are module-local; sharing them across modules is a linking
/// concern outside this crate.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct FuncId(u32);

impl FuncId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        FuncId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for FuncId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FuncId({})", self.0)
    }
}

/// Owns every function — declared or defined — of one compilation unit.
///
/// A prototype may sit in the module before its body is rendered, which
/// is what makes forward references and recursion work: `Call` lowering
/// resolves callees against this table.
#[derive(Debug, Default)]
pub struct Module {
    functions: Vec<Function>,
    index: FxHashMap<Name, FuncId>,
}

impl Module {
    /// Create an empty module.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a function by name.
    pub fn lookup(&self, name: Name) -> Option<FuncId> {
        self.index.get(&name).copied()
    }

    /// Borrow a function.
    pub fn func(&self, id: FuncId) -> &Function {
        &self.functions[id.index()]
    }

    /// Mutably borrow a function.
    pub fn func_mut(&mut self, id: FuncId) -> &mut Function {
        &mut self.functions[id.index()]
    }

    /// Insert a fresh declaration.
    ///
    /// The caller must have checked that `name` is unbound; duplicate
    /// handling is the prototype reconciler's job, not the module's.
    pub fn declare(&mut self, name: Name, params: Vec<Name>) -> FuncId {
        debug_assert!(!self.index.contains_key(&name), "name already bound");
        let id = FuncId::new(self.functions.len() as u32);
        self.functions.push(Function::declaration(name, params));
        self.index.insert(name, id);
        trace!(?id, "declared function");
        id
    }

    /// Attach a rendered body to a declaration.
    ///
    /// `body` must carry the same name and arity as the declaration; the
    /// staged function wholesale replaces the bodiless one.
    pub fn define(&mut self, id: FuncId, body: Function) {
        let decl = &self.functions[id.index()];
        debug_assert!(decl.is_declaration(), "function already defined");
        debug_assert_eq!(decl.name, body.name);
        debug_assert_eq!(decl.arity(), body.arity());
        self.functions[id.index()] = body;
    }

    /// Remove a declaration that was created by a definition whose body
    /// failed to render.
    ///
    /// Lowering is non-reentrant, so such a declaration is always the most
    /// recently inserted function; retracting it keeps earlier handles
    /// stable. Retracting anything else is a renderer bug.
    pub fn retract(&mut self, id: FuncId) {
        assert_eq!(
            id.index() + 1,
            self.functions.len(),
            "retract only applies to the most recent declaration"
        );
        let func = self.functions.pop();
        if let Some(func) = func {
            debug_assert!(func.is_declaration(), "retracted a defined function");
            self.index.remove(&func.name);
            trace!(?id, "retracted declaration");
        }
    }

    /// Iterate over all functions in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = (FuncId, &Function)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, f)| (FuncId::new(i as u32), f))
    }

    /// Number of functions (declarations included).
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the module holds no functions.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
