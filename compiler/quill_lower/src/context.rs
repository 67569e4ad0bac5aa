//! Render context: the state lowering threads through every rule.
//!
//! One `RenderContext` per compilation unit (or per REPL session). It
//! owns the IR module being built, the interner behind every `Name` in
//! the unit's AST, the per-function symbol table, and the optimization
//! pipeline run over each finished body. Nothing here is shared:
//! lowering is single-threaded and non-reentrant, and concurrent units
//! each get their own context and module.

use rustc_hash::FxHashMap;

use quill_ir::ir::{Module, SlotId};
use quill_ir::passes::PassPipeline;
use quill_ir::{Name, StringInterner};

/// Owns the module, symbol table, and pipeline for one compilation unit.
///
/// The front end interns identifiers through
/// [`interner_mut`](RenderContext::interner_mut) while building the AST,
/// then calls [`render`](RenderContext::render) once per top-level item.
#[derive(Debug)]
pub struct RenderContext {
    pub(crate) interner: StringInterner,
    pub(crate) module: Module,
    /// Variable name → stack slot, valid for the function body currently
    /// being rendered. Cleared at every function boundary; the language
    /// has no nested lexical scopes.
    pub(crate) named_slots: FxHashMap<Name, SlotId>,
    pub(crate) pipeline: PassPipeline,
    /// Counter for naming anonymous top-level expression wrappers.
    pub(crate) anon_counter: u32,
}

impl RenderContext {
    /// Create a context with the standard optimization pipeline.
    pub fn new() -> Self {
        Self::with_pipeline(PassPipeline::standard())
    }

    /// Create a context with a caller-chosen pipeline.
    ///
    /// Tests use [`PassPipeline::empty`] to inspect the renderer's raw
    /// output before optimization.
    pub fn with_pipeline(pipeline: PassPipeline) -> Self {
        Self {
            interner: StringInterner::new(),
            module: Module::new(),
            named_slots: FxHashMap::default(),
            pipeline,
            anon_counter: 0,
        }
    }

    /// The module built so far.
    pub fn module(&self) -> &Module {
        &self.module
    }

    /// The unit's interner.
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Intern identifiers for AST construction.
    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve a name to owned text for error reporting.
    pub(crate) fn name_str(&self, name: Name) -> String {
        self.interner.lookup(name).to_owned()
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}
