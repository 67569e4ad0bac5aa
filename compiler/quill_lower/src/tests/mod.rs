//! Renderer test suite.
//!
//! Tests build AST fragments through [`TestUnit`], a thin harness that
//! bundles a render context with an expression arena, and assert on the
//! printed IR or on the error returned.

mod error_tests;

use quill_ir::ast::{ExprArena, ExprId, ExprKind, FunctionDef, Item, Prototype};
use quill_ir::ir::{FuncId, Function, Instr};
use quill_ir::passes::PassPipeline;
use quill_ir::print::{display_function, display_module};

use crate::{LowerError, RenderContext};

/// Install a tracing subscriber honoring `RUST_LOG`, once.
pub(crate) fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One compilation unit under test: a context plus its arena.
pub(crate) struct TestUnit {
    pub ctx: RenderContext,
    pub arena: ExprArena,
}

impl TestUnit {
    /// Unit with the standard optimization pipeline.
    pub fn new() -> Self {
        init_tracing();
        Self {
            ctx: RenderContext::new(),
            arena: ExprArena::new(),
        }
    }

    /// Unit with no optimization, for asserting on raw renderer output.
    pub fn raw() -> Self {
        init_tracing();
        Self {
            ctx: RenderContext::with_pipeline(PassPipeline::empty()),
            arena: ExprArena::new(),
        }
    }

    pub fn num(&mut self, value: f64) -> ExprId {
        self.arena.alloc(ExprKind::Number(value))
    }

    pub fn var(&mut self, name: &str) -> ExprId {
        let name = self.ctx.interner_mut().intern(name);
        self.arena.alloc(ExprKind::Variable(name))
    }

    pub fn bin(&mut self, op: char, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.arena.alloc(ExprKind::Binary { op, lhs, rhs })
    }

    pub fn call(&mut self, callee: &str, args: Vec<ExprId>) -> ExprId {
        let callee = self.ctx.interner_mut().intern(callee);
        self.arena.alloc(ExprKind::Call { callee, args })
    }

    pub fn proto(&mut self, name: &str, params: &[&str]) -> Prototype {
        let name = self.ctx.interner_mut().intern(name);
        let params = params
            .iter()
            .map(|p| self.ctx.interner_mut().intern(p))
            .collect();
        Prototype::new(name, params)
    }

    /// Render an `extern` declaration.
    pub fn declare(&mut self, name: &str, params: &[&str]) -> Result<FuncId, LowerError> {
        let proto = self.proto(name, params);
        self.ctx.render(&self.arena, &Item::Prototype(proto))
    }

    /// Render a function definition.
    pub fn define(
        &mut self,
        name: &str,
        params: &[&str],
        body: ExprId,
    ) -> Result<FuncId, LowerError> {
        let proto = self.proto(name, params);
        self.ctx
            .render(&self.arena, &Item::Function(FunctionDef { proto, body }))
    }

    pub fn func(&self, id: FuncId) -> &Function {
        self.ctx.module().func(id)
    }

    /// Printed IR of one function.
    pub fn print(&self, id: FuncId) -> String {
        display_function(self.func(id), self.ctx.module(), self.ctx.interner()).to_string()
    }

    /// Printed IR of everything rendered so far.
    pub fn print_module(&self) -> String {
        display_module(self.ctx.module(), self.ctx.interner()).to_string()
    }
}

/// The constant value a fully folded function returns, if its body
/// reduced to `const` + `ret`.
pub(crate) fn returned_const(func: &Function) -> Option<f64> {
    let ret = func.all_instrs().find_map(|i| match i {
        Instr::Ret { value } => Some(*value),
        _ => None,
    })?;
    func.all_instrs().find_map(|i| match i {
        Instr::Const { dst, value } if *dst == ret => Some(*value),
        _ => None,
    })
}
