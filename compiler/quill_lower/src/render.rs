//! The AST-to-IR renderer.
//!
//! One lowering rule per node kind, dispatched by an exhaustive match.
//! Expressions are rendered depth-first into a [`FunctionBuilder`]
//! staging area; only a completely rendered body is committed to the
//! module, so a failure can never leave a half-built function visible
//! to later lookups. Every rule is fail-fast: the first error aborts
//! the node and propagates as a `Result`.

use smallvec::SmallVec;
use tracing::{debug, instrument, trace};

use quill_ir::ast::{ExprArena, ExprId, ExprKind, FunctionDef, Item, Prototype};
use quill_ir::ir::{ArithOp, CallArgs, FuncId, Function, FunctionBuilder, ValueId};
use quill_ir::Name;

use crate::context::RenderContext;
use crate::error::LowerError;

impl RenderContext {
    /// Lower one top-level item.
    ///
    /// A bare [`Prototype`] declares a callable signature (the `extern`
    /// form); a [`FunctionDef`] declares and defines in one step. Both
    /// yield the module's handle for the function. Bare top-level
    /// expressions go through
    /// [`render_expr_statement`](Self::render_expr_statement).
    #[instrument(skip(self, arena, item), level = "debug")]
    pub fn render(&mut self, arena: &ExprArena, item: &Item) -> Result<FuncId, LowerError> {
        match item {
            Item::Prototype(proto) => {
                let (id, _) = self.reconcile_prototype(proto)?;
                debug!(name = self.interner.lookup(proto.name), "declared");
                Ok(id)
            }
            Item::Function(def) => self.render_function(arena, def),
        }
    }

    /// Lower a bare top-level expression (a REPL statement).
    ///
    /// The expression becomes the body of a generated zero-parameter
    /// function (`__anon_expr`, `__anon_expr.1`, ...) and takes the
    /// normal function-lowering path, optimization pipeline included.
    /// On failure the wrapper is retracted and the module is untouched.
    pub fn render_expr_statement(
        &mut self,
        arena: &ExprArena,
        expr: ExprId,
    ) -> Result<FuncId, LowerError> {
        let name = self.fresh_anon_name();
        let def = FunctionDef {
            proto: Prototype::new(name, Vec::new()),
            body: expr,
        };
        self.render_function(arena, &def)
    }

    fn fresh_anon_name(&mut self) -> Name {
        let n = self.anon_counter;
        self.anon_counter += 1;
        if n == 0 {
            self.interner.intern("__anon_expr")
        } else {
            self.interner.intern(&format!("__anon_expr.{n}"))
        }
    }

    /// Merge a prototype against any existing declaration or definition
    /// of the same name.
    ///
    /// Returns the function handle and whether it was freshly declared.
    /// A function may be forward-declared any number of times but
    /// defined at most once, and every declaration must agree on arity.
    /// On compatible redeclaration the stored parameter names are rebound
    /// to the new prototype's, so a following body binds the names the
    /// source wrote next to it.
    fn reconcile_prototype(&mut self, proto: &Prototype) -> Result<(FuncId, bool), LowerError> {
        if let Some(id) = self.module.lookup(proto.name) {
            let existing = self.module.func(id);
            if !existing.is_declaration() {
                return Err(LowerError::DuplicateDefinition(self.name_str(proto.name)));
            }
            if existing.arity() != proto.arity() {
                return Err(LowerError::ArityConflict(self.name_str(proto.name)));
            }
            self.module.func_mut(id).params = proto.params.clone();
            trace!(?id, "redeclared");
            return Ok((id, false));
        }
        let id = self.module.declare(proto.name, proto.params.clone());
        Ok((id, true))
    }

    /// Lower a function definition: reconcile the prototype, render the
    /// body into staging, and commit only on total success.
    fn render_function(&mut self, arena: &ExprArena, def: &FunctionDef) -> Result<FuncId, LowerError> {
        let (id, fresh) = self.reconcile_prototype(&def.proto)?;
        match self.render_body(arena, def) {
            Ok(body) => {
                self.module.define(id, body);
                self.pipeline.run(self.module.func_mut(id));
                debug!(name = self.interner.lookup(def.proto.name), "defined");
                Ok(id)
            }
            Err(err) => {
                // A declaration created by this very definition must not
                // survive its failure; one that predates it does.
                if fresh {
                    self.module.retract(id);
                }
                Err(err)
            }
        }
    }

    /// Render a body expression into a staged `Function`.
    ///
    /// Each parameter gets a fresh stack slot in the entry block, the
    /// incoming value is stored into it, and the name is bound in a
    /// cleared symbol table. The body's value becomes the return value.
    fn render_body(&mut self, arena: &ExprArena, def: &FunctionDef) -> Result<Function, LowerError> {
        let params = def.proto.params.clone();
        let mut bx = FunctionBuilder::new(def.proto.name, params.clone());

        self.named_slots.clear();
        for (i, &param) in params.iter().enumerate() {
            let slot = bx.entry_alloca(param);
            bx.store(slot, bx.param(i));
            self.named_slots.insert(param, slot);
        }

        let rendered = self.render_expr(arena, &mut bx, def.body);
        // Symbol table lives exactly as long as one body render.
        self.named_slots.clear();

        let value = rendered?;
        bx.ret(value);
        Ok(bx.finish())
    }

    /// Lower one expression, returning the value it produces.
    fn render_expr(
        &mut self,
        arena: &ExprArena,
        bx: &mut FunctionBuilder,
        id: ExprId,
    ) -> Result<ValueId, LowerError> {
        match arena.get(id) {
            ExprKind::Number(value) => Ok(bx.const_f64(*value)),

            ExprKind::Variable(name) => match self.named_slots.get(name) {
                Some(&slot) => Ok(bx.load(slot)),
                None => Err(LowerError::UnknownVariable(self.name_str(*name))),
            },

            ExprKind::Binary { op: '=', lhs, rhs } => {
                // Assignment is an expression, not a statement, and its
                // target must be a bare variable.
                let ExprKind::Variable(target) = arena.get(*lhs) else {
                    return Err(LowerError::InvalidAssignmentTarget);
                };
                let target = *target;
                let value = self.render_expr(arena, bx, *rhs)?;
                let Some(&slot) = self.named_slots.get(&target) else {
                    return Err(LowerError::UnknownVariable(self.name_str(target)));
                };
                bx.store(slot, value);
                // The assignment's own value is the stored value.
                Ok(value)
            }

            ExprKind::Binary { op, lhs, rhs } => {
                // Left fully rendered (side-effecting assignments
                // included) before right.
                let left = self.render_expr(arena, bx, *lhs)?;
                let right = self.render_expr(arena, bx, *rhs)?;
                match *op {
                    '+' => Ok(bx.arith(ArithOp::FAdd, left, right)),
                    '-' => Ok(bx.arith(ArithOp::FSub, left, right)),
                    '*' => Ok(bx.arith(ArithOp::FMul, left, right)),
                    '<' => {
                        // Booleans are not a value type; widen the
                        // compare bit back to 1.0/0.0.
                        let cmp = bx.fcmp_ult(left, right);
                        Ok(bx.ui_to_fp(cmp))
                    }
                    // `a > b` is rendered as `b < a`, not a distinct
                    // instruction family.
                    '>' => {
                        let cmp = bx.fcmp_ult(right, left);
                        Ok(bx.ui_to_fp(cmp))
                    }
                    other => Err(LowerError::UnknownOperator(other)),
                }
            }

            ExprKind::Call { callee, args } => {
                let Some(func_id) = self.module.lookup(*callee) else {
                    return Err(LowerError::UnknownFunction(self.name_str(*callee)));
                };
                let expected = self.module.func(func_id).arity();
                if expected != args.len() {
                    return Err(LowerError::ArityMismatch {
                        callee: self.name_str(*callee),
                        expected,
                        found: args.len(),
                    });
                }
                let mut values: CallArgs = SmallVec::with_capacity(args.len());
                for &arg in args {
                    // Left to right, stopping at the first failure.
                    values.push(self.render_expr(arena, bx, arg)?);
                }
                Ok(bx.call(func_id, values))
            }
        }
    }
}
