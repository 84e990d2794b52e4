use std::borrow::Cow;

use lumen_glsl::{Expr, Shader, ShaderType, Stmt};

use super::Batch;
use super::ops::{self, Rows};
use crate::builtins::{BuiltinRegistry, Invocation};
use crate::chain::ActiveChain;
use crate::column::Register;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::exec::VectorPaths;
use crate::fold::ConstantFolder;

/// Executes type-resolved shaders over batches of invocations.
///
/// Statements run under the chain of rows still live at that point; an `if`
/// runs each branch under its own sub-chain.
#[derive(Debug, Clone)]
pub struct Interpreter<'r> {
    registry: &'r BuiltinRegistry,
    config: EngineConfig,
}

impl<'r> Interpreter<'r> {
    pub fn new(registry: &'r BuiltinRegistry, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// Single-row, scalar-path interpreter used to evaluate constant
    /// operators.
    pub(crate) fn constant(registry: &'r BuiltinRegistry) -> Self {
        let config = EngineConfig {
            batch_rows: 1,
            vector_paths: VectorPaths::Scalar,
            fold_constants: false,
        };
        Self { registry, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn run(&self, shader: &Shader, batch: &mut Batch) -> Result<(), EngineError> {
        if batch.rows() > self.config.batch_rows {
            return Err(EngineError::BatchTooLarge { rows: batch.rows(), max: self.config.batch_rows });
        }

        let body = if self.config.fold_constants {
            Cow::Owned(ConstantFolder::new(self.registry).fold_block(&shader.body)?)
        } else {
            Cow::Borrowed(&shader.body)
        };

        log::debug!(
            "running {:?} shader: {} statements over {}/{} live rows ({})",
            shader.stage,
            body.len(),
            batch.chain().live_count(),
            batch.rows(),
            self.config.vector_paths,
        );
        let chain = batch.chain().clone();
        self.exec_block(&body, &chain, batch)
    }

    /// Evaluates `expr` on the live rows of `batch`.
    pub fn evaluate(&self, expr: &Expr, batch: &Batch) -> Result<Register, EngineError> {
        self.eval(expr, batch.chain(), batch).map(Cow::into_owned)
    }

    fn rows<'c>(&self, chain: &'c ActiveChain) -> Rows<'c> {
        Rows { chain, paths: self.config.vector_paths }
    }

    // ── Statements ────────────────────────────────────────────────────────

    fn exec_block(&self, stmts: &[Stmt], chain: &ActiveChain, batch: &mut Batch) -> Result<(), EngineError> {
        let mut chain = Cow::Borrowed(chain);
        for stmt in stmts {
            if chain.is_empty() {
                break;
            }
            match stmt {
                Stmt::Assign { target, write_mask, expr } => {
                    let value = self.eval(expr, &chain, batch)?.into_owned();
                    self.assign(target, write_mask.as_deref(), &value, &chain, batch)?;
                }
                Stmt::If { cond, then, otherwise } => {
                    let (taken, not_taken) = self.split(cond, &chain, batch)?;
                    log::trace!(
                        "if: {} rows taken, {} not taken",
                        taken.live_count(),
                        not_taken.live_count()
                    );
                    self.exec_block(then, &taken, batch)?;
                    self.exec_block(otherwise, &not_taken, batch)?;
                    chain = Cow::Owned(chain.filter(|row| !batch.is_discarded(row)));
                }
                Stmt::Discard => {
                    log::trace!("discard: {} rows", chain.live_count());
                    batch.discard(&chain);
                    chain = Cow::Owned(ActiveChain::empty(chain.rows())?);
                }
            }
        }
        Ok(())
    }

    fn assign(
        &self,
        target: &str,
        write_mask: Option<&[u8]>,
        value: &Register,
        chain: &ActiveChain,
        batch: &mut Batch,
    ) -> Result<(), EngineError> {
        let rows = batch.rows();
        let store = batch.store_mut();
        if !store.contains(target) {
            if write_mask.is_some() {
                return Err(EngineError::UnknownVariable(target.to_owned()));
            }
            store.insert(target, Register::zeroed(value.ty(), rows))?;
        }
        let dst = store.get_mut(target).ok_or_else(|| EngineError::UnknownVariable(target.to_owned()))?;

        let lanes: Vec<usize> = match write_mask {
            None => {
                if dst.ty() != value.ty() {
                    return Err(EngineError::mismatch(dst.ty(), value.ty()));
                }
                (0..value.ty().components()).collect()
            }
            Some(mask) => {
                if mask.len() != value.ty().components() || dst.ty().kind() != value.ty().kind() {
                    return Err(EngineError::mismatch(
                        format!("{}-component write to {target}", mask.len()),
                        value.ty(),
                    ));
                }
                let components = dst.ty().components();
                if let Some(&c) = mask.iter().find(|&&c| usize::from(c) >= components) {
                    return Err(EngineError::mismatch(
                        format!("component index below {components} for {target}"),
                        format!("index {c}"),
                    ));
                }
                mask.iter().map(|&c| usize::from(c)).collect()
            }
        };

        let rows = self.rows(chain);
        for (src, dst_lane) in lanes.into_iter().enumerate() {
            let (Some(src), Some(dst)) = (value.lane(src), dst.lane_mut(dst_lane)) else {
                return Err(EngineError::mismatch(format!("component {dst_lane} of {target}"), "no such lane"));
            };
            ops::convert_lane(rows, src, dst);
        }
        Ok(())
    }

    // ── Expressions ───────────────────────────────────────────────────────

    fn eval<'b>(&self, expr: &Expr, chain: &ActiveChain, batch: &'b Batch) -> Result<Cow<'b, Register>, EngineError> {
        let rows = self.rows(chain);
        let register = match expr {
            Expr::Const(value) => Register::splat(value, batch.rows()),
            Expr::Var { name, ty } => {
                let register = batch.variable(name)?;
                if register.ty() != *ty {
                    return Err(EngineError::mismatch(ty, register.ty()));
                }
                return Ok(Cow::Borrowed(register));
            }
            Expr::Call { name, args, ty } => {
                let args = self.eval_all(args, chain, batch)?;
                let params: Vec<ShaderType> = args.iter().map(|a| a.ty()).collect();
                let entry = self.registry.lookup(name, &params)?;
                let refs: Vec<&Register> = args.iter().map(|a| &**a).collect();
                let mut out = Register::zeroed(*ty, batch.rows());
                let inv = Invocation::new(chain, self.config.vector_paths).with_textures(batch.textures());
                entry.execute(&inv, &refs, &mut out)?;
                out
            }
            Expr::Unary { op, operand, ty } => {
                let operand = self.eval(operand, chain, batch)?;
                ops::unary(rows, *op, &operand, *ty)?
            }
            Expr::Binary { op, lhs, rhs, ty } => {
                let lhs = self.eval(lhs, chain, batch)?;
                let rhs = self.eval(rhs, chain, batch)?;
                ops::binary(rows, *op, &lhs, &rhs, *ty)?
            }
            Expr::Select { cond, then, otherwise, ty } => {
                let (taken, not_taken) = self.split(cond, chain, batch)?;
                let mut out = Register::zeroed(*ty, batch.rows());
                for (arm, sub) in [(then, &taken), (otherwise, &not_taken)] {
                    if sub.is_empty() {
                        continue;
                    }
                    let value = self.eval(arm, sub, batch)?;
                    if value.ty() != *ty {
                        return Err(EngineError::mismatch(ty, value.ty()));
                    }
                    for (src, dst) in value.lanes().iter().zip(0..) {
                        if let Some(dst) = out.lane_mut(dst) {
                            ops::convert_lane(self.rows(sub), src, dst);
                        }
                    }
                }
                out
            }
            Expr::Swizzle { base, components, ty } => {
                let base = self.eval(base, chain, batch)?;
                ops::swizzle(rows, &base, components, *ty)?
            }
            Expr::Construct { ty, args } => {
                let args = self.eval_all(args, chain, batch)?;
                let refs: Vec<&Register> = args.iter().map(|a| &**a).collect();
                ops::construct(rows, *ty, &refs)?
            }
        };
        Ok(Cow::Owned(register))
    }

    /// Splits `chain` on a scalar bool condition: `(true rows, false rows)`.
    fn split(&self, cond: &Expr, chain: &ActiveChain, batch: &Batch) -> Result<(ActiveChain, ActiveChain), EngineError> {
        let cond = self.eval(cond, chain, batch)?;
        if cond.ty() != ShaderType::Bool {
            return Err(EngineError::mismatch(ShaderType::Bool, cond.ty()));
        }
        Ok(chain.split(cond.bools(0)?))
    }

    fn eval_all<'b>(
        &self,
        exprs: &[Expr],
        chain: &ActiveChain,
        batch: &'b Batch,
    ) -> Result<Vec<Cow<'b, Register>>, EngineError> {
        exprs.iter().map(|e| self.eval(e, chain, batch)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{SamplerState, Texture2D, TextureUnits};
    use lumen_glsl::ShaderType::*;
    use lumen_glsl::{BinaryOp, Stage, Value};
    use std::sync::Arc;

    fn registry() -> &'static BuiltinRegistry {
        BuiltinRegistry::global().unwrap()
    }

    fn interpreter() -> Interpreter<'static> {
        Interpreter::new(registry(), EngineConfig::default()).unwrap()
    }

    fn floats(values: &[f32]) -> Register {
        Register::from_floats(Float, vec![values.to_vec()]).unwrap()
    }

    fn fragment(body: Vec<Stmt>) -> Shader {
        Shader::new(Stage::Fragment, body)
    }

    // ── Assignment ────────────────────────────────────────────────────────

    #[test]
    fn assignment_declares_a_local_and_writes_live_rows() {
        let mut batch = Batch::with_mask(&[true, false, true]).unwrap();
        batch.set_input("x", floats(&[1.0, 2.0, 3.0])).unwrap();
        let shader = fragment(vec![Stmt::assign(
            "y",
            Expr::binary(BinaryOp::Mul, Expr::var("x", Float), Expr::constant(Value::float(10.0)), Float),
        )]);
        interpreter().run(&shader, &mut batch).unwrap();
        assert_eq!(batch.variable("y").unwrap().floats(0).unwrap(), &[10.0, 0.0, 30.0]);
    }

    #[test]
    fn masked_assignment_writes_selected_components() {
        let mut batch = Batch::new(2).unwrap();
        batch.set_uniform("color", &Value::vec4(0.0, 0.0, 0.0, 1.0)).unwrap();
        let shader = fragment(vec![Stmt::assign_masked(
            "color",
            &[2, 0],
            Expr::constant(Value::vec2(0.25, 0.75)),
        )]);
        interpreter().run(&shader, &mut batch).unwrap();
        assert_eq!(batch.value("color", 1).unwrap(), Value::vec4(0.75, 0.0, 0.25, 1.0));
    }

    #[test]
    fn masked_assignment_to_an_unknown_name_fails() {
        let mut batch = Batch::new(1).unwrap();
        let shader = fragment(vec![Stmt::assign_masked("v", &[0], Expr::constant(Value::float(1.0)))]);
        assert!(matches!(
            interpreter().run(&shader, &mut batch),
            Err(EngineError::UnknownVariable(name)) if name == "v"
        ));
    }

    #[test]
    fn out_of_range_write_mask_leaves_the_target_untouched() {
        let mut batch = Batch::new(2).unwrap();
        batch.set_uniform("v", &Value::vec2(5.0, 6.0)).unwrap();
        let shader = fragment(vec![Stmt::assign_masked("v", &[0, 2], Expr::constant(Value::vec2(1.0, 2.0)))]);
        assert!(matches!(interpreter().run(&shader, &mut batch), Err(EngineError::TypeMismatch { .. })));
        assert_eq!(batch.value("v", 0).unwrap(), Value::vec2(5.0, 6.0));
        assert_eq!(batch.value("v", 1).unwrap(), Value::vec2(5.0, 6.0));
    }

    #[test]
    fn assignment_type_must_match_the_target() {
        let mut batch = Batch::new(1).unwrap();
        batch.set_uniform("v", &Value::vec2(0.0, 0.0)).unwrap();
        let shader = fragment(vec![Stmt::assign("v", Expr::constant(Value::float(1.0)))]);
        assert!(matches!(interpreter().run(&shader, &mut batch), Err(EngineError::TypeMismatch { .. })));
    }

    // ── Control flow ──────────────────────────────────────────────────────

    #[test]
    fn if_runs_each_branch_under_its_rows() {
        let mut batch = Batch::new(4).unwrap();
        batch.set_input("x", floats(&[-1.0, 2.0, -3.0, 4.0])).unwrap();
        let positive = Expr::binary(BinaryOp::Greater, Expr::var("x", Float), Expr::constant(Value::float(0.0)), Bool);
        let shader = fragment(vec![Stmt::If {
            cond: positive,
            then: vec![Stmt::assign("y", Expr::call("sqrt", Float, vec![Expr::var("x", Float)]))],
            otherwise: vec![Stmt::assign("z", Expr::call("abs", Float, vec![Expr::var("x", Float)]))],
        }]);
        interpreter().run(&shader, &mut batch).unwrap();
        let y = batch.variable("y").unwrap().floats(0).unwrap();
        assert_eq!(y[1], 2.0f32.sqrt());
        assert_eq!(y[3], 2.0);
        assert_eq!(batch.variable("z").unwrap().floats(0).unwrap(), &[1.0, 0.0, 3.0, 0.0]);
    }

    #[test]
    fn discard_stops_rows_for_the_rest_of_the_shader() {
        let mut batch = Batch::new(4).unwrap();
        batch.set_input("alpha", floats(&[0.0, 0.9, 0.1, 1.0])).unwrap();
        let transparent =
            Expr::binary(BinaryOp::Less, Expr::var("alpha", Float), Expr::constant(Value::float(0.5)), Bool);
        let shader = fragment(vec![
            Stmt::If { cond: transparent, then: vec![Stmt::Discard], otherwise: vec![] },
            Stmt::assign("out", Expr::constant(Value::float(1.0))),
        ]);
        interpreter().run(&shader, &mut batch).unwrap();
        assert_eq!(batch.discarded(), &[true, false, true, false]);
        assert_eq!(batch.variable("out").unwrap().floats(0).unwrap(), &[0.0, 1.0, 0.0, 1.0]);
        assert_eq!(batch.chain().iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn select_evaluates_each_arm_under_its_rows() {
        let mut batch = Batch::new(3).unwrap();
        batch.set_input("x", floats(&[4.0, -1.0, 9.0])).unwrap();
        let expr = Expr::select(
            Expr::binary(BinaryOp::GreaterEqual, Expr::var("x", Float), Expr::constant(Value::float(0.0)), Bool),
            Expr::call("sqrt", Float, vec![Expr::var("x", Float)]),
            Expr::constant(Value::float(-7.0)),
        );
        let out = interpreter().evaluate(&expr, &batch).unwrap();
        assert_eq!(out.floats(0).unwrap(), &[2.0, -7.0, 3.0]);
    }

    // ── Errors ────────────────────────────────────────────────────────────

    #[test]
    fn unknown_variable_is_reported() {
        let batch = Batch::new(1).unwrap();
        let err = interpreter().evaluate(&Expr::var("nope", Float), &batch).unwrap_err();
        assert_eq!(err.to_string(), "unknown variable `nope`");
    }

    #[test]
    fn unknown_overload_is_reported() {
        let batch = Batch::new(1).unwrap();
        let call = Expr::call("pow", Vec3, vec![
            Expr::constant(Value::vec3(1.0, 2.0, 3.0)),
            Expr::constant(Value::float(2.0)),
        ]);
        assert!(matches!(interpreter().evaluate(&call, &batch), Err(EngineError::UnknownBuiltin { .. })));
    }

    #[test]
    fn batch_larger_than_configured_is_rejected() {
        let config = EngineConfig { batch_rows: 8, ..EngineConfig::default() };
        let interp = Interpreter::new(registry(), config).unwrap();
        let mut batch = Batch::new(16).unwrap();
        assert!(matches!(
            interp.run(&fragment(vec![]), &mut batch),
            Err(EngineError::BatchTooLarge { rows: 16, max: 8 })
        ));
    }

    // ── Textures ──────────────────────────────────────────────────────────

    #[test]
    fn texture_lookup_reads_bound_units() {
        let mut units = TextureUnits::new();
        let tex = Texture2D::from_fn(2, 1, SamplerState::default(), |x, _| [x as f32, 1.0, 0.0, 1.0]).unwrap();
        units.bind_2d(0, tex);
        let mut batch = Batch::new(2).unwrap().with_textures(Arc::new(units));
        batch.set_uniform("tex", &Value::sampler(Sampler2D, 0).unwrap()).unwrap();
        batch
            .set_input("uv", Register::from_floats(Vec2, vec![vec![0.25, 0.75], vec![0.5, 0.5]]).unwrap())
            .unwrap();
        let shader = fragment(vec![Stmt::assign(
            "frag",
            Expr::call("texture2D", Vec4, vec![Expr::var("tex", Sampler2D), Expr::var("uv", Vec2)]),
        )]);
        interpreter().run(&shader, &mut batch).unwrap();
        assert_eq!(batch.value("frag", 1).unwrap(), Value::vec4(1.0, 1.0, 0.0, 1.0));
    }
}
