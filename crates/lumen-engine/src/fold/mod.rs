//! Compile-time constant folding.
//!
//! Builtin calls on constant arguments are replaced by the result of the
//! overload's constant slot. Operators, constructors and swizzles on constants
//! run through the interpreter on a single row, so both sides of the fold
//! share the same scalar operators.

use lumen_glsl::{Expr, Shader, Stmt};

use crate::builtins::BuiltinRegistry;
use crate::error::EngineError;
use crate::interp::{Batch, Interpreter};

pub struct ConstantFolder<'r> {
    registry: &'r BuiltinRegistry,
}

impl<'r> ConstantFolder<'r> {
    pub fn new(registry: &'r BuiltinRegistry) -> Self {
        Self { registry }
    }

    pub fn fold_shader(&self, shader: &Shader) -> Result<Shader, EngineError> {
        Ok(Shader::new(shader.stage, self.fold_block(&shader.body)?))
    }

    /// Folds every statement; an `if` on a constant condition is replaced by
    /// the branch it takes.
    pub fn fold_block(&self, stmts: &[Stmt]) -> Result<Vec<Stmt>, EngineError> {
        let mut out = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            if let Stmt::If { cond, then, otherwise } = stmt {
                let cond = self.fold_expr(cond)?;
                if let Some(taken) = cond.as_const().and_then(|v| v.as_bools()).and_then(|b| b.first()) {
                    out.extend(self.fold_block(if *taken { then } else { otherwise })?);
                    continue;
                }
                out.push(Stmt::If { cond, then: self.fold_block(then)?, otherwise: self.fold_block(otherwise)? });
                continue;
            }
            out.push(self.fold_stmt(stmt)?);
        }
        Ok(out)
    }

    pub fn fold_stmt(&self, stmt: &Stmt) -> Result<Stmt, EngineError> {
        Ok(match stmt {
            Stmt::Assign { target, write_mask, expr } => Stmt::Assign {
                target: target.clone(),
                write_mask: write_mask.clone(),
                expr: self.fold_expr(expr)?,
            },
            Stmt::If { cond, then, otherwise } => Stmt::If {
                cond: self.fold_expr(cond)?,
                then: self.fold_block(then)?,
                otherwise: self.fold_block(otherwise)?,
            },
            Stmt::Discard => Stmt::Discard,
        })
    }

    /// Rewrites `expr` bottom-up.
    ///
    /// Calls whose overload has no compile-time form stay in place; calls to
    /// an overload marked not implemented fail with `Unimplemented`.
    pub fn fold_expr(&self, expr: &Expr) -> Result<Expr, EngineError> {
        let folded = match expr {
            Expr::Const(_) | Expr::Var { .. } => return Ok(expr.clone()),
            Expr::Call { name, args, ty } => {
                let args = self.fold_all(args)?;
                let Some(values) = args.iter().map(|a| a.as_const().cloned()).collect::<Option<Vec<_>>>() else {
                    return Ok(Expr::Call { name: name.clone(), args, ty: *ty });
                };
                let params: Vec<_> = values.iter().map(|v| v.ty()).collect();
                let entry = self.registry.lookup(name, &params)?;
                return Ok(match entry.evaluate(&values)? {
                    Some(value) => {
                        log::trace!("folded `{}` to {value}", entry.signature());
                        Expr::Const(value)
                    }
                    None => Expr::Call { name: name.clone(), args, ty: *ty },
                });
            }
            Expr::Unary { op, operand, ty } => Expr::unary(*op, self.fold_expr(operand)?, *ty),
            Expr::Binary { op, lhs, rhs, ty } => Expr::binary(*op, self.fold_expr(lhs)?, self.fold_expr(rhs)?, *ty),
            Expr::Select { cond, then, otherwise, ty } => {
                let cond = self.fold_expr(cond)?;
                if let Some(&taken) = cond.as_const().and_then(|v| v.as_bools()).and_then(|b| b.first()) {
                    return self.fold_expr(if taken { then } else { otherwise });
                }
                Expr::Select {
                    cond: Box::new(cond),
                    then: Box::new(self.fold_expr(then)?),
                    otherwise: Box::new(self.fold_expr(otherwise)?),
                    ty: *ty,
                }
            }
            Expr::Swizzle { base, components, ty } => Expr::swizzle(self.fold_expr(base)?, components, *ty),
            Expr::Construct { ty, args } => Expr::construct(*ty, self.fold_all(args)?),
        };

        if operands_constant(&folded) { self.reduce(&folded) } else { Ok(folded) }
    }

    fn fold_all(&self, exprs: &[Expr]) -> Result<Vec<Expr>, EngineError> {
        exprs.iter().map(|e| self.fold_expr(e)).collect()
    }

    /// Evaluates an operator node with constant operands on one row.
    fn reduce(&self, expr: &Expr) -> Result<Expr, EngineError> {
        let batch = Batch::new(1)?;
        let register = Interpreter::constant(self.registry).evaluate(expr, &batch)?;
        register
            .row_value(0)
            .map(Expr::Const)
            .ok_or_else(|| EngineError::mismatch(expr.ty(), "a value-less register"))
    }
}

fn operands_constant(expr: &Expr) -> bool {
    let is_const = |e: &Expr| e.as_const().is_some();
    match expr {
        Expr::Unary { operand, .. } => is_const(operand),
        Expr::Binary { lhs, rhs, .. } => is_const(lhs) && is_const(rhs),
        Expr::Swizzle { base, .. } => is_const(base),
        Expr::Construct { args, .. } => !args.is_empty() && args.iter().all(is_const),
        _ => false,
    }
}
