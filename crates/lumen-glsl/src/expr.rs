use crate::types::ShaderType;
use crate::value::Value;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UnaryOp {
    /// Arithmetic negation (`-x`), component-wise.
    Neg,
    /// Logical not (`!b`) on a scalar bool.
    Not,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    /// Component-wise, except matrix × vector / vector × matrix / matrix × matrix,
    /// which are linear-algebra products.
    Mul,
    Div,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    /// Aggregate equality; yields a scalar bool.
    Equal,
    NotEqual,
    And,
    Or,
    Xor,
}

impl BinaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Xor => "^^",
        }
    }
}

/// A type-resolved shading-language expression.
///
/// Every node carries the type the front end's type checker assigned to it;
/// the engine trusts those types and performs no overload resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(Value),
    Var {
        name: String,
        ty: ShaderType,
    },
    /// A builtin call, resolved against the registry by `(name, arg types)`.
    Call {
        name: String,
        args: Vec<Expr>,
        ty: ShaderType,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        ty: ShaderType,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        ty: ShaderType,
    },
    /// `cond ? then : otherwise`
    Select {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
        ty: ShaderType,
    },
    /// Component selection; indices are 0..=3 (`xyzw`).
    Swizzle {
        base: Box<Expr>,
        components: Vec<u8>,
        ty: ShaderType,
    },
    /// A constructor such as `vec4(v.xyz, 1.0)` or `mat3(2.0)`.
    Construct {
        ty: ShaderType,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn ty(&self) -> ShaderType {
        match self {
            Expr::Const(v) => v.ty(),
            Expr::Var { ty, .. }
            | Expr::Call { ty, .. }
            | Expr::Unary { ty, .. }
            | Expr::Binary { ty, .. }
            | Expr::Select { ty, .. }
            | Expr::Swizzle { ty, .. }
            | Expr::Construct { ty, .. } => *ty,
        }
    }

    pub fn as_const(&self) -> Option<&Value> {
        match self {
            Expr::Const(v) => Some(v),
            _ => None,
        }
    }

    // ── Builders ──────────────────────────────────────────────────────────

    pub fn constant(value: Value) -> Self {
        Expr::Const(value)
    }

    pub fn var(name: impl Into<String>, ty: ShaderType) -> Self {
        Expr::Var { name: name.into(), ty }
    }

    pub fn call(name: impl Into<String>, ty: ShaderType, args: Vec<Expr>) -> Self {
        Expr::Call { name: name.into(), args, ty }
    }

    pub fn unary(op: UnaryOp, operand: Expr, ty: ShaderType) -> Self {
        Expr::Unary { op, operand: Box::new(operand), ty }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr, ty: ShaderType) -> Self {
        Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs), ty }
    }

    pub fn select(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        let ty = then.ty();
        Expr::Select {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
            ty,
        }
    }

    pub fn swizzle(base: Expr, components: &[u8], ty: ShaderType) -> Self {
        Expr::Swizzle { base: Box::new(base), components: components.to_vec(), ty }
    }

    pub fn construct(ty: ShaderType, args: Vec<Expr>) -> Self {
        Expr::Construct { ty, args }
    }
}

/// A statement of a shader body.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Assigns `expr` to `target`. With a write mask, component `i` of `expr`
    /// lands in component `write_mask[i]` of `target`. Assigning to an unknown
    /// name without a mask declares a local of `expr`'s type.
    Assign {
        target: String,
        write_mask: Option<Vec<u8>>,
        expr: Expr,
    },
    If {
        cond: Expr,
        then: Vec<Stmt>,
        otherwise: Vec<Stmt>,
    },
    /// Fragment-stage `discard`: the live invocations stop and are flagged.
    Discard,
}

impl Stmt {
    pub fn assign(target: impl Into<String>, expr: Expr) -> Self {
        Stmt::Assign { target: target.into(), write_mask: None, expr }
    }

    pub fn assign_masked(target: impl Into<String>, mask: &[u8], expr: Expr) -> Self {
        Stmt::Assign { target: target.into(), write_mask: Some(mask.to_vec()), expr }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

/// A resolved shader: the statements of `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct Shader {
    pub stage: Stage,
    pub body: Vec<Stmt>,
}

impl Shader {
    pub fn new(stage: Stage, body: Vec<Stmt>) -> Self {
        Self { stage, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_types_come_from_the_front_end() {
        let e = Expr::binary(
            BinaryOp::Mul,
            Expr::var("m", ShaderType::Mat4),
            Expr::var("p", ShaderType::Vec4),
            ShaderType::Vec4,
        );
        assert_eq!(e.ty(), ShaderType::Vec4);
        assert!(e.as_const().is_none());
    }

    #[test]
    fn select_takes_the_arm_type() {
        let e = Expr::select(
            Expr::constant(Value::boolean(true)),
            Expr::constant(Value::vec2(1.0, 2.0)),
            Expr::constant(Value::vec2(3.0, 4.0)),
        );
        assert_eq!(e.ty(), ShaderType::Vec2);
    }
}
