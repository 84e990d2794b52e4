//! Operators, lane conversion and constructors over registers.

use lumen_glsl::{BinaryOp, ScalarKind, ShaderType, UnaryOp};

use crate::builtins::componentwise::{Element, source};
use crate::builtins::scalar::dot_step;
use crate::chain::ActiveChain;
use crate::column::{Lane, Register};
use crate::error::EngineError;
use crate::exec::{VectorPaths, execute1, execute2, update2};

/// Chain and path policy of the statement being executed.
#[derive(Clone, Copy)]
pub(crate) struct Rows<'c> {
    pub chain: &'c ActiveChain,
    pub paths: VectorPaths,
}

/// `out[i] = op(l[i], r[i])` per result component, broadcasting scalars.
fn zip<A, B, R>(
    rows: Rows<'_>,
    l: &Register,
    r: &Register,
    out: &mut Register,
    op: impl Fn(A, B) -> R + Copy,
) -> Result<(), EngineError>
where
    A: Element,
    B: Element,
    R: Element,
{
    for i in 0..out.ty().components() {
        let a = A::lane(l, source(l.ty().components(), i))?;
        let b = B::lane(r, source(r.ty().components(), i))?;
        execute2(rows.chain, rows.paths, a, b, R::lane_mut(out, i)?, op);
    }
    Ok(())
}

/// Folds `op(acc, l[i], r[i])` over all components into a scalar bool,
/// seeded with `first(l[0], r[0])`.
fn aggregate<T: Element>(
    rows: Rows<'_>,
    l: &Register,
    r: &Register,
    out: &mut Register,
    first: fn(T, T) -> bool,
    op: fn(bool, T, T) -> bool,
) -> Result<(), EngineError> {
    let acc = out.bools_mut(0)?;
    execute2(rows.chain, rows.paths, T::lane(l, 0)?, T::lane(r, 0)?, acc, first);
    for i in 1..l.ty().components() {
        update2(rows.chain, rows.paths, acc, T::lane(l, i)?, T::lane(r, i)?, op);
    }
    Ok(())
}

fn equality<T: Element + PartialEq>(
    rows: Rows<'_>,
    equal: bool,
    l: &Register,
    r: &Register,
    out: &mut Register,
) -> Result<(), EngineError> {
    if equal {
        aggregate::<T>(rows, l, r, out, |x, y| x == y, |acc, x, y| acc && x == y)
    } else {
        aggregate::<T>(rows, l, r, out, |x, y| x != y, |acc, x, y| acc || x != y)
    }
}

// ── Unary ─────────────────────────────────────────────────────────────────

pub(crate) fn unary(
    rows: Rows<'_>,
    op: UnaryOp,
    operand: &Register,
    ty: ShaderType,
) -> Result<Register, EngineError> {
    let mut out = Register::zeroed(ty, rows.chain.rows());
    if operand.ty() != ty {
        return Err(EngineError::mismatch(ty, operand.ty()));
    }
    for i in 0..ty.components() {
        match (op, operand.lane(i), out.lane_mut(i)) {
            (UnaryOp::Neg, Some(Lane::Float(src)), Some(Lane::Float(dst))) => {
                execute1(rows.chain, rows.paths, src.as_slice(), dst.as_mut_slice(), |x: f32| -x)
            }
            (UnaryOp::Neg, Some(Lane::Int(src)), Some(Lane::Int(dst))) => {
                execute1(rows.chain, rows.paths, src.as_slice(), dst.as_mut_slice(), i32::wrapping_neg)
            }
            (UnaryOp::Not, Some(Lane::Bool(src)), Some(Lane::Bool(dst))) => {
                execute1(rows.chain, rows.paths, src.as_slice(), dst.as_mut_slice(), |x: bool| !x)
            }
            _ => return Err(EngineError::mismatch(format!("operand of unary {op:?}"), ty)),
        }
    }
    Ok(out)
}

// ── Binary ────────────────────────────────────────────────────────────────

pub(crate) fn binary(
    rows: Rows<'_>,
    op: BinaryOp,
    l: &Register,
    r: &Register,
    ty: ShaderType,
) -> Result<Register, EngineError> {
    use BinaryOp::*;

    let mut out = Register::zeroed(ty, rows.chain.rows());
    let kind = l.ty().kind();
    if kind != r.ty().kind() {
        return Err(EngineError::mismatch(l.ty(), r.ty()));
    }

    if op == Mul && (l.ty().is_matrix() || r.ty().is_matrix()) && !l.ty().is_scalar() && !r.ty().is_scalar() {
        linear_product(rows, l, r, &mut out)?;
        return Ok(out);
    }

    match (op, kind) {
        (Add, Some(ScalarKind::Float)) => zip(rows, l, r, &mut out, |x: f32, y: f32| x + y)?,
        (Sub, Some(ScalarKind::Float)) => zip(rows, l, r, &mut out, |x: f32, y: f32| x - y)?,
        (Mul, Some(ScalarKind::Float)) => zip(rows, l, r, &mut out, |x: f32, y: f32| x * y)?,
        (Div, Some(ScalarKind::Float)) => zip(rows, l, r, &mut out, |x: f32, y: f32| x / y)?,
        (Add, Some(ScalarKind::Int)) => zip(rows, l, r, &mut out, i32::wrapping_add)?,
        (Sub, Some(ScalarKind::Int)) => zip(rows, l, r, &mut out, i32::wrapping_sub)?,
        (Mul, Some(ScalarKind::Int)) => zip(rows, l, r, &mut out, i32::wrapping_mul)?,
        // integer division by zero is undefined in GLSL; it yields 0 here
        (Div, Some(ScalarKind::Int)) => {
            zip(rows, l, r, &mut out, |x: i32, y: i32| if y == 0 { 0 } else { x.wrapping_div(y) })?
        }
        (Less, Some(ScalarKind::Float)) => zip(rows, l, r, &mut out, |x: f32, y: f32| x < y)?,
        (LessEqual, Some(ScalarKind::Float)) => zip(rows, l, r, &mut out, |x: f32, y: f32| x <= y)?,
        (Greater, Some(ScalarKind::Float)) => zip(rows, l, r, &mut out, |x: f32, y: f32| x > y)?,
        (GreaterEqual, Some(ScalarKind::Float)) => zip(rows, l, r, &mut out, |x: f32, y: f32| x >= y)?,
        (Less, Some(ScalarKind::Int)) => zip(rows, l, r, &mut out, |x: i32, y: i32| x < y)?,
        (LessEqual, Some(ScalarKind::Int)) => zip(rows, l, r, &mut out, |x: i32, y: i32| x <= y)?,
        (Greater, Some(ScalarKind::Int)) => zip(rows, l, r, &mut out, |x: i32, y: i32| x > y)?,
        (GreaterEqual, Some(ScalarKind::Int)) => zip(rows, l, r, &mut out, |x: i32, y: i32| x >= y)?,
        (Equal | NotEqual, Some(k)) => {
            if l.ty() != r.ty() {
                return Err(EngineError::mismatch(l.ty(), r.ty()));
            }
            let eq = op == Equal;
            match k {
                ScalarKind::Float => equality::<f32>(rows, eq, l, r, &mut out)?,
                ScalarKind::Int => equality::<i32>(rows, eq, l, r, &mut out)?,
                ScalarKind::Bool => equality::<bool>(rows, eq, l, r, &mut out)?,
            }
        }
        (And, Some(ScalarKind::Bool)) => zip(rows, l, r, &mut out, |x: bool, y: bool| x && y)?,
        (Or, Some(ScalarKind::Bool)) => zip(rows, l, r, &mut out, |x: bool, y: bool| x || y)?,
        (Xor, Some(ScalarKind::Bool)) => zip(rows, l, r, &mut out, |x: bool, y: bool| x != y)?,
        _ => {
            return Err(EngineError::mismatch(
                format!("operands for `{}`", op.symbol()),
                format!("{} and {}", l.ty(), r.ty()),
            ));
        }
    }
    Ok(out)
}

/// Matrix × matrix, matrix × vector, vector × matrix; matrices are
/// column-major, lane `c * n + r` holds column `c`, row `r`.
fn linear_product(rows: Rows<'_>, l: &Register, r: &Register, out: &mut Register) -> Result<(), EngineError> {
    let (lt, rt) = (l.ty(), r.ty());
    let n = if lt.is_matrix() { lt.matrix_dim() } else { rt.matrix_dim() };
    let fits = |t: ShaderType| if t.is_matrix() { t.matrix_dim() == n } else { t.components() == n };
    if !fits(lt) || !fits(rt) {
        return Err(EngineError::mismatch(format!("operands of dimension {n}"), format!("{lt} * {rt}")));
    }

    // (out lane, [(l lane, r lane); n])
    let mut terms: Vec<(usize, Vec<(usize, usize)>)> = Vec::new();
    match (lt.is_matrix(), rt.is_matrix()) {
        (true, true) => {
            for c in 0..n {
                for row in 0..n {
                    terms.push((c * n + row, (0..n).map(|k| (k * n + row, c * n + k)).collect()));
                }
            }
        }
        (true, false) => {
            for row in 0..n {
                terms.push((row, (0..n).map(|k| (k * n + row, k)).collect()));
            }
        }
        _ => {
            for c in 0..n {
                terms.push((c, (0..n).map(|k| (k, c * n + k)).collect()));
            }
        }
    }

    // `out` is freshly zeroed, so accumulation starts from 0 on every row.
    for (dst, pairs) in terms {
        let acc = out.floats_mut(dst)?;
        for (a, b) in pairs {
            update2(rows.chain, rows.paths, acc, l.floats(a)?, r.floats(b)?, dot_step);
        }
    }
    Ok(())
}

// ── Lane conversion ───────────────────────────────────────────────────────

/// Copies `src` into `dst` on the live rows, converting between kinds with
/// GLSL constructor rules.
pub(crate) fn convert_lane(rows: Rows<'_>, src: &Lane, dst: &mut Lane) {
    let (chain, paths) = (rows.chain, rows.paths);
    match (src, dst) {
        (Lane::Float(s), Lane::Float(d)) => execute1(chain, paths, s.as_slice(), d.as_mut_slice(), |x: f32| x),
        (Lane::Int(s), Lane::Int(d)) => execute1(chain, paths, s.as_slice(), d.as_mut_slice(), |x: i32| x),
        (Lane::Bool(s), Lane::Bool(d)) => execute1(chain, paths, s.as_slice(), d.as_mut_slice(), |x: bool| x),
        (Lane::Int(s), Lane::Float(d)) => execute1(chain, paths, s.as_slice(), d.as_mut_slice(), |x: i32| x as f32),
        (Lane::Bool(s), Lane::Float(d)) => {
            execute1(chain, paths, s.as_slice(), d.as_mut_slice(), |x: bool| if x { 1.0 } else { 0.0 })
        }
        // truncates toward zero; NaN becomes 0 and out-of-range values saturate
        (Lane::Float(s), Lane::Int(d)) => execute1(chain, paths, s.as_slice(), d.as_mut_slice(), |x: f32| x as i32),
        (Lane::Bool(s), Lane::Int(d)) => execute1(chain, paths, s.as_slice(), d.as_mut_slice(), |x: bool| x as i32),
        (Lane::Float(s), Lane::Bool(d)) => execute1(chain, paths, s.as_slice(), d.as_mut_slice(), |x: f32| x != 0.0),
        (Lane::Int(s), Lane::Bool(d)) => execute1(chain, paths, s.as_slice(), d.as_mut_slice(), |x: i32| x != 0),
    }
}

/// Writes `1` (or `true`) into `dst` on the live rows.
fn fill_one(rows: Rows<'_>, dst: &mut Lane) {
    let (chain, paths) = (rows.chain, rows.paths);
    let dummy = vec![0u8; chain.rows()];
    match dst {
        Lane::Float(d) => execute1(chain, paths, &dummy[..], d.as_mut_slice(), |_| 1.0f32),
        Lane::Int(d) => execute1(chain, paths, &dummy[..], d.as_mut_slice(), |_| 1i32),
        Lane::Bool(d) => execute1(chain, paths, &dummy[..], d.as_mut_slice(), |_| true),
    }
}

pub(crate) fn swizzle(
    rows: Rows<'_>,
    base: &Register,
    components: &[u8],
    ty: ShaderType,
) -> Result<Register, EngineError> {
    let mut out = Register::zeroed(ty, rows.chain.rows());
    if components.len() != ty.components() || ty.kind() != base.ty().kind() {
        return Err(EngineError::mismatch(ty, format!("{} swizzle of {}", components.len(), base.ty())));
    }
    for (i, &c) in components.iter().enumerate() {
        let src = base
            .lane(c as usize)
            .ok_or_else(|| EngineError::mismatch(format!("component {c}"), base.ty()))?;
        if let Some(dst) = out.lane_mut(i) {
            convert_lane(rows, src, dst);
        }
    }
    Ok(out)
}

/// GLSL constructor: scalar splat, matrix diagonal, matrix from matrix, or
/// component concatenation, converting component kinds as needed.
pub(crate) fn construct(rows: Rows<'_>, ty: ShaderType, args: &[&Register]) -> Result<Register, EngineError> {
    let mut out = Register::zeroed(ty, rows.chain.rows());
    let n = ty.components();

    match args {
        [arg] if arg.ty().is_scalar() => {
            let src = arg.lane(0).ok_or_else(|| EngineError::mismatch("scalar", arg.ty()))?;
            if ty.is_matrix() {
                let dim = ty.matrix_dim();
                for d in 0..dim {
                    if let Some(dst) = out.lane_mut(d * dim + d) {
                        convert_lane(rows, src, dst);
                    }
                }
            } else {
                for i in 0..n {
                    if let Some(dst) = out.lane_mut(i) {
                        convert_lane(rows, src, dst);
                    }
                }
            }
        }
        [arg] if arg.ty().is_matrix() && ty.is_matrix() => {
            let (dim, m) = (ty.matrix_dim(), arg.ty().matrix_dim());
            for c in 0..dim {
                for r in 0..dim {
                    let Some(dst) = out.lane_mut(c * dim + r) else { continue };
                    if c < m && r < m {
                        if let Some(src) = arg.lane(c * m + r) {
                            convert_lane(rows, src, dst);
                        }
                    } else if c == r {
                        fill_one(rows, dst);
                    }
                }
            }
        }
        _ => {
            let sources: Vec<&Lane> = args.iter().flat_map(|a| a.lanes()).take(n).collect();
            if sources.len() < n {
                return Err(EngineError::mismatch(
                    format!("{n} components for {ty}"),
                    format!("{} components", sources.len()),
                ));
            }
            for (i, src) in sources.into_iter().enumerate() {
                if let Some(dst) = out.lane_mut(i) {
                    convert_lane(rows, src, dst);
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_glsl::ShaderType::*;
    use lumen_glsl::Value;

    fn with_rows<T>(n: usize, f: impl FnOnce(Rows<'_>) -> T) -> T {
        let chain = ActiveChain::full(n).unwrap();
        f(Rows { chain: &chain, paths: VectorPaths::Wide8 })
    }

    fn splat(v: Value) -> Register {
        Register::splat(&v, 2)
    }

    fn mat2(cols: [f32; 4]) -> Register {
        splat(Value::floats(Mat2, cols.to_vec()).unwrap())
    }

    // ── Arithmetic ────────────────────────────────────────────────────────

    #[test]
    fn vector_scalar_arithmetic_broadcasts() {
        let out = with_rows(2, |rows| {
            binary(rows, BinaryOp::Mul, &splat(Value::vec2(1.0, -2.0)), &splat(Value::float(3.0)), Vec2)
        })
        .unwrap();
        assert_eq!(out.row_value(1).unwrap(), Value::vec2(3.0, -6.0));
    }

    #[test]
    fn int_division_by_zero_yields_zero() {
        let out = with_rows(2, |rows| {
            binary(rows, BinaryOp::Div, &splat(Value::int(7)), &splat(Value::int(0)), Int)
        })
        .unwrap();
        assert_eq!(out.row_value(0).unwrap(), Value::int(0));
    }

    #[test]
    fn int_overflow_wraps() {
        let out = with_rows(2, |rows| {
            binary(rows, BinaryOp::Add, &splat(Value::int(i32::MAX)), &splat(Value::int(1)), Int)
        })
        .unwrap();
        assert_eq!(out.row_value(0).unwrap(), Value::int(i32::MIN));
    }

    #[test]
    fn equality_aggregates_to_one_bool() {
        let a = splat(Value::vec3(1.0, 2.0, 3.0));
        let b = splat(Value::vec3(1.0, 2.0, 4.0));
        let eq = with_rows(2, |rows| binary(rows, BinaryOp::Equal, &a, &b, Bool)).unwrap();
        let ne = with_rows(2, |rows| binary(rows, BinaryOp::NotEqual, &a, &b, Bool)).unwrap();
        assert_eq!(eq.row_value(0).unwrap(), Value::boolean(false));
        assert_eq!(ne.row_value(0).unwrap(), Value::boolean(true));
    }

    #[test]
    fn mismatched_kinds_are_rejected() {
        let r = with_rows(2, |rows| binary(rows, BinaryOp::Add, &splat(Value::int(1)), &splat(Value::float(1.0)), Int));
        assert!(matches!(r, Err(EngineError::TypeMismatch { .. })));
    }

    // ── Linear algebra ────────────────────────────────────────────────────

    #[test]
    fn matrix_times_vector_is_column_major() {
        // columns (1, 2) and (3, 4): [[1, 3], [2, 4]] in row form
        let m = mat2([1.0, 2.0, 3.0, 4.0]);
        let v = splat(Value::vec2(1.0, 1.0));
        let mv = with_rows(2, |rows| binary(rows, BinaryOp::Mul, &m, &v, Vec2)).unwrap();
        assert_eq!(mv.row_value(0).unwrap(), Value::vec2(4.0, 6.0));
        let vm = with_rows(2, |rows| binary(rows, BinaryOp::Mul, &v, &m, Vec2)).unwrap();
        assert_eq!(vm.row_value(0).unwrap(), Value::vec2(3.0, 7.0));
    }

    #[test]
    fn mismatched_matrix_dimensions_are_rejected() {
        let a = mat2([1.0, 2.0, 3.0, 4.0]);
        let b = splat(Value::floats(Mat3, vec![1.0; 9]).unwrap());
        let r = with_rows(2, |rows| binary(rows, BinaryOp::Mul, &a, &b, Mat2));
        assert!(matches!(r, Err(EngineError::TypeMismatch { .. })));
        let v = splat(Value::vec3(1.0, 1.0, 1.0));
        assert!(with_rows(2, |rows| binary(rows, BinaryOp::Mul, &a, &v, Vec2)).is_err());
    }

    #[test]
    fn matrix_product() {
        let a = mat2([1.0, 2.0, 3.0, 4.0]);
        let identity = mat2([1.0, 0.0, 0.0, 1.0]);
        let p = with_rows(2, |rows| binary(rows, BinaryOp::Mul, &a, &identity, Mat2)).unwrap();
        assert_eq!(p.row_value(1).unwrap(), Value::floats(Mat2, vec![1.0, 2.0, 3.0, 4.0]).unwrap());
        let scaled = with_rows(2, |rows| binary(rows, BinaryOp::Mul, &a, &splat(Value::float(2.0)), Mat2)).unwrap();
        assert_eq!(scaled.row_value(0).unwrap(), Value::floats(Mat2, vec![2.0, 4.0, 6.0, 8.0]).unwrap());
    }

    // ── Constructors ──────────────────────────────────────────────────────

    #[test]
    fn scalar_constructor_splats_and_converts() {
        let i = splat(Value::int(3));
        let v = with_rows(2, |rows| construct(rows, Vec3, &[&i])).unwrap();
        assert_eq!(v.row_value(0).unwrap(), Value::vec3(3.0, 3.0, 3.0));
    }

    #[test]
    fn scalar_matrix_constructor_fills_the_diagonal() {
        let s = splat(Value::float(2.0));
        let m = with_rows(2, |rows| construct(rows, Mat2, &[&s])).unwrap();
        assert_eq!(m.row_value(0).unwrap(), Value::floats(Mat2, vec![2.0, 0.0, 0.0, 2.0]).unwrap());
    }

    #[test]
    fn matrix_from_smaller_matrix_pads_with_identity() {
        let a = mat2([1.0, 2.0, 3.0, 4.0]);
        let m = with_rows(2, |rows| construct(rows, Mat3, &[&a])).unwrap();
        assert_eq!(
            m.row_value(0).unwrap(),
            Value::floats(Mat3, vec![1.0, 2.0, 0.0, 3.0, 4.0, 0.0, 0.0, 0.0, 1.0]).unwrap()
        );
    }

    #[test]
    fn concatenation_takes_leading_components() {
        let xy = splat(Value::vec2(1.0, 2.0));
        let zw = splat(Value::vec3(3.0, 4.0, 5.0));
        let v = with_rows(2, |rows| construct(rows, Vec4, &[&xy, &zw])).unwrap();
        assert_eq!(v.row_value(0).unwrap(), Value::vec4(1.0, 2.0, 3.0, 4.0));
        let short = with_rows(2, |rows| construct(rows, Vec4, &[&xy]));
        assert!(short.is_err());
    }

    #[test]
    fn bool_conversion() {
        let f = splat(Value::float(-0.5));
        let b = with_rows(2, |rows| construct(rows, Bool, &[&f])).unwrap();
        assert_eq!(b.row_value(0).unwrap(), Value::boolean(true));
        let i = with_rows(2, |rows| construct(rows, Int, &[&splat(Value::float(-2.7))])).unwrap();
        assert_eq!(i.row_value(0).unwrap(), Value::int(-2));
    }

    #[test]
    fn swizzle_reorders_and_repeats() {
        let v = splat(Value::vec3(1.0, 2.0, 3.0));
        let s = with_rows(2, |rows| swizzle(rows, &v, &[2, 0, 0], Vec3)).unwrap();
        assert_eq!(s.row_value(0).unwrap(), Value::vec3(3.0, 1.0, 1.0));
        assert!(with_rows(2, |rows| swizzle(rows, &v, &[3], Float)).is_err());
    }
}
