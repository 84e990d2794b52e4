//! Geometric builtins: products and norms that combine components.

use lumen_glsl::{ShaderType, Signature};

use super::componentwise::{Element, arity, implementation};
use super::{Implementation, Invocation, scalar};
use crate::column::Register;
use crate::error::EngineError;
use crate::exec::{execute1, execute2, execute4, update2};

/// Accumulates `step` over the component pairs of `x` and `y` into `acc`,
/// starting from zero. `finish` is folded into the last step.
fn accumulate(
    inv: &Invocation<'_>,
    x: &Register,
    y: &Register,
    acc: &mut [f32],
    step: fn(f32, f32, f32) -> f32,
    finish: fn(f32) -> f32,
) -> Result<(), EngineError> {
    let n = x.ty().components();
    execute1(inv.chain(), inv.paths(), x.floats(0)?, acc, |_| 0.0f32);
    for i in 0..n {
        let (a, b) = (x.floats(i)?, y.floats(i)?);
        if i + 1 == n {
            update2(inv.chain(), inv.paths(), acc, a, b, |r, a, b| finish(step(r, a, b)));
        } else {
            update2(inv.chain(), inv.paths(), acc, a, b, step);
        }
    }
    Ok(())
}

fn fold(x: &[f32], y: &[f32], step: fn(f32, f32, f32) -> f32, finish: fn(f32) -> f32) -> f32 {
    finish(x.iter().zip(y).fold(0.0, |acc, (&a, &b)| step(acc, a, b)))
}

fn identity(x: f32) -> f32 {
    x
}

/// `dot`, `length`, `distance`: float result from two same-sized operands.
/// `length` passes its single argument as both operands.
fn norm(
    step: fn(f32, f32, f32) -> f32,
    finish: fn(f32) -> f32,
) -> impl Fn(&Signature) -> Implementation {
    move |sig| {
        let ret = sig.ret;
        let unary = sig.params.len() == 1;
        implementation(
            move |inv, args, out| {
                let (x, y) = match args {
                    [x] if unary => (*x, *x),
                    [x, y] if !unary => (*x, *y),
                    _ => return Err(arity(if unary { 1 } else { 2 }, args.len())),
                };
                accumulate(inv, x, y, out.floats_mut(0)?, step, finish)
            },
            move |args| {
                let (x, y) = match args {
                    [x] if unary => (x, x),
                    [x, y] if !unary => (x, y),
                    _ => return Err(arity(if unary { 1 } else { 2 }, args.len())),
                };
                f32::pack(ret, vec![fold(f32::of(x)?, f32::of(y)?, step, finish)])
            },
        )
    }
}

pub(crate) fn dot() -> impl Fn(&Signature) -> Implementation {
    norm(scalar::dot_step, identity)
}

pub(crate) fn length() -> impl Fn(&Signature) -> Implementation {
    norm(scalar::dot_step, f32::sqrt)
}

pub(crate) fn distance() -> impl Fn(&Signature) -> Implementation {
    norm(scalar::distance_step, f32::sqrt)
}

/// `normalize(x) = x / length(x)`.
pub(crate) fn normalize() -> impl Fn(&Signature) -> Implementation {
    |sig: &Signature| {
        let ret = sig.ret;
        implementation(
            move |inv, args, out| {
                let [x] = args else { return Err(arity(1, args.len())) };
                let mut len = vec![0.0f32; x.rows()];
                accumulate(inv, x, x, &mut len, scalar::dot_step, f32::sqrt)?;
                for i in 0..ret.components() {
                    execute2(inv.chain(), inv.paths(), x.floats(i)?, &len[..], out.floats_mut(i)?, |a, l| a / l);
                }
                Ok(())
            },
            move |args| {
                let [x] = args else { return Err(arity(1, args.len())) };
                let x = f32::of(x)?;
                let len = fold(x, x, scalar::dot_step, f32::sqrt);
                f32::pack(ret, x.iter().map(|&a| a / len).collect())
            },
        )
    }
}

/// Lanes `(j, k)` feeding result component `i` of `cross`.
const CROSS: [(usize, usize); 3] = [(1, 2), (2, 0), (0, 1)];

pub(crate) fn cross() -> impl Fn(&Signature) -> Implementation {
    |_: &Signature| {
        implementation(
            |inv, args, out| {
                let [x, y] = args else { return Err(arity(2, args.len())) };
                for (i, &(j, k)) in CROSS.iter().enumerate() {
                    execute4(
                        inv.chain(),
                        inv.paths(),
                        x.floats(j)?,
                        y.floats(k)?,
                        y.floats(j)?,
                        x.floats(k)?,
                        out.floats_mut(i)?,
                        scalar::cross_term,
                    );
                }
                Ok(())
            },
            |args| {
                let [x, y] = args else { return Err(arity(2, args.len())) };
                let (x, y) = (f32::of(x)?, f32::of(y)?);
                let data = CROSS.iter().map(|&(j, k)| scalar::cross_term(x[j], y[k], y[j], x[k])).collect();
                f32::pack(ShaderType::Vec3, data)
            },
        )
    }
}

/// `faceforward(N, I, Nref)`: `N` if `dot(Nref, I) < 0`, else `-N`.
pub(crate) fn faceforward() -> impl Fn(&Signature) -> Implementation {
    |sig: &Signature| {
        let ret = sig.ret;
        implementation(
            move |inv, args, out| {
                let [n, i, nref] = args else { return Err(arity(3, args.len())) };
                let mut d = vec![0.0f32; n.rows()];
                accumulate(inv, nref, i, &mut d, scalar::dot_step, identity)?;
                for c in 0..ret.components() {
                    execute2(inv.chain(), inv.paths(), n.floats(c)?, &d[..], out.floats_mut(c)?, scalar::face_toward);
                }
                Ok(())
            },
            move |args| {
                let [n, i, nref] = args else { return Err(arity(3, args.len())) };
                let d = fold(f32::of(nref)?, f32::of(i)?, scalar::dot_step, identity);
                f32::pack(ret, f32::of(n)?.iter().map(|&c| scalar::face_toward(c, d)).collect())
            },
        )
    }
}

/// Shared by `reflect` and `refract`, which are registered without an
/// implementation in either slot.
pub(crate) fn unimplemented() -> impl Fn(&Signature) -> Implementation {
    |_: &Signature| Implementation::not_implemented()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::BuiltinEntry;
    use crate::chain::ActiveChain;
    use crate::exec::VectorPaths;
    use lumen_glsl::ShaderType::*;
    use lumen_glsl::Value;

    fn entry(
        name: &str,
        ret: ShaderType,
        params: &[ShaderType],
        factory: impl Fn(&Signature) -> Implementation,
    ) -> BuiltinEntry {
        let sig = Signature::new(ret, name, params.to_vec());
        let imp = factory(&sig);
        BuiltinEntry::new(sig, imp)
    }

    fn run(e: &BuiltinEntry, args: &[Value]) -> Value {
        let chain = ActiveChain::full(8).unwrap();
        let regs: Vec<Register> = args.iter().map(|v| Register::splat(v, 8)).collect();
        let refs: Vec<&Register> = regs.iter().collect();
        let mut out = Register::zeroed(e.signature().ret, 8);
        e.execute(&Invocation::new(&chain, VectorPaths::Wide8), &refs, &mut out).unwrap();
        out.row_value(5).unwrap()
    }

    #[test]
    fn dot_and_length() {
        let d = entry("dot", Float, &[Vec3, Vec3], dot());
        let args = [Value::vec3(1.0, 2.0, 3.0), Value::vec3(4.0, -5.0, 6.0)];
        assert_eq!(d.evaluate(&args).unwrap().unwrap(), Value::float(12.0));
        assert_eq!(run(&d, &args), Value::float(12.0));

        let l = entry("length", Float, &[Vec2], length());
        let v = [Value::vec2(3.0, 4.0)];
        assert_eq!(l.evaluate(&v).unwrap().unwrap(), Value::float(5.0));
        assert_eq!(run(&l, &v), Value::float(5.0));
    }

    #[test]
    fn distance_of_floats() {
        let e = entry("distance", Float, &[Float, Float], distance());
        let args = [Value::float(-1.0), Value::float(2.0)];
        assert_eq!(run(&e, &args), Value::float(3.0));
    }

    #[test]
    fn normalize_divides_by_length() {
        let e = entry("normalize", Vec2, &[Vec2], normalize());
        let args = [Value::vec2(0.0, -4.0)];
        assert_eq!(e.evaluate(&args).unwrap().unwrap(), Value::vec2(0.0, -1.0));
        assert_eq!(run(&e, &args), Value::vec2(0.0, -1.0));
    }

    #[test]
    fn cross_of_axes() {
        let e = entry("cross", Vec3, &[Vec3, Vec3], cross());
        let args = [Value::vec3(1.0, 0.0, 0.0), Value::vec3(0.0, 1.0, 0.0)];
        assert_eq!(e.evaluate(&args).unwrap().unwrap(), Value::vec3(0.0, 0.0, 1.0));
        assert_eq!(run(&e, &args), Value::vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn faceforward_flips_when_facing_away() {
        let e = entry("faceforward", Vec2, &[Vec2, Vec2, Vec2], faceforward());
        let n = Value::vec2(0.0, 1.0);
        let toward = [n.clone(), Value::vec2(0.0, -1.0), Value::vec2(0.0, 1.0)];
        let away = [n.clone(), Value::vec2(0.0, 1.0), Value::vec2(0.0, 1.0)];
        assert_eq!(run(&e, &toward), n);
        assert_eq!(run(&e, &away), Value::vec2(-0.0, -1.0));
        assert_eq!(e.evaluate(&away).unwrap().unwrap(), Value::vec2(-0.0, -1.0));
    }

    #[test]
    fn reflect_reports_its_signature() {
        let e = entry("reflect", Vec3, &[Vec3, Vec3], unimplemented());
        let err = e.evaluate(&[Value::vec3(0.0, 0.0, 1.0), Value::vec3(0.0, 0.0, 1.0)]).unwrap_err();
        assert_eq!(err.to_string(), "builtin `vec3 reflect(vec3, vec3)` is not implemented");
    }
}
