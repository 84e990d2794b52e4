//! Factories for builtins that apply one scalar operator per component.
//!
//! A scalar argument is broadcast to every component of the result, so the
//! same factory serves `min(vec3, vec3)` and `min(vec3, float)`. The operator
//! is a type parameter, so each builtin gets its own monomorphized loop.

use std::sync::Arc;

use lumen_glsl::{ShaderType, Signature, Value};

use super::{ConstFn, Implementation, Invocation, RuntimeFn, Slot};
use crate::column::Register;
use crate::error::EngineError;
use crate::exec::{execute1, execute2, execute3, update1};

/// A scalar component type with typed access to registers and values.
pub(crate) trait Element: Copy + Send + Sync + 'static {
    fn lane(reg: &Register, i: usize) -> Result<&[Self], EngineError>;
    fn lane_mut(reg: &mut Register, i: usize) -> Result<&mut [Self], EngineError>;
    fn of(value: &Value) -> Result<&[Self], EngineError>;
    fn pack(ty: ShaderType, data: Vec<Self>) -> Result<Value, EngineError>;
}

macro_rules! element {
    ($t:ty, $lane:ident, $lane_mut:ident, $as:ident, $ctor:ident, $kind:literal) => {
        impl Element for $t {
            #[inline]
            fn lane(reg: &Register, i: usize) -> Result<&[Self], EngineError> {
                reg.$lane(i)
            }

            #[inline]
            fn lane_mut(reg: &mut Register, i: usize) -> Result<&mut [Self], EngineError> {
                reg.$lane_mut(i)
            }

            fn of(value: &Value) -> Result<&[Self], EngineError> {
                value.$as().ok_or_else(|| EngineError::mismatch($kind, value.ty()))
            }

            fn pack(ty: ShaderType, data: Vec<Self>) -> Result<Value, EngineError> {
                let len = data.len();
                Value::$ctor(ty, data).ok_or_else(|| {
                    EngineError::mismatch(ty, format!("{len} {} components", $kind))
                })
            }
        }
    };
}

element!(f32, floats, floats_mut, as_floats, floats, "float");
element!(i32, ints, ints_mut, as_ints, ints, "int");
element!(bool, bools, bools_mut, as_bools, bools, "bool");

/// Lane of an argument feeding result component `i`.
#[inline]
pub(crate) fn source(arg_components: usize, i: usize) -> usize {
    if arg_components == 1 { 0 } else { i }
}

#[inline]
pub(crate) fn pick<T: Copy>(components: &[T], i: usize) -> T {
    components[source(components.len(), i)]
}

pub(crate) fn arity(expected: usize, got: usize) -> EngineError {
    EngineError::mismatch(format!("{expected} arguments"), got)
}

/// Wraps closures for both slots. Taking them as generic `Fn` parameters
/// gives the closures their higher-ranked signatures.
pub(crate) fn implementation(
    runtime: impl Fn(&Invocation<'_>, &[&Register], &mut Register) -> Result<(), EngineError>
        + Send
        + Sync
        + 'static,
    constant: impl Fn(&[Value]) -> Result<Value, EngineError> + Send + Sync + 'static,
) -> Implementation {
    let runtime: RuntimeFn = Arc::new(runtime);
    let constant: ConstFn = Arc::new(constant);
    Implementation { runtime: Slot::Implemented(runtime), constant: Slot::Implemented(constant) }
}

// ── Factories ─────────────────────────────────────────────────────────────

pub(crate) fn map1<A, R, F>(op: F) -> impl Fn(&Signature) -> Implementation
where
    A: Element,
    R: Element,
    F: Fn(A) -> R + Copy + Send + Sync + 'static,
{
    move |sig| {
        let ret = sig.ret;
        implementation(
            move |inv, args, out| {
                let [a] = args else { return Err(arity(1, args.len())) };
                for i in 0..ret.components() {
                    let a = A::lane(a, source(a.ty().components(), i))?;
                    execute1(inv.chain(), inv.paths(), a, R::lane_mut(out, i)?, op);
                }
                Ok(())
            },
            move |args| {
                let [a] = args else { return Err(arity(1, args.len())) };
                let a = A::of(a)?;
                R::pack(ret, (0..ret.components()).map(|i| op(pick(a, i))).collect())
            },
        )
    }
}

pub(crate) fn map2<A, B, R, F>(op: F) -> impl Fn(&Signature) -> Implementation
where
    A: Element,
    B: Element,
    R: Element,
    F: Fn(A, B) -> R + Copy + Send + Sync + 'static,
{
    move |sig| {
        let ret = sig.ret;
        implementation(
            move |inv, args, out| {
                let [a, b] = args else { return Err(arity(2, args.len())) };
                for i in 0..ret.components() {
                    let a = A::lane(a, source(a.ty().components(), i))?;
                    let b = B::lane(b, source(b.ty().components(), i))?;
                    execute2(inv.chain(), inv.paths(), a, b, R::lane_mut(out, i)?, op);
                }
                Ok(())
            },
            move |args| {
                let [a, b] = args else { return Err(arity(2, args.len())) };
                let (a, b) = (A::of(a)?, B::of(b)?);
                R::pack(ret, (0..ret.components()).map(|i| op(pick(a, i), pick(b, i))).collect())
            },
        )
    }
}

pub(crate) fn map3<A, B, C, R, F>(op: F) -> impl Fn(&Signature) -> Implementation
where
    A: Element,
    B: Element,
    C: Element,
    R: Element,
    F: Fn(A, B, C) -> R + Copy + Send + Sync + 'static,
{
    move |sig| {
        let ret = sig.ret;
        implementation(
            move |inv, args, out| {
                let [a, b, c] = args else { return Err(arity(3, args.len())) };
                for i in 0..ret.components() {
                    let a = A::lane(a, source(a.ty().components(), i))?;
                    let b = B::lane(b, source(b.ty().components(), i))?;
                    let c = C::lane(c, source(c.ty().components(), i))?;
                    execute3(inv.chain(), inv.paths(), a, b, c, R::lane_mut(out, i)?, op);
                }
                Ok(())
            },
            move |args| {
                let [a, b, c] = args else { return Err(arity(3, args.len())) };
                let (a, b, c) = (A::of(a)?, B::of(b)?, C::of(c)?);
                R::pack(
                    ret,
                    (0..ret.components()).map(|i| op(pick(a, i), pick(b, i), pick(c, i))).collect(),
                )
            },
        )
    }
}

/// Folds the components of one vector argument into a scalar result,
/// left to right, starting from component 0.
pub(crate) fn reduce<T, F>(op: F) -> impl Fn(&Signature) -> Implementation
where
    T: Element,
    F: Fn(T, T) -> T + Copy + Send + Sync + 'static,
{
    move |sig| {
        let ret = sig.ret;
        implementation(
            move |inv, args, out| {
                let [v] = args else { return Err(arity(1, args.len())) };
                let acc = T::lane_mut(out, 0)?;
                execute1(inv.chain(), inv.paths(), T::lane(v, 0)?, acc, |x| x);
                for i in 1..v.ty().components() {
                    update1(inv.chain(), inv.paths(), acc, T::lane(v, i)?, op);
                }
                Ok(())
            },
            move |args| {
                let [v] = args else { return Err(arity(1, args.len())) };
                let v = T::of(v)?;
                let folded = v.iter().copied().reduce(op).ok_or_else(|| arity(1, 0))?;
                T::pack(ret, vec![folded])
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::BuiltinEntry;
    use crate::chain::ActiveChain;
    use crate::exec::VectorPaths;
    use lumen_glsl::ShaderType::*;

    fn entry(ret: ShaderType, params: &[ShaderType], imp: Implementation) -> BuiltinEntry {
        BuiltinEntry::new(Signature::new(ret, "t", params.to_vec()), imp)
    }

    #[test]
    fn scalar_argument_is_broadcast() {
        let sig = Signature::new(Vec3, "min", vec![Vec3, Float]);
        let e = entry(Vec3, &[Vec3, Float], map2(|x: f32, y: f32| if y < x { y } else { x })(&sig));

        let v = e.evaluate(&[Value::vec3(1.0, 5.0, -2.0), Value::float(2.0)]).unwrap().unwrap();
        assert_eq!(v, Value::vec3(1.0, 2.0, -2.0));

        let chain = ActiveChain::full(3).unwrap();
        let x = Register::splat(&Value::vec3(1.0, 5.0, -2.0), 3);
        let y = Register::splat(&Value::float(2.0), 3);
        let mut out = Register::zeroed(Vec3, 3);
        e.execute(&Invocation::new(&chain, VectorPaths::Wide8), &[&x, &y], &mut out).unwrap();
        assert_eq!(out.row_value(1).unwrap(), v);
    }

    #[test]
    fn result_kind_can_differ() {
        let sig = Signature::new(BVec2, "lessThan", vec![IVec2, IVec2]);
        let e = entry(BVec2, &[IVec2, IVec2], map2(|x: i32, y: i32| x < y)(&sig));
        let a = Value::ints(IVec2, vec![1, 3]).unwrap();
        let b = Value::ints(IVec2, vec![2, 3]).unwrap();
        assert_eq!(e.evaluate(&[a, b]).unwrap().unwrap(), Value::bools(BVec2, vec![true, false]).unwrap());
    }

    #[test]
    fn reduce_folds_left_to_right() {
        let sig = Signature::new(Bool, "any", vec![BVec3]);
        let e = entry(Bool, &[BVec3], reduce(|a: bool, b: bool| a || b)(&sig));
        let v = Value::bools(BVec3, vec![false, false, true]).unwrap();
        assert_eq!(e.evaluate(&[v.clone()]).unwrap().unwrap(), Value::boolean(true));

        let chain = ActiveChain::from_rows(4, &[1, 2]).unwrap();
        let arg = Register::splat(&v, 4);
        let mut out = Register::zeroed(Bool, 4);
        e.execute(&Invocation::new(&chain, VectorPaths::Scalar), &[&arg], &mut out).unwrap();
        assert_eq!(out.bools(0).unwrap(), &[false, true, true, false]);
    }

    #[test]
    fn argument_types_are_checked_before_running() {
        let sig = Signature::new(Float, "abs", vec![Float]);
        let e = entry(Float, &[Float], map1(f32::abs)(&sig));
        assert!(matches!(e.evaluate(&[Value::int(1)]), Err(EngineError::TypeMismatch { .. })));
        assert!(e.evaluate(&[]).is_err());
    }
}
