//! Texture lookup builtins. Runtime only: they have no compile-time form.
//!
//! Bias and explicit lod arguments are accepted and ignored; textures carry a
//! single level.

use std::sync::Arc;

use lumen_glsl::Signature;

use super::componentwise::arity;
use super::{Implementation, Invocation};
use crate::chain::ActiveChain;
use crate::column::Register;
use crate::error::EngineError;
use crate::exec::{execute1, execute3, execute4};
use crate::texture::{Rgba, Texture2D, TextureCube};

/// How the coordinate argument addresses the texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup {
    /// `vec2` coordinate.
    Flat,
    /// `vec3` or `vec4` coordinate divided by its last component.
    Projective,
    /// `vec3` direction into a cube map.
    Cube,
}

pub(crate) fn lookup(kind: Lookup) -> impl Fn(&Signature) -> Implementation {
    move |_: &Signature| {
        Implementation::runtime_only(Arc::new(
            move |inv: &Invocation<'_>, args: &[&Register], out: &mut Register| -> Result<(), EngineError> {
                let (sampler, coord) = match args {
                    [s, c] | [s, c, _] => (*s, *c),
                    _ => return Err(arity(2, args.len())),
                };
                sample(kind, inv, sampler, coord, out)
            },
        ))
    }
}

fn sample(
    kind: Lookup,
    inv: &Invocation<'_>,
    sampler: &Register,
    coord: &Register,
    out: &mut Register,
) -> Result<(), EngineError> {
    let (chain, paths) = (inv.chain(), inv.paths());
    let Some(first) = chain.iter().next() else {
        return Ok(());
    };
    let unit = sampler.ints(0)?;
    let expected = match kind {
        Lookup::Cube => "samplerCube",
        Lookup::Flat | Lookup::Projective => "sampler2D",
    };
    let units = inv.textures().ok_or(EngineError::TextureUnit { unit: unit[first], expected })?;

    let mut texels: Vec<Rgba> = vec![[0.0; 4]; chain.rows()];
    let (x, y) = (coord.floats(0)?, coord.floats(1)?);
    match kind {
        Lookup::Flat => {
            let bound = resolve(chain, first, unit, |u| units.texture_2d(u))?;
            execute3(chain, paths, &bound[..], x, y, &mut texels, |tex: &Texture2D, s: f32, t: f32| {
                tex.sample(s, t)
            })
        }
        Lookup::Projective => {
            let bound = resolve(chain, first, unit, |u| units.texture_2d(u))?;
            let q = coord.floats(coord.ty().components() - 1)?;
            execute4(chain, paths, &bound[..], x, y, q, &mut texels, |tex: &Texture2D, s: f32, t: f32, q: f32| {
                tex.sample(s / q, t / q)
            })
        }
        Lookup::Cube => {
            let bound = resolve(chain, first, unit, |u| units.texture_cube(u))?;
            let z = coord.floats(2)?;
            execute4(chain, paths, &bound[..], x, y, z, &mut texels, |cube: &TextureCube, x: f32, y: f32, z: f32| {
                cube.sample([x, y, z])
            })
        }
    }

    for c in 0..4 {
        execute1(chain, paths, &texels[..], out.floats_mut(c)?, |t: Rgba| t[c]);
    }
    Ok(())
}

/// The texture bound to each live row's unit. Rows off the chain hold the
/// first live row's texture and are never read.
fn resolve<'u, T>(
    chain: &ActiveChain,
    first: usize,
    unit: &[i32],
    lookup: impl Fn(i32) -> Result<&'u T, EngineError>,
) -> Result<Vec<&'u T>, EngineError> {
    let mut bound = vec![lookup(unit[first])?; chain.rows()];
    for row in chain.iter() {
        bound[row] = lookup(unit[row])?;
    }
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::BuiltinEntry;
    use crate::exec::VectorPaths;
    use crate::texture::{SamplerState, TextureUnits};
    use lumen_glsl::ShaderType::{self, *};
    use lumen_glsl::Value;

    fn entry(ret: ShaderType, params: &[ShaderType], kind: Lookup) -> BuiltinEntry {
        let sig = Signature::new(ret, "lookup", params.to_vec());
        let imp = lookup(kind)(&sig);
        BuiltinEntry::new(sig, imp)
    }

    fn gradient() -> Texture2D {
        Texture2D::from_fn(4, 1, SamplerState::default(), |x, _| [x as f32, 0.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn texture2d_samples_per_row() {
        let mut units = TextureUnits::new();
        units.bind_2d(3, gradient());
        let e = entry(Vec4, &[Sampler2D, Vec2], Lookup::Flat);

        let chain = ActiveChain::from_rows(4, &[0, 2, 3]).unwrap();
        let s = Register::splat(&Value::sampler(Sampler2D, 3).unwrap(), 4);
        let uv = Register::from_floats(Vec2, vec![vec![0.1, 0.3, 0.6, 0.9], vec![0.5; 4]]).unwrap();
        let mut out = Register::zeroed(Vec4, 4);
        let inv = Invocation::new(&chain, VectorPaths::Wide4).with_textures(&units);
        e.execute(&inv, &[&s, &uv], &mut out).unwrap();

        assert_eq!(out.floats(0).unwrap(), &[0.0, 0.0, 2.0, 3.0]);
        assert_eq!(out.floats(3).unwrap(), &[1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn projective_divides_by_last_component() {
        let mut units = TextureUnits::new();
        units.bind_2d(0, gradient());
        let e = entry(Vec4, &[Sampler2D, Vec4, Float], Lookup::Projective);

        let chain = ActiveChain::full(1).unwrap();
        let s = Register::splat(&Value::sampler(Sampler2D, 0).unwrap(), 1);
        let p = Register::splat(&Value::vec4(1.5, 1.0, 7.0, 2.0), 1);
        let bias = Register::splat(&Value::float(4.0), 1);
        let mut out = Register::zeroed(Vec4, 1);
        let inv = Invocation::new(&chain, VectorPaths::Scalar).with_textures(&units);
        e.execute(&inv, &[&s, &p, &bias], &mut out).unwrap();
        assert_eq!(out.floats(0).unwrap(), &[3.0]);
    }

    #[test]
    fn cube_lookup_reads_the_major_face() {
        let faces = std::array::from_fn(|i| {
            Texture2D::new(1, 1, vec![[i as f32, 0.0, 0.0, 1.0]], SamplerState::default()).unwrap()
        });
        let mut units = TextureUnits::new();
        units.bind_cube(1, TextureCube::new(faces).unwrap());
        let e = entry(Vec4, &[SamplerCube, Vec3], Lookup::Cube);

        let chain = ActiveChain::full(2).unwrap();
        let s = Register::splat(&Value::sampler(SamplerCube, 1).unwrap(), 2);
        let dir = Register::from_floats(Vec3, vec![vec![0.0, 0.1], vec![-1.0, 0.0], vec![0.2, 3.0]]).unwrap();
        let mut out = Register::zeroed(Vec4, 2);
        let inv = Invocation::new(&chain, VectorPaths::Wide8).with_textures(&units);
        e.execute(&inv, &[&s, &dir], &mut out).unwrap();
        assert_eq!(out.floats(0).unwrap(), &[3.0, 4.0]);
    }

    #[test]
    fn unbound_unit_on_a_live_row_fails() {
        let units = TextureUnits::new();
        let e = entry(Vec4, &[Sampler2D, Vec2], Lookup::Flat);
        let chain = ActiveChain::full(2).unwrap();
        let s = Register::splat(&Value::sampler(Sampler2D, 5).unwrap(), 2);
        let uv = Register::zeroed(Vec2, 2);
        let mut out = Register::zeroed(Vec4, 2);
        let inv = Invocation::new(&chain, VectorPaths::Wide8).with_textures(&units);
        assert!(matches!(
            e.execute(&inv, &[&s, &uv], &mut out),
            Err(EngineError::TextureUnit { unit: 5, .. })
        ));
    }

    #[test]
    fn missing_bindings_name_the_sampled_unit() {
        let e = entry(Vec4, &[SamplerCube, Vec3], Lookup::Cube);
        let chain = ActiveChain::from_rows(3, &[1, 2]).unwrap();
        let s = Register::from_values(SamplerCube, &[
            Value::sampler(SamplerCube, 0).unwrap(),
            Value::sampler(SamplerCube, 6).unwrap(),
            Value::sampler(SamplerCube, 6).unwrap(),
        ])
        .unwrap();
        let dir = Register::zeroed(Vec3, 3);
        let mut out = Register::zeroed(Vec4, 3);
        let inv = Invocation::new(&chain, VectorPaths::Wide8);
        assert!(matches!(
            e.execute(&inv, &[&s, &dir], &mut out),
            Err(EngineError::TextureUnit { unit: 6, expected: "samplerCube" })
        ));
    }

    #[test]
    fn empty_chain_needs_no_bindings() {
        let e = entry(Vec4, &[Sampler2D, Vec2], Lookup::Flat);
        let chain = ActiveChain::empty(2).unwrap();
        let s = Register::splat(&Value::sampler(Sampler2D, 9).unwrap(), 2);
        let uv = Register::zeroed(Vec2, 2);
        let mut out = Register::zeroed(Vec4, 2);
        e.execute(&Invocation::new(&chain, VectorPaths::Scalar), &[&s, &uv], &mut out).unwrap();
        assert_eq!(out, Register::zeroed(Vec4, 2));
    }

    #[test]
    fn lookups_have_no_constant_form() {
        let e = entry(Vec4, &[Sampler2D, Vec2], Lookup::Flat);
        let args = [Value::sampler(Sampler2D, 0).unwrap(), Value::vec2(0.0, 0.0)];
        assert!(e.evaluate(&args).unwrap().is_none());
    }
}
