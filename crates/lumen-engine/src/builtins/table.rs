//! The GLSL ES 1.00 builtin function table.
//!
//! Each line pairs a declaration, written as in the GLSL specification's
//! builtin listing, with the factory that builds both implementation slots for
//! every concrete overload the declaration expands to. When two declarations
//! expand to the same overload the first one wins.

use super::componentwise::{map1, map2, map3, reduce};
use super::geometric;
use super::registry::RegistryBuilder;
use super::relational as rel;
use super::sampling::{Lookup, lookup};
use super::scalar;
use crate::error::EngineError;

pub(crate) fn declare(b: &mut RegistryBuilder) -> Result<(), EngineError> {
    // ── Angle & trigonometry ──────────────────────────────────────────────
    b.declare("genType radians(genType)", map1(scalar::radians))?
        .declare("genType degrees(genType)", map1(scalar::degrees))?
        .declare("genType sin(genType)", map1(f32::sin))?
        .declare("genType cos(genType)", map1(f32::cos))?
        .declare("genType tan(genType)", map1(f32::tan))?
        .declare("genType asin(genType)", map1(f32::asin))?
        .declare("genType acos(genType)", map1(f32::acos))?
        .declare("genType atan(genType, genType)", map2(scalar::atan2))?
        .declare("genType atan(genType)", map1(f32::atan))?;

    // ── Exponential ───────────────────────────────────────────────────────
    b.declare("genType pow(genType, genType)", map2(scalar::pow))?
        .declare("genType exp(genType)", map1(f32::exp))?
        .declare("genType log(genType)", map1(f32::ln))?
        .declare("genType exp2(genType)", map1(f32::exp2))?
        .declare("genType log2(genType)", map1(f32::log2))?
        .declare("genType sqrt(genType)", map1(f32::sqrt))?
        .declare("genType inversesqrt(genType)", map1(scalar::inversesqrt))?;

    // ── Common ────────────────────────────────────────────────────────────
    b.declare("genType abs(genType)", map1(f32::abs))?
        .declare("genType sign(genType)", map1(scalar::sign))?
        .declare("genType floor(genType)", map1(f32::floor))?
        .declare("genType ceil(genType)", map1(f32::ceil))?
        .declare("genType fract(genType)", map1(scalar::fract))?
        .declare("genType mod(genType, float)", map2(scalar::modulo))?
        .declare("genType mod(genType, genType)", map2(scalar::modulo))?
        .declare("genType min(genType, genType)", map2(scalar::min))?
        .declare("genType min(genType, float)", map2(scalar::min))?
        .declare("genType max(genType, genType)", map2(scalar::max))?
        .declare("genType max(genType, float)", map2(scalar::max))?
        .declare("genType clamp(genType, genType, genType)", map3(scalar::clamp))?
        .declare("genType clamp(genType, float, float)", map3(scalar::clamp))?
        .declare("genType mix(genType, genType, genType)", map3(scalar::mix))?
        .declare("genType mix(genType, genType, float)", map3(scalar::mix))?
        .declare("genType step(genType, genType)", map2(scalar::step))?
        .declare("genType step(float, genType)", map2(scalar::step))?
        .declare("genType smoothstep(genType, genType, genType)", map3(scalar::smoothstep))?
        .declare("genType smoothstep(float, float, genType)", map3(scalar::smoothstep))?;

    // ── Geometric ─────────────────────────────────────────────────────────
    b.declare("float length(genType)", geometric::length())?
        .declare("float distance(genType, genType)", geometric::distance())?
        .declare("float dot(genType, genType)", geometric::dot())?
        .declare("vec3 cross(vec3, vec3)", geometric::cross())?
        .declare("genType normalize(genType)", geometric::normalize())?
        .declare("genType faceforward(genType, genType, genType)", geometric::faceforward())?
        .declare("genType reflect(genType, genType)", geometric::unimplemented())?
        .declare("genType refract(genType, genType, float)", geometric::unimplemented())?;

    // ── Matrix ────────────────────────────────────────────────────────────
    b.declare("mat matrixCompMult(mat, mat)", map2(|x: f32, y: f32| x * y))?;

    // ── Vector relational ─────────────────────────────────────────────────
    b.declare("bvec lessThan(vec, vec)", map2(rel::less_than::<f32>))?
        .declare("bvec lessThan(ivec, ivec)", map2(rel::less_than::<i32>))?
        .declare("bvec lessThanEqual(vec, vec)", map2(rel::less_than_equal::<f32>))?
        .declare("bvec lessThanEqual(ivec, ivec)", map2(rel::less_than_equal::<i32>))?
        .declare("bvec greaterThan(vec, vec)", map2(rel::greater_than::<f32>))?
        .declare("bvec greaterThan(ivec, ivec)", map2(rel::greater_than::<i32>))?
        .declare("bvec greaterThanEqual(vec, vec)", map2(rel::greater_than_equal::<f32>))?
        .declare("bvec greaterThanEqual(ivec, ivec)", map2(rel::greater_than_equal::<i32>))?
        .declare("bvec equal(vec, vec)", map2(rel::equal::<f32>))?
        .declare("bvec equal(ivec, ivec)", map2(rel::equal::<i32>))?
        .declare("bvec equal(bvec, bvec)", map2(rel::equal::<bool>))?
        .declare("bvec notEqual(vec, vec)", map2(rel::not_equal::<f32>))?
        .declare("bvec notEqual(ivec, ivec)", map2(rel::not_equal::<i32>))?
        .declare("bvec notEqual(bvec, bvec)", map2(rel::not_equal::<bool>))?
        .declare("bool any(bvec)", reduce(rel::any))?
        .declare("bool all(bvec)", reduce(rel::all))?
        .declare("bvec not(bvec)", map1(rel::not))?;

    // ── Texture lookup ────────────────────────────────────────────────────
    b.declare("vec4 texture2D(sampler2D, vec2)", lookup(Lookup::Flat))?
        .declare("vec4 texture2D(sampler2D, vec2, float)", lookup(Lookup::Flat))?
        .declare("vec4 texture2DProj(sampler2D, vec3)", lookup(Lookup::Projective))?
        .declare("vec4 texture2DProj(sampler2D, vec3, float)", lookup(Lookup::Projective))?
        .declare("vec4 texture2DProj(sampler2D, vec4)", lookup(Lookup::Projective))?
        .declare("vec4 texture2DProj(sampler2D, vec4, float)", lookup(Lookup::Projective))?
        .declare("vec4 texture2DLod(sampler2D, vec2, float)", lookup(Lookup::Flat))?
        .declare("vec4 texture2DProjLod(sampler2D, vec3, float)", lookup(Lookup::Projective))?
        .declare("vec4 texture2DProjLod(sampler2D, vec4, float)", lookup(Lookup::Projective))?
        .declare("vec4 textureCube(samplerCube, vec3)", lookup(Lookup::Cube))?
        .declare("vec4 textureCube(samplerCube, vec3, float)", lookup(Lookup::Cube))?
        .declare("vec4 textureCubeLod(samplerCube, vec3, float)", lookup(Lookup::Cube))?;

    Ok(())
}
