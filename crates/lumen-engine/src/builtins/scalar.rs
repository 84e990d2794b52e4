//! Scalar operators shared by the runtime and constant slots.
//!
//! Both slots call these exact functions, which is what keeps compile-time
//! folding and per-row execution bit-identical.

use std::f32::consts::PI;

// ── Angle & trigonometry ──────────────────────────────────────────────────

#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * (180.0 / PI)
}

/// Two-argument `atan(y, x)`.
#[inline]
pub fn atan2(y: f32, x: f32) -> f32 {
    y.atan2(x)
}

// ── Exponential ───────────────────────────────────────────────────────────

#[inline]
pub fn pow(x: f32, y: f32) -> f32 {
    x.powf(y)
}

#[inline]
pub fn inversesqrt(x: f32) -> f32 {
    1.0 / x.sqrt()
}

// ── Common ────────────────────────────────────────────────────────────────

/// `1`, `-1`, or the argument itself for `±0` and NaN.
#[inline]
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// GLSL `mod`: `x - y * floor(x / y)`.
#[inline]
pub fn modulo(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

/// `y < x ? y : x`; a NaN `y` yields `x`.
#[inline]
pub fn min(x: f32, y: f32) -> f32 {
    if y < x { y } else { x }
}

/// `x < y ? y : x`; a NaN `y` yields `x`.
#[inline]
pub fn max(x: f32, y: f32) -> f32 {
    if x < y { y } else { x }
}

#[inline]
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    min(max(x, lo), hi)
}

#[inline]
pub fn mix(x: f32, y: f32, a: f32) -> f32 {
    x * (1.0 - a) + y * a
}

#[inline]
pub fn step(edge: f32, x: f32) -> f32 {
    if x < edge { 0.0 } else { 1.0 }
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = clamp((x - edge0) / (edge1 - edge0), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

// ── Geometric helpers ─────────────────────────────────────────────────────

/// One step of a dot product. Kept as separate multiply and add.
#[inline]
pub fn dot_step(acc: f32, x: f32, y: f32) -> f32 {
    acc + x * y
}

/// One step of a squared distance.
#[inline]
pub fn distance_step(acc: f32, x: f32, y: f32) -> f32 {
    let d = x - y;
    acc + d * d
}

/// `a * b - c * d`, the cross product term.
#[inline]
pub fn cross_term(a: f32, b: f32, c: f32, d: f32) -> f32 {
    a * b - c * d
}

#[inline]
pub fn face_toward(n: f32, dot_nref_i: f32) -> f32 {
    if dot_nref_i < 0.0 { n } else { -n }
}
