use std::fmt;

use crate::types::{ScalarKind, ShaderType};

/// One component of a shading value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Scalar {
    Float(f32),
    Int(i32),
    Bool(bool),
}

impl Scalar {
    pub const fn kind(self) -> ScalarKind {
        match self {
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Bool(_) => ScalarKind::Bool,
        }
    }

    /// Bit-level equality; NaN matches any NaN.
    pub fn same(self, other: Scalar) -> bool {
        match (self, other) {
            (Scalar::Float(a), Scalar::Float(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (a, b) => a == b,
        }
    }
}

/// Typed component storage of a [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Components {
    Float(Vec<f32>),
    Int(Vec<i32>),
    Bool(Vec<bool>),
}

impl Components {
    pub fn len(&self) -> usize {
        match self {
            Components::Float(v) => v.len(),
            Components::Int(v) => v.len(),
            Components::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn kind(&self) -> ScalarKind {
        match self {
            Components::Float(_) => ScalarKind::Float,
            Components::Int(_) => ScalarKind::Int,
            Components::Bool(_) => ScalarKind::Bool,
        }
    }
}

/// A compile-time constant of a shader type.
///
/// The component count always matches `ty.components()` and the storage kind
/// always matches `ty.kind()`; constructors enforce both.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    ty: ShaderType,
    data: Components,
}

impl Value {
    /// Builds a value, returning `None` when `data` does not fit `ty`.
    pub fn new(ty: ShaderType, data: Components) -> Option<Self> {
        if ty.kind() != Some(data.kind()) || ty.components() != data.len() {
            return None;
        }
        Some(Self { ty, data })
    }

    pub fn floats(ty: ShaderType, data: Vec<f32>) -> Option<Self> {
        Self::new(ty, Components::Float(data))
    }

    pub fn ints(ty: ShaderType, data: Vec<i32>) -> Option<Self> {
        Self::new(ty, Components::Int(data))
    }

    pub fn bools(ty: ShaderType, data: Vec<bool>) -> Option<Self> {
        Self::new(ty, Components::Bool(data))
    }

    pub fn float(x: f32) -> Self {
        Self { ty: ShaderType::Float, data: Components::Float(vec![x]) }
    }

    pub fn int(x: i32) -> Self {
        Self { ty: ShaderType::Int, data: Components::Int(vec![x]) }
    }

    pub fn boolean(x: bool) -> Self {
        Self { ty: ShaderType::Bool, data: Components::Bool(vec![x]) }
    }

    pub fn vec2(x: f32, y: f32) -> Self {
        Self { ty: ShaderType::Vec2, data: Components::Float(vec![x, y]) }
    }

    pub fn vec3(x: f32, y: f32, z: f32) -> Self {
        Self { ty: ShaderType::Vec3, data: Components::Float(vec![x, y, z]) }
    }

    pub fn vec4(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { ty: ShaderType::Vec4, data: Components::Float(vec![x, y, z, w]) }
    }

    /// A sampler handle bound to texture `unit`.
    pub fn sampler(ty: ShaderType, unit: i32) -> Option<Self> {
        if !ty.is_sampler() {
            return None;
        }
        Some(Self { ty, data: Components::Int(vec![unit]) })
    }

    /// Every component set to `scalar`; `None` on a kind mismatch.
    pub fn splat(ty: ShaderType, scalar: Scalar) -> Option<Self> {
        let n = ty.components();
        let data = match scalar {
            Scalar::Float(x) => Components::Float(vec![x; n]),
            Scalar::Int(x) => Components::Int(vec![x; n]),
            Scalar::Bool(x) => Components::Bool(vec![x; n]),
        };
        Self::new(ty, data)
    }

    /// The all-zero (or all-false) value of `ty`.
    pub fn zero(ty: ShaderType) -> Option<Self> {
        let scalar = match ty.kind()? {
            ScalarKind::Float => Scalar::Float(0.0),
            ScalarKind::Int => Scalar::Int(0),
            ScalarKind::Bool => Scalar::Bool(false),
        };
        Self::splat(ty, scalar)
    }

    #[inline]
    pub fn ty(&self) -> ShaderType {
        self.ty
    }

    #[inline]
    pub fn data(&self) -> &Components {
        &self.data
    }

    #[inline]
    pub fn components(&self) -> usize {
        self.data.len()
    }

    pub fn component(&self, i: usize) -> Option<Scalar> {
        match &self.data {
            Components::Float(v) => v.get(i).copied().map(Scalar::Float),
            Components::Int(v) => v.get(i).copied().map(Scalar::Int),
            Components::Bool(v) => v.get(i).copied().map(Scalar::Bool),
        }
    }

    pub fn as_floats(&self) -> Option<&[f32]> {
        match &self.data {
            Components::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ints(&self) -> Option<&[i32]> {
        match &self.data {
            Components::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bools(&self) -> Option<&[bool]> {
        match &self.data {
            Components::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Type and component equality at the bit level; NaN matches any NaN.
    pub fn same(&self, other: &Value) -> bool {
        self.ty == other.ty
            && self.components() == other.components()
            && (0..self.components()).all(|i| match (self.component(i), other.component(i)) {
                (Some(a), Some(b)) => a.same(b),
                _ => false,
            })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.ty)?;
        for i in 0..self.components() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.component(i) {
                Some(Scalar::Float(x)) => write!(f, "{x:?}")?,
                Some(Scalar::Int(x)) => write!(f, "{x}")?,
                Some(Scalar::Bool(x)) => write!(f, "{x}")?,
                None => {}
            }
        }
        f.write_str(")")
    }
}
