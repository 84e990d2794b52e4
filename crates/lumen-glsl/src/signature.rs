use std::fmt;

use crate::types::{ScalarKind, ShaderType};

/// A concrete builtin overload: return type, name, ordered parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub ret: ShaderType,
    pub name: String,
    pub params: Vec<ShaderType>,
}

impl Signature {
    pub fn new(ret: ShaderType, name: impl Into<String>, params: Vec<ShaderType>) -> Self {
        Self { ret, name: name.into(), params }
    }
}

/// Renders the GLSL declaration, e.g. `vec3 reflect(vec3, vec3)`.
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.ret, self.name)?;
        write_params(f, &self.params)?;
        f.write_str(")")
    }
}

/// Formats a call site without a return type: `pow(vec3, float)`.
pub struct CallShape<'a> {
    pub name: &'a str,
    pub params: &'a [ShaderType],
}

impl fmt::Display for CallShape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_params(f, self.params)?;
        f.write_str(")")
    }
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &[ShaderType]) -> fmt::Result {
    for (i, p) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{p}")?;
    }
    Ok(())
}

// ── Generic declarations ──────────────────────────────────────────────────

/// Placeholder families used by the GLSL builtin tables.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Family {
    /// `float`, `vec2`, `vec3`, `vec4`
    GenType,
    /// `vec2` .. `vec4`
    Vec,
    /// `ivec2` .. `ivec4`
    IVec,
    /// `bvec2` .. `bvec4`
    BVec,
    /// `mat2` .. `mat4`
    Mat,
}

impl Family {
    pub fn parse(name: &str) -> Option<Family> {
        Some(match name {
            "genType" => Family::GenType,
            "vec" => Family::Vec,
            "ivec" => Family::IVec,
            "bvec" => Family::BVec,
            "mat" => Family::Mat,
            _ => return None,
        })
    }

    fn instantiate(self, size: usize) -> Option<ShaderType> {
        match self {
            Family::GenType | Family::Vec => ShaderType::vector(ScalarKind::Float, size),
            Family::IVec => ShaderType::vector(ScalarKind::Int, size),
            Family::BVec => ShaderType::vector(ScalarKind::Bool, size),
            Family::Mat => ShaderType::matrix(size),
        }
    }

    fn sizes(self) -> std::ops::RangeInclusive<usize> {
        match self {
            Family::GenType => 1..=4,
            _ => 2..=4,
        }
    }
}

/// A parameter or return type in a generic declaration.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TypePattern {
    Concrete(ShaderType),
    Generic(Family),
}

/// A possibly generic builtin declaration, as written in the builtin tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub ret: TypePattern,
    pub name: String,
    pub params: Vec<TypePattern>,
}

impl Declaration {
    /// Expands placeholders in lock-step into concrete signatures.
    ///
    /// All placeholders in one declaration share a size; `genType` ranges over
    /// 1..=4, every other family over 2..=4. A declaration without placeholders
    /// yields exactly itself.
    pub fn expand(&self) -> Vec<Signature> {
        let families: Vec<Family> = std::iter::once(self.ret)
            .chain(self.params.iter().copied())
            .filter_map(|p| match p {
                TypePattern::Generic(f) => Some(f),
                TypePattern::Concrete(_) => None,
            })
            .collect();

        let sizes = if families.contains(&Family::GenType) {
            Family::GenType.sizes()
        } else if let Some(f) = families.first() {
            f.sizes()
        } else {
            return self.instantiate(0).into_iter().collect();
        };

        sizes.filter_map(|n| self.instantiate(n)).collect()
    }

    fn instantiate(&self, size: usize) -> Option<Signature> {
        let resolve = |p: TypePattern| match p {
            TypePattern::Concrete(ty) => Some(ty),
            TypePattern::Generic(f) => f.instantiate(size),
        };
        let ret = resolve(self.ret)?;
        let params = self.params.iter().map(|&p| resolve(p)).collect::<Option<Vec<_>>>()?;
        Some(Signature::new(ret, self.name.clone(), params))
    }
}
