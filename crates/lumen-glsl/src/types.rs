use std::fmt;

/// Element type of a single shading-value component.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ScalarKind {
    Float,
    Int,
    Bool,
}

/// A resolved GLSL ES 1.00 type.
///
/// Samplers are opaque handles; at execution time they hold the texture unit
/// number as a single `Int` component.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderType {
    Void,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Int,
    IVec2,
    IVec3,
    IVec4,
    Bool,
    BVec2,
    BVec3,
    BVec4,
    Mat2,
    Mat3,
    Mat4,
    Sampler2D,
    SamplerCube,
}

impl ShaderType {
    /// Component kind, or `None` for `void`.
    pub const fn kind(self) -> Option<ScalarKind> {
        use ShaderType::*;
        match self {
            Void => None,
            Float | Vec2 | Vec3 | Vec4 | Mat2 | Mat3 | Mat4 => Some(ScalarKind::Float),
            Int | IVec2 | IVec3 | IVec4 | Sampler2D | SamplerCube => Some(ScalarKind::Int),
            Bool | BVec2 | BVec3 | BVec4 => Some(ScalarKind::Bool),
        }
    }

    /// Number of scalar columns a value of this type occupies.
    ///
    /// Matrices are stored column-major, `n * n` components.
    pub const fn components(self) -> usize {
        use ShaderType::*;
        match self {
            Void => 0,
            Float | Int | Bool | Sampler2D | SamplerCube => 1,
            Vec2 | IVec2 | BVec2 => 2,
            Vec3 | IVec3 | BVec3 => 3,
            Vec4 | IVec4 | BVec4 | Mat2 => 4,
            Mat3 => 9,
            Mat4 => 16,
        }
    }

    #[inline]
    pub const fn is_scalar(self) -> bool {
        matches!(self, ShaderType::Float | ShaderType::Int | ShaderType::Bool)
    }

    #[inline]
    pub const fn is_vector(self) -> bool {
        use ShaderType::*;
        matches!(self, Vec2 | Vec3 | Vec4 | IVec2 | IVec3 | IVec4 | BVec2 | BVec3 | BVec4)
    }

    #[inline]
    pub const fn is_matrix(self) -> bool {
        matches!(self, ShaderType::Mat2 | ShaderType::Mat3 | ShaderType::Mat4)
    }

    #[inline]
    pub const fn is_sampler(self) -> bool {
        matches!(self, ShaderType::Sampler2D | ShaderType::SamplerCube)
    }

    /// Matrix dimension (2, 3 or 4), or 0 for non-matrix types.
    pub const fn matrix_dim(self) -> usize {
        match self {
            ShaderType::Mat2 => 2,
            ShaderType::Mat3 => 3,
            ShaderType::Mat4 => 4,
            _ => 0,
        }
    }

    /// The scalar (`size == 1`) or vector type with `size` components of `kind`.
    pub const fn vector(kind: ScalarKind, size: usize) -> Option<ShaderType> {
        use ShaderType::*;
        Some(match (kind, size) {
            (ScalarKind::Float, 1) => Float,
            (ScalarKind::Float, 2) => Vec2,
            (ScalarKind::Float, 3) => Vec3,
            (ScalarKind::Float, 4) => Vec4,
            (ScalarKind::Int, 1) => Int,
            (ScalarKind::Int, 2) => IVec2,
            (ScalarKind::Int, 3) => IVec3,
            (ScalarKind::Int, 4) => IVec4,
            (ScalarKind::Bool, 1) => Bool,
            (ScalarKind::Bool, 2) => BVec2,
            (ScalarKind::Bool, 3) => BVec3,
            (ScalarKind::Bool, 4) => BVec4,
            _ => return None,
        })
    }

    pub const fn matrix(dim: usize) -> Option<ShaderType> {
        match dim {
            2 => Some(ShaderType::Mat2),
            3 => Some(ShaderType::Mat3),
            4 => Some(ShaderType::Mat4),
            _ => None,
        }
    }

    /// The scalar type of one component (`vec3` → `float`, `mat2` → `float`).
    pub const fn scalar(self) -> Option<ShaderType> {
        match self.kind() {
            Some(kind) if !self.is_sampler() => ShaderType::vector(kind, 1),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        use ShaderType::*;
        match self {
            Void => "void",
            Float => "float",
            Vec2 => "vec2",
            Vec3 => "vec3",
            Vec4 => "vec4",
            Int => "int",
            IVec2 => "ivec2",
            IVec3 => "ivec3",
            IVec4 => "ivec4",
            Bool => "bool",
            BVec2 => "bvec2",
            BVec3 => "bvec3",
            BVec4 => "bvec4",
            Mat2 => "mat2",
            Mat3 => "mat3",
            Mat4 => "mat4",
            Sampler2D => "sampler2D",
            SamplerCube => "samplerCube",
        }
    }

    pub fn parse(name: &str) -> Option<ShaderType> {
        use ShaderType::*;
        Some(match name {
            "void" => Void,
            "float" => Float,
            "vec2" => Vec2,
            "vec3" => Vec3,
            "vec4" => Vec4,
            "int" => Int,
            "ivec2" => IVec2,
            "ivec3" => IVec3,
            "ivec4" => IVec4,
            "bool" => Bool,
            "bvec2" => BVec2,
            "bvec3" => BVec3,
            "bvec4" => BVec4,
            "mat2" => Mat2,
            "mat3" => Mat3,
            "mat4" => Mat4,
            "sampler2D" => Sampler2D,
            "samplerCube" => SamplerCube,
            _ => return None,
        })
    }
}

impl fmt::Display for ShaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_round_trips_through_kind_and_size() {
        for kind in [ScalarKind::Float, ScalarKind::Int, ScalarKind::Bool] {
            for size in 1..=4 {
                let ty = ShaderType::vector(kind, size).unwrap();
                assert_eq!(ty.kind(), Some(kind));
                assert_eq!(ty.components(), size);
            }
        }
        assert_eq!(ShaderType::vector(ScalarKind::Float, 5), None);
    }

    #[test]
    fn matrices_are_column_major_float_blocks() {
        assert_eq!(ShaderType::Mat3.components(), 9);
        assert_eq!(ShaderType::Mat3.matrix_dim(), 3);
        assert_eq!(ShaderType::Mat3.scalar(), Some(ShaderType::Float));
        assert!(ShaderType::Mat4.is_matrix());
        assert!(!ShaderType::Vec4.is_matrix());
    }

    #[test]
    fn samplers_hold_one_int_unit() {
        assert_eq!(ShaderType::Sampler2D.kind(), Some(ScalarKind::Int));
        assert_eq!(ShaderType::SamplerCube.components(), 1);
        assert_eq!(ShaderType::Sampler2D.scalar(), None);
    }

    #[test]
    fn names_parse_back() {
        for name in ["float", "bvec3", "mat4", "samplerCube", "void"] {
            assert_eq!(ShaderType::parse(name).unwrap().name(), name);
        }
        assert_eq!(ShaderType::parse("dvec2"), None);
    }
}
