use lumen_glsl::{Scalar, ScalarKind};

use super::Column;

/// A column tagged with its element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Lane {
    Float(Column<f32>),
    Int(Column<i32>),
    Bool(Column<bool>),
}

impl Lane {
    /// A lane of `rows` copies of `value`.
    pub fn splat(value: Scalar, rows: usize) -> Self {
        match value {
            Scalar::Float(x) => Lane::Float(Column::new(rows, x)),
            Scalar::Int(x) => Lane::Int(Column::new(rows, x)),
            Scalar::Bool(x) => Lane::Bool(Column::new(rows, x)),
        }
    }

    pub fn zeroed(kind: ScalarKind, rows: usize) -> Self {
        match kind {
            ScalarKind::Float => Lane::Float(Column::new(rows, 0.0)),
            ScalarKind::Int => Lane::Int(Column::new(rows, 0)),
            ScalarKind::Bool => Lane::Bool(Column::new(rows, false)),
        }
    }

    pub const fn kind(&self) -> ScalarKind {
        match self {
            Lane::Float(_) => ScalarKind::Float,
            Lane::Int(_) => ScalarKind::Int,
            Lane::Bool(_) => ScalarKind::Bool,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Lane::Float(c) => c.len(),
            Lane::Int(c) => c.len(),
            Lane::Bool(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, row: usize) -> Option<Scalar> {
        match self {
            Lane::Float(c) => c.get(row).map(Scalar::Float),
            Lane::Int(c) => c.get(row).map(Scalar::Int),
            Lane::Bool(c) => c.get(row).map(Scalar::Bool),
        }
    }
}
