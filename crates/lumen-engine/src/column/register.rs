use lumen_glsl::{Components, Scalar, ScalarKind, ShaderType, Value};

use super::{Column, Lane};
use crate::error::EngineError;

/// One shading value across a batch: `ty.components()` lanes of `rows` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Register {
    ty: ShaderType,
    rows: usize,
    lanes: Vec<Lane>,
}

impl Register {
    /// All components zero (or false). `void` has no lanes.
    pub fn zeroed(ty: ShaderType, rows: usize) -> Self {
        let lanes = match ty.kind() {
            Some(kind) => (0..ty.components()).map(|_| Lane::zeroed(kind, rows)).collect(),
            None => Vec::new(),
        };
        Self { ty, rows, lanes }
    }

    /// Every row holds `value` (constant operands, uniforms).
    pub fn splat(value: &Value, rows: usize) -> Self {
        let lanes = (0..value.components())
            .filter_map(|i| value.component(i))
            .map(|c| Lane::splat(c, rows))
            .collect();
        Self { ty: value.ty(), rows, lanes }
    }

    /// Builds a register from explicit lanes, checking count, kind and length.
    pub fn from_lanes(ty: ShaderType, lanes: Vec<Lane>) -> Result<Self, EngineError> {
        let rows = lanes.first().map(Lane::len).unwrap_or(0);
        if lanes.len() != ty.components()
            || lanes.iter().any(|l| Some(l.kind()) != ty.kind() || l.len() != rows)
        {
            return Err(EngineError::mismatch(
                format!("{} lanes of {ty}", ty.components()),
                format!("{} lanes", lanes.len()),
            ));
        }
        Ok(Self { ty, rows, lanes })
    }

    /// Convenience for float-kind registers: one `Vec` per component.
    pub fn from_floats(ty: ShaderType, lanes: Vec<Vec<f32>>) -> Result<Self, EngineError> {
        Self::from_lanes(ty, lanes.into_iter().map(|l| Lane::Float(Column::from_vec(l))).collect())
    }

    /// One value per row; every value must have type `ty`.
    pub fn from_values(ty: ShaderType, values: &[Value]) -> Result<Self, EngineError> {
        let mut reg = Self::zeroed(ty, values.len());
        for (row, v) in values.iter().enumerate() {
            if v.ty() != ty {
                return Err(EngineError::mismatch(ty, v.ty()));
            }
            for (i, lane) in reg.lanes.iter_mut().enumerate() {
                match (lane, v.data()) {
                    (Lane::Float(c), Components::Float(d)) => { c.set(row, d[i]); }
                    (Lane::Int(c), Components::Int(d)) => { c.set(row, d[i]); }
                    (Lane::Bool(c), Components::Bool(d)) => { c.set(row, d[i]); }
                    _ => return Err(EngineError::mismatch(ty, v.ty())),
                }
            }
        }
        Ok(reg)
    }

    #[inline]
    pub fn ty(&self) -> ShaderType {
        self.ty
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    #[inline]
    pub fn lane(&self, i: usize) -> Option<&Lane> {
        self.lanes.get(i)
    }

    #[inline]
    pub fn lane_mut(&mut self, i: usize) -> Option<&mut Lane> {
        self.lanes.get_mut(i)
    }

    /// The value held at `row`.
    pub fn row_value(&self, row: usize) -> Option<Value> {
        if row >= self.rows {
            return None;
        }
        let data = match self.ty.kind()? {
            ScalarKind::Float => Components::Float(
                self.lanes.iter().map(|l| match l.get(row) {
                    Some(Scalar::Float(x)) => Some(x),
                    _ => None,
                }).collect::<Option<_>>()?,
            ),
            ScalarKind::Int => Components::Int(
                self.lanes.iter().map(|l| match l.get(row) {
                    Some(Scalar::Int(x)) => Some(x),
                    _ => None,
                }).collect::<Option<_>>()?,
            ),
            ScalarKind::Bool => Components::Bool(
                self.lanes.iter().map(|l| match l.get(row) {
                    Some(Scalar::Bool(x)) => Some(x),
                    _ => None,
                }).collect::<Option<_>>()?,
            ),
        };
        Value::new(self.ty, data)
    }

    // ── Typed lane access ─────────────────────────────────────────────────

    pub fn floats(&self, i: usize) -> Result<&[f32], EngineError> {
        match self.lanes.get(i) {
            Some(Lane::Float(c)) => Ok(c.as_slice()),
            _ => Err(self.lane_mismatch("float", i)),
        }
    }

    pub fn floats_mut(&mut self, i: usize) -> Result<&mut [f32], EngineError> {
        let err = self.lane_mismatch("float", i);
        match self.lanes.get_mut(i) {
            Some(Lane::Float(c)) => Ok(c.as_mut_slice()),
            _ => Err(err),
        }
    }

    pub fn ints(&self, i: usize) -> Result<&[i32], EngineError> {
        match self.lanes.get(i) {
            Some(Lane::Int(c)) => Ok(c.as_slice()),
            _ => Err(self.lane_mismatch("int", i)),
        }
    }

    pub fn ints_mut(&mut self, i: usize) -> Result<&mut [i32], EngineError> {
        let err = self.lane_mismatch("int", i);
        match self.lanes.get_mut(i) {
            Some(Lane::Int(c)) => Ok(c.as_mut_slice()),
            _ => Err(err),
        }
    }

    pub fn bools(&self, i: usize) -> Result<&[bool], EngineError> {
        match self.lanes.get(i) {
            Some(Lane::Bool(c)) => Ok(c.as_slice()),
            _ => Err(self.lane_mismatch("bool", i)),
        }
    }

    pub fn bools_mut(&mut self, i: usize) -> Result<&mut [bool], EngineError> {
        let err = self.lane_mismatch("bool", i);
        match self.lanes.get_mut(i) {
            Some(Lane::Bool(c)) => Ok(c.as_mut_slice()),
            _ => Err(err),
        }
    }

    fn lane_mismatch(&self, kind: &str, i: usize) -> EngineError {
        EngineError::mismatch(format!("{kind} lane {i}"), format!("{} register", self.ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_matrix_has_column_major_lanes() {
        let r = Register::zeroed(ShaderType::Mat3, 5);
        assert_eq!(r.lanes().len(), 9);
        assert_eq!(r.floats(8).unwrap().len(), 5);
    }

    #[test]
    fn splat_then_row_value_round_trips() {
        let v = Value::vec3(1.0, -2.0, 0.5);
        let r = Register::splat(&v, 4);
        assert_eq!(r.row_value(3).unwrap(), v);
        assert!(r.row_value(4).is_none());
    }

    #[test]
    fn typed_access_reports_kind_mismatch() {
        let r = Register::zeroed(ShaderType::BVec2, 2);
        assert!(r.bools(1).is_ok());
        assert!(matches!(r.floats(0), Err(EngineError::TypeMismatch { .. })));
        assert!(r.bools(2).is_err());
    }

    #[test]
    fn from_values_places_one_value_per_row() {
        let r = Register::from_values(
            ShaderType::Vec2,
            &[Value::vec2(1.0, 2.0), Value::vec2(3.0, 4.0)],
        )
        .unwrap();
        assert_eq!(r.floats(0).unwrap(), &[1.0, 3.0]);
        assert_eq!(r.floats(1).unwrap(), &[2.0, 4.0]);
        assert!(Register::from_values(ShaderType::Vec2, &[Value::float(1.0)]).is_err());
    }

    #[test]
    fn from_lanes_rejects_ragged_lanes() {
        let lanes = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(Register::from_floats(ShaderType::Vec2, lanes).is_err());
    }
}
