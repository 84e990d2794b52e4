use bytemuck::Pod;

/// One scalar per row of a batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column<T> {
    data: Vec<T>,
}

impl<T: Copy> Column<T> {
    #[inline]
    pub fn new(rows: usize, fill: T) -> Self {
        Self { data: vec![fill; rows] }
    }

    #[inline]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize) -> Option<T> {
        self.data.get(row).copied()
    }

    /// Writes `value` at `row`; out-of-range rows are ignored and reported as `false`.
    #[inline]
    pub fn set(&mut self, row: usize, value: T) -> bool {
        match self.data.get_mut(row) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Pod> Column<T> {
    /// Raw bytes of the column, for bit-exact comparisons and fingerprints.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_ignores_out_of_range_rows() {
        let mut c = Column::new(4, 0i32);
        assert!(c.set(3, 7));
        assert!(!c.set(4, 9));
        assert_eq!(c.as_slice(), &[0, 0, 0, 7]);
    }

    #[test]
    fn bytes_distinguish_signed_zero() {
        let a = Column::from_vec(vec![0.0f32]);
        let b = Column::from_vec(vec![-0.0f32]);
        assert_eq!(a, b);
        assert_ne!(a.as_bytes(), b.as_bytes());
    }
}
