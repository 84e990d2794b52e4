use std::ops::Range;
use std::sync::Arc;

use lumen_glsl::Value;

use crate::chain::ActiveChain;
use crate::column::{ColumnStore, Register};
use crate::error::EngineError;
use crate::texture::TextureUnits;

/// One batch of shader invocations: inputs, locals and outputs by name, the
/// rows still running, and the rows a fragment shader discarded.
#[derive(Debug, Clone)]
pub struct Batch {
    store: ColumnStore,
    chain: ActiveChain,
    discarded: Vec<bool>,
    textures: Arc<TextureUnits>,
}

impl Batch {
    /// A batch of `rows` invocations, all live.
    pub fn new(rows: usize) -> Result<Self, EngineError> {
        Ok(Self::with_chain(ActiveChain::full(rows)?))
    }

    /// A batch where only the rows set in `mask` run.
    pub fn with_mask(mask: &[bool]) -> Result<Self, EngineError> {
        Ok(Self::with_chain(ActiveChain::from_mask(mask)?))
    }

    fn with_chain(chain: ActiveChain) -> Self {
        let rows = chain.rows();
        Self {
            store: ColumnStore::new(rows),
            chain,
            discarded: vec![false; rows],
            textures: Arc::new(TextureUnits::new()),
        }
    }

    pub fn with_textures(mut self, textures: Arc<TextureUnits>) -> Self {
        self.textures = textures;
        self
    }

    /// Splits `total` invocations into consecutive batches of at most
    /// `batch_rows` rows.
    pub fn ranges(total: usize, batch_rows: usize) -> impl Iterator<Item = Range<usize>> {
        let step = batch_rows.max(1);
        (0..total).step_by(step).map(move |start| start..(start + step).min(total))
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.chain.rows()
    }

    /// Rows still running; shrinks as rows are discarded.
    #[inline]
    pub fn chain(&self) -> &ActiveChain {
        &self.chain
    }

    pub fn store(&self) -> &ColumnStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ColumnStore {
        &mut self.store
    }

    pub fn textures(&self) -> &TextureUnits {
        &self.textures
    }

    pub fn discarded(&self) -> &[bool] {
        &self.discarded
    }

    pub fn is_discarded(&self, row: usize) -> bool {
        self.discarded.get(row).copied().unwrap_or(false)
    }

    /// Binds a per-row input (attribute or varying).
    pub fn set_input(&mut self, name: impl Into<String>, register: Register) -> Result<(), EngineError> {
        self.store.insert(name, register).map(drop)
    }

    /// Binds a uniform: the same value on every row.
    pub fn set_uniform(&mut self, name: impl Into<String>, value: &Value) -> Result<(), EngineError> {
        let register = Register::splat(value, self.rows());
        self.set_input(name, register)
    }

    pub fn variable(&self, name: &str) -> Result<&Register, EngineError> {
        self.store.get(name).ok_or_else(|| EngineError::UnknownVariable(name.to_owned()))
    }

    /// The value of `name` at `row`.
    pub fn value(&self, name: &str, row: usize) -> Result<Value, EngineError> {
        self.variable(name)?
            .row_value(row)
            .ok_or(EngineError::RowOutOfRange { row, rows: self.rows() })
    }

    /// Flags the live rows of `chain` as discarded and stops them.
    pub(crate) fn discard(&mut self, chain: &ActiveChain) {
        for row in chain.iter() {
            self.discarded[row] = true;
        }
        let discarded = &self.discarded;
        self.chain = self.chain.filter(|row| !discarded[row]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_glsl::ShaderType;

    #[test]
    fn new_batch_is_fully_live() {
        let b = Batch::new(5).unwrap();
        assert_eq!(b.chain().live_count(), 5);
        assert!(b.discarded().iter().all(|d| !d));
        assert!(matches!(Batch::new(300), Err(EngineError::BatchTooLarge { rows: 300, .. })));
    }

    #[test]
    fn uniforms_are_splatted() {
        let mut b = Batch::new(3).unwrap();
        b.set_uniform("scale", &Value::vec2(2.0, 0.5)).unwrap();
        assert_eq!(b.value("scale", 2).unwrap(), Value::vec2(2.0, 0.5));
        assert!(matches!(b.value("scale", 3), Err(EngineError::RowOutOfRange { row: 3, rows: 3 })));
        assert!(matches!(b.variable("missing"), Err(EngineError::UnknownVariable(_))));
    }

    #[test]
    fn inputs_must_match_the_row_count() {
        let mut b = Batch::new(4).unwrap();
        assert!(b.set_input("a", Register::zeroed(ShaderType::Float, 2)).is_err());
        assert!(b.set_input("a", Register::zeroed(ShaderType::Float, 4)).is_ok());
    }

    #[test]
    fn discard_removes_rows_from_the_chain() {
        let mut b = Batch::with_mask(&[true, true, false, true]).unwrap();
        let sub = ActiveChain::from_rows(4, &[1, 3]).unwrap();
        b.discard(&sub);
        assert_eq!(b.chain().iter().collect::<Vec<_>>(), vec![0]);
        assert!(b.is_discarded(3));
        assert!(!b.is_discarded(2));
        assert!(!b.is_discarded(99));
    }

    #[test]
    fn ranges_cover_the_workload() {
        let r: Vec<_> = Batch::ranges(600, 256).collect();
        assert_eq!(r, vec![0..256, 256..512, 512..600]);
        assert_eq!(Batch::ranges(0, 256).count(), 0);
    }
}
