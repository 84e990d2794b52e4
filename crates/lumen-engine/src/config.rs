use crate::chain::MAX_BATCH_ROWS;
use crate::error::EngineError;
use crate::exec::VectorPaths;

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Rows per batch when a host splits a larger workload; `1..=MAX_BATCH_ROWS`.
    pub batch_rows: usize,
    pub vector_paths: VectorPaths,
    /// Fold constant subexpressions before running a shader.
    pub fold_constants: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_rows: MAX_BATCH_ROWS,
            vector_paths: VectorPaths::Wide8,
            fold_constants: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.batch_rows == 0 || self.batch_rows > MAX_BATCH_ROWS {
            return Err(EngineError::Config(format!(
                "batch_rows must be in 1..={MAX_BATCH_ROWS}, got {}",
                self.batch_rows
            )));
        }
        Ok(())
    }

    pub fn with_vector_paths(mut self, paths: VectorPaths) -> Self {
        self.vector_paths = paths;
        self
    }
}
