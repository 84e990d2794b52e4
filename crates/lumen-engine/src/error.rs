use lumen_glsl::DeclError;

use crate::sync::LockError;

/// Errors surfaced by the registry, the constant folder, and the interpreter.
///
/// Malformed chains and mismatched column lengths are caller defects and are not
/// represented here.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The overload exists but one of its implementation slots is marked
    /// not implemented.
    #[error("builtin `{signature}` is not implemented")]
    Unimplemented { signature: String },

    /// No overload matches the exact `(name, parameter types)` key.
    #[error("no builtin overload matches `{call}`")]
    UnknownBuiltin { call: String },

    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("batch of {rows} rows exceeds the {max}-row chain limit")]
    BatchTooLarge { rows: usize, max: usize },

    #[error("row {row} is outside a batch of {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("no {expected} texture bound to sampler unit {unit}")]
    TextureUnit { unit: i32, expected: &'static str },

    #[error("texture of {width}x{height} texels needs {expected} texels, got {got}")]
    TextureSize { width: usize, height: usize, expected: usize, got: usize },

    #[error("invalid engine configuration: {0}")]
    Config(String),

    /// The registry lock could not be initialized; nothing was published.
    #[error("mutex initialization failed: {0}")]
    LockInit(#[from] LockError),

    #[error(transparent)]
    Declaration(#[from] DeclError),
}

impl EngineError {
    pub(crate) fn mismatch(expected: impl ToString, found: impl ToString) -> Self {
        EngineError::TypeMismatch { expected: expected.to_string(), found: found.to_string() }
    }
}
