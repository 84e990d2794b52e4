use std::fmt;

/// An error raised while parsing a builtin declaration such as
/// `"genType clamp(genType, float, float)"`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclError {
    pub message: String,
    /// 1-based column of the offending token within the declaration.
    pub col: usize,
}

impl DeclError {
    pub(crate) fn new(msg: impl Into<String>, col: usize) -> Self {
        Self { message: msg.into(), col }
    }
}

impl fmt::Display for DeclError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "declaration error at column {}: {}", self.col, self.message)
    }
}

impl std::error::Error for DeclError {}
