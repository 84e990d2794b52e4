use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Which wide paths the traversal may take.
///
/// Results are identical under every policy; narrowing it only changes how
/// many rows each kernel call covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VectorPaths {
    /// 8-wide runs, then 4-wide runs, then single rows.
    #[default]
    Wide8,
    /// 4-wide runs, then single rows.
    Wide4,
    /// Single rows only.
    Scalar,
}

impl VectorPaths {
    pub const ALL: [VectorPaths; 3] = [VectorPaths::Wide8, VectorPaths::Wide4, VectorPaths::Scalar];

    #[inline]
    pub const fn wide8(self) -> bool {
        matches!(self, VectorPaths::Wide8)
    }

    #[inline]
    pub const fn wide4(self) -> bool {
        !matches!(self, VectorPaths::Scalar)
    }

    pub const fn name(self) -> &'static str {
        match self {
            VectorPaths::Wide8 => "wide8",
            VectorPaths::Wide4 => "wide4",
            VectorPaths::Scalar => "scalar",
        }
    }
}

impl fmt::Display for VectorPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VectorPaths {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VectorPaths::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EngineError::Config(format!("unknown vector path policy `{s}`")))
    }
}
