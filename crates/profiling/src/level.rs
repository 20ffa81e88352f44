//! Profiling verbosity levels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How much timing information gets recorded.
///
/// Levels are ordered: a profiler configured at [`ProfilingLevel::Full`]
/// records everything [`ProfilingLevel::Basic`] records and more.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum ProfilingLevel {
    /// Nothing is recorded
    #[default]
    None,
    /// Coarse-grained operations only
    Basic,
    /// Every instrumented operation
    Full,
}

impl ProfilingLevel {
    /// Canonical upper-case name, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Basic => "BASIC",
            Self::Full => "FULL",
        }
    }
}

impl fmt::Display for ProfilingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while configuring profiling
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfilingError {
    /// The level string is not one of NONE, BASIC or FULL
    #[error("Unknown profiling level '{0}', expected one of NONE, BASIC, FULL")]
    UnknownLevel(String),
}

impl FromStr for ProfilingLevel {
    type Err = ProfilingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "BASIC" => Ok(Self::Basic),
            "FULL" => Ok(Self::Full),
            _ => Err(ProfilingError::UnknownLevel(s.to_owned())),
        }
    }
}

impl TryFrom<String> for ProfilingLevel {
    type Error = ProfilingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
