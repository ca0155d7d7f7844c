//! Configuration errors
//!
//! Everything here is fatal at construction. Per-tick conditions never error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("trailing distance ({trailing}) must exceed lookahead distance ({lookahead})")]
    WindowTooShort { trailing: f32, lookahead: f32 },
    #[error("height range is empty: min {min} > max {max}")]
    EmptyHeightRange { min: f32, max: f32 },
    #[error("failed to parse track settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read track settings: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
