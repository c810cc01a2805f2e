//! Error types for the atlas core.

use thiserror::Error;

/// Errors that can occur while building a glyph atlas.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// A character range endpoint was not exactly one code point.
    #[error("invalid character range [{low:?}, {high:?}]: {reason}")]
    InvalidRangeFormat {
        low: String,
        high: String,
        reason: &'static str,
    },

    /// The font binary could not be parsed.
    #[error("failed to parse font: {0}")]
    FontParse(String),

    /// The requested pixel size is not usable.
    #[error("invalid font size: {0}")]
    InvalidSize(f32),
}

impl AtlasError {
    /// Create a range format error for the given endpoints.
    pub fn invalid_range(low: &str, high: &str, reason: &'static str) -> Self {
        Self::InvalidRangeFormat {
            low: low.to_owned(),
            high: high.to_owned(),
            reason,
        }
    }
}

/// Result type for atlas operations.
pub type AtlasResult<T> = Result<T, AtlasError>;
