//! Error types for resource storage.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while encoding atlases or reading and writing resource files.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// Reading or writing the resource file failed.
    #[error("resource file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An atlas could not be encoded, or stored bytes are not a valid atlas.
    #[error("atlas codec error: {0}")]
    Codec(String),

    /// A bucket or key name cannot be stored.
    #[error("invalid resource key '{bucket}/{key}': {reason}")]
    InvalidKey {
        bucket: String,
        key: String,
        reason: &'static str,
    },
}

impl ResourceError {
    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a codec error from any displayable cause.
    pub fn codec(stage: &str, cause: impl std::fmt::Display) -> Self {
        Self::Codec(format!("{stage}: {cause}"))
    }

    /// Create an invalid key error.
    pub fn invalid_key(bucket: &str, key: &str, reason: &'static str) -> Self {
        Self::InvalidKey {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            reason,
        }
    }
}

/// Result type for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;
