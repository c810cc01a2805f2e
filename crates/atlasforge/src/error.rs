//! Error types for the packer.

use std::path::PathBuf;

use atlasforge_core::AtlasError;
use atlasforge_resources::ResourceError;
use thiserror::Error;

/// Errors that can abort a single atlas request or project file.
#[derive(Error, Debug)]
pub enum PackError {
    /// Reading a project file or directory failed.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An atlas configuration file could not be parsed.
    #[error("invalid atlas configuration '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// The file name does not end in a known atlas suffix.
    #[error("unsupported atlas configuration format: '{0}'")]
    UnsupportedFormat(PathBuf),

    /// The requested font is not in the resource file.
    #[error("font '{0}' not found in resource file")]
    FontNotFound(String),

    /// Layout failed: bad character range, bad font data or size.
    #[error(transparent)]
    Atlas(#[from] AtlasError),

    /// Encoding or storing the atlas failed.
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl PackError {
    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error for `path`.
    pub fn config(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for packer operations.
pub type PackResult<T> = Result<T, PackError>;
