//! Error types for asset-link
//!
//! Library errors use `thiserror`; the binary wraps them with `anyhow`.
//! Only conditions that abort the whole run live here. Degraded conditions
//! (missing Xcode project, unpatchable source file, unreadable font) are
//! reported through `LinkEventSink` instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{FsError, ManifestError};

/// Result type alias for asset-link operations
pub type LinkResult<T> = Result<T, LinkError>;

/// Fatal errors for a link run
#[derive(Error, Debug)]
pub enum LinkError {
    /// Root path does not exist or is not a directory
    #[error("'rootPath' must be a valid directory, got {path}")]
    InvalidRoot { path: PathBuf },

    /// A declared asset path does not exist
    #[error("asset not found: {path}")]
    AssetNotFound { path: PathBuf },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Manifest could not be persisted
    #[error("manifest error for {platform}: {source}")]
    Manifest {
        platform: String,
        #[source]
        source: ManifestError,
    },

    /// File system operation failed
    #[error("{action} {path}: {source}")]
    Fs {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// Another run holds the platform lock and it could not be acquired
    #[error("could not lock {path}: {message}")]
    Lock { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LinkError {
    pub(crate) fn fs(action: &'static str, path: impl Into<PathBuf>, source: FsError) -> Self {
        LinkError::Fs {
            action,
            path: path.into(),
            source,
        }
    }
}
