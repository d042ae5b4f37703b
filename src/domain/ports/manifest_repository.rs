//! ManifestRepository port - abstraction for manifest persistence
//!
//! This trait allows the application layer to load and save the per-platform
//! manifest without knowing about the JSON document or its legacy shapes.

use std::path::Path;

use crate::domain::entities::{AssetEntry, Manifest};
use crate::domain::value_objects::Platform;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Manifest operation errors
#[derive(Debug)]
pub enum ManifestError {
    /// Invalid manifest document
    InvalidFormat(String),
    /// I/O error
    Io(std::io::Error),
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::InvalidFormat(msg) => write!(f, "Invalid manifest format: {}", msg),
            ManifestError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestError::Io(err) => Some(err),
            ManifestError::InvalidFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for ManifestError {
    fn from(err: std::io::Error) -> Self {
        ManifestError::Io(err)
    }
}

/// Abstract repository for manifest persistence
pub trait ManifestRepository: Send + Sync {
    /// Load and migrate the manifest under `platform_root`.
    ///
    /// A missing manifest is an empty one, not an error.
    fn read(&self, platform_root: &Path, platform: Platform) -> ManifestResult<Manifest>;

    /// Persist the full entry set at the latest schema
    fn write(&self, platform_root: &Path, entries: &[AssetEntry]) -> ManifestResult<()>;
}
