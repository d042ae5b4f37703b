//! FileSystem port - abstraction over file I/O operations
//!
//! Appliers copy, remove and rewrite native project files through this
//! trait so they can be exercised against a temp directory or a dry-run
//! recorder.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::value_objects::ContentHash;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    /// File not found
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Permission denied
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(std::io::Error),
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl FsError {
    /// Classify an I/O error against the path it happened on
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        FsError::at(Path::new(""), err)
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic writes
pub trait FileSystem: Send + Sync {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Read raw file bytes
    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Write content to file atomically, creating parent directories
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Copy a file, creating the destination's parent directories
    fn copy(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Check if file exists
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file; missing files are not an error
    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Compute content hash (SHA256)
    fn hash(&self, path: &Path) -> FsResult<ContentHash>;
}
