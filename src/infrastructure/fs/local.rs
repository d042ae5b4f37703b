//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};
use crate::domain::value_objects::ContentHash;

/// Local file system implementation
///
/// Writes go to a temp file in the destination directory and are renamed
/// into place, so a crash never leaves a half-written project file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(&self, path: &Path) -> FsResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))
            }
            _ => Ok(()),
        }
    }
}

/// Write bytes to `path` through a sibling temp file and rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> FsResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| FsError::at(dir, e))?;
    temp.write_all(content).map_err(|e| FsError::at(path, e))?;
    temp.as_file().sync_all().map_err(|e| FsError::at(path, e))?;
    temp.persist(path).map_err(|e| FsError::at(path, e.error))?;
    Ok(())
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| FsError::at(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.ensure_parent(path)?;
        atomic_write(path, content.as_bytes())
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        self.ensure_parent(to)?;
        std::fs::copy(from, to).map_err(|e| FsError::at(from, e))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FsError::at(path, e)),
        }
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn hash(&self, path: &Path) -> FsResult<ContentHash> {
        let file = File::open(path).map_err(|e| FsError::at(path, e))?;
        ContentHash::from_reader(file).map_err(|e| FsError::at(path, e))
    }
}
