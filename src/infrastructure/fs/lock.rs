//! Advisory lock on a platform project
//!
//! Held for the whole platform run so two invocations never interleave their
//! writes to the same native files.

use std::fs::File;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{LinkError, LinkResult};

/// Lock file name inside the platform directory
pub const LOCK_FILE_NAME: &str = ".link-assets.lock";

/// Exclusive lock released on drop
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Block until the lock on `<dir>/.link-assets.lock` is held
    pub fn acquire(dir: &Path) -> LinkResult<Self> {
        let path = dir.join(LOCK_FILE_NAME);
        let file = File::create(&path).map_err(|e| LinkError::Lock {
            path: path.clone(),
            message: e.to_string(),
        })?;
        file.lock_exclusive().map_err(|e| LinkError::Lock {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
