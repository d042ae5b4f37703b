//! File System Content Loader
//!
//! Expands declared asset paths into hashed entries. Directories are walked
//! in sorted order so runs are deterministic; hashing is spread over a small
//! pool of scoped threads.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::entities::{absolutize, AssetEntry};
use crate::domain::ports::{BasenameConflict, ContentLoader, FileSystem, FsError, LoadedAssets};
use crate::domain::value_objects::ContentHash;
use crate::error::{LinkError, LinkResult};
use crate::infrastructure::fs::LocalFs;

/// Upper bound on hashing threads
const MAX_HASH_WORKERS: usize = 8;

/// Content loader over the local file system
pub struct FsContentLoader<F: FileSystem = LocalFs> {
    fs: F,
}

impl FsContentLoader<LocalFs> {
    /// Create a new loader with the local file system
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for FsContentLoader<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> FsContentLoader<F> {
    /// Create with a custom file system
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// Files under one declared path, in sorted walk order
    fn expand(&self, root: &Path, declared: &Path) -> LinkResult<Vec<PathBuf>> {
        let path = absolutize(declared, root);
        if !path.exists() {
            return Err(LinkError::AssetNotFound {
                path: declared.to_path_buf(),
            });
        }
        if path.is_file() {
            return Ok(vec![path]);
        }

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&path)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();
        for entry in walker {
            let entry = entry.map_err(|e| LinkError::fs("walk", &path, FsError::Other(e.to_string())))?;
            if entry.file_type().is_some_and(|t| t.is_file()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Hash files on scoped worker threads, keeping input order
    fn hash_all(&self, files: &[PathBuf]) -> LinkResult<Vec<ContentHash>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }
        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
            .clamp(1, MAX_HASH_WORKERS);
        let chunk_size = files.len().div_ceil(workers);

        std::thread::scope(|scope| {
            let handles: Vec<_> = files
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|file| {
                                self.fs
                                    .hash(file)
                                    .map_err(|e| LinkError::fs("hash", file, e))
                            })
                            .collect::<LinkResult<Vec<_>>>()
                    })
                })
                .collect();

            let mut hashes = Vec::with_capacity(files.len());
            for handle in handles {
                let chunk = handle
                    .join()
                    .map_err(|_| LinkError::Io(std::io::Error::other("hashing thread panicked")))?;
                hashes.extend(chunk?);
            }
            Ok(hashes)
        })
    }
}

impl<F: FileSystem> ContentLoader for FsContentLoader<F> {
    fn load(&self, root: &Path, declared: &[PathBuf]) -> LinkResult<LoadedAssets> {
        let mut files = Vec::new();
        for path in declared {
            files.extend(self.expand(root, path)?);
        }
        let hashes = self.hash_all(&files)?;

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for (file, hash) in files.into_iter().zip(hashes) {
            let entry = AssetEntry::new(file, hash);
            if seen.insert((entry.basename(), entry.hash().clone())) {
                entries.push(entry);
            }
        }

        Ok(LoadedAssets {
            conflicts: basename_conflicts(&entries),
            entries,
        })
    }
}

/// Basenames carried by more than one distinct content
fn basename_conflicts(entries: &[AssetEntry]) -> Vec<BasenameConflict> {
    let mut order = Vec::new();
    let mut by_name: HashMap<String, Vec<PathBuf>> = HashMap::new();
    for entry in entries {
        let name = entry.basename();
        let paths = by_name.entry(name.clone()).or_insert_with(|| {
            order.push(name);
            Vec::new()
        });
        paths.push(entry.path().to_path_buf());
    }
    order
        .into_iter()
        .filter_map(|basename| {
            let paths = by_name.remove(&basename)?;
            (paths.len() > 1).then_some(BasenameConflict { basename, paths })
        })
        .collect()
}
