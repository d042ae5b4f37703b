//! ContentLoader port - expands declared asset paths into hashed entries
//!
//! This trait allows the link use case to obtain the current asset set
//! without knowing how directories are walked or files hashed.

use std::path::{Path, PathBuf};

use crate::domain::entities::AssetEntry;
use crate::error::LinkResult;

/// Two declared files share a basename but not their content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasenameConflict {
    pub basename: String,
    /// Declaration order; the last one wins at apply time
    pub paths: Vec<PathBuf>,
}

/// Output of one load
#[derive(Debug, Clone, Default)]
pub struct LoadedAssets {
    /// Absolute entries, deduplicated by `(basename, hash)`
    pub entries: Vec<AssetEntry>,
    pub conflicts: Vec<BasenameConflict>,
}

/// Abstract loader for the declared asset set
pub trait ContentLoader: Send + Sync {
    /// Expand `declared` (relative paths resolve against `root`).
    ///
    /// Fails with `LinkError::AssetNotFound` when a declared path is missing.
    fn load(&self, root: &Path, declared: &[PathBuf]) -> LinkResult<LoadedAssets>;
}
