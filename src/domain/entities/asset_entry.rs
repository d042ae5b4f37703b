//! Asset entry entity - one declared asset file and its content identity
//!
//! During a run entries carry absolute paths. The manifest stores them
//! relative to the app root with `/` separators, so moving the checkout does
//! not register as a change.

use std::path::{Component, Path, PathBuf};

use crate::domain::value_objects::ContentHash;

/// Normalize a path for manifest storage (always use forward slashes).
pub fn to_posix(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Parse a stored manifest path (handle both `/` and `\\` separators).
pub fn from_posix(s: &str) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(s.replace('/', "\\"))
    } else {
        PathBuf::from(s)
    }
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        lexical_normalize(&base.join(path))
    }
}

/// Express `path` relative to `base` without touching the file system.
///
/// Relative inputs are returned unchanged. Paths outside `base` climb with
/// `..` components.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    if !path.is_absolute() {
        return path.to_path_buf();
    }
    let path = lexical_normalize(path);
    let base = lexical_normalize(base);

    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..base_parts.len() {
        out.push("..");
    }
    for part in &path_parts[common..] {
        out.push(part.as_os_str());
    }
    out
}

/// Drop `.` components and fold `..` into their parent.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// A file taking part in a link run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetEntry {
    path: PathBuf,
    hash: ContentHash,
}

impl AssetEntry {
    pub fn new(path: impl Into<PathBuf>, hash: ContentHash) -> Self {
        Self {
            path: path.into(),
            hash,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    /// File name of the entry; empty when the path has none
    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Comparison key: root-relative POSIX path plus content hash
    pub fn key(&self, root: &Path) -> (String, ContentHash) {
        (to_posix(&relative_to(&self.path, root)), self.hash.clone())
    }

    /// The same entry with a root-relative path
    pub fn relative(&self, root: &Path) -> AssetEntry {
        AssetEntry::new(relative_to(&self.path, root), self.hash.clone())
    }

    /// The same entry with an absolute path
    pub fn absolute(&self, root: &Path) -> AssetEntry {
        AssetEntry::new(absolutize(&self.path, root), self.hash.clone())
    }

    pub fn with_hash(&self, hash: ContentHash) -> AssetEntry {
        AssetEntry::new(self.path.clone(), hash)
    }

    pub fn with_path(&self, path: impl Into<PathBuf>) -> AssetEntry {
        AssetEntry::new(path, self.hash.clone())
    }
}
