//! JSON Manifest Repository
//!
//! Implements the ManifestRepository port with `link-assets-manifest.json`
//! in the platform project root. Reads the current document as well as the
//! legacy shapes, then migrates.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{from_posix, to_posix, AssetEntry, Manifest, MANIFEST_FILE_NAME};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::manifest_repository::{
    ManifestError, ManifestRepository, ManifestResult,
};
use crate::domain::ports::FsError;
use crate::domain::services::migrate;
use crate::domain::value_objects::{ContentHash, Platform};
use crate::infrastructure::fs::LocalFs;

/// JSON-based manifest repository
pub struct JsonManifestRepository<F: FileSystem = LocalFs> {
    fs: F,
}

impl JsonManifestRepository<LocalFs> {
    /// Create a new repository with the default file system
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for JsonManifestRepository<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> JsonManifestRepository<F> {
    /// Create with a custom file system (for testing)
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// Location of the manifest inside a platform root
    pub fn path_for(platform_root: &Path) -> PathBuf {
        platform_root.join(MANIFEST_FILE_NAME)
    }
}

/// JSON representation of one entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonEntry {
    path: String,
    content_hash: String,
}

/// JSON representation of the current manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonManifest {
    schema_version: u32,
    #[serde(default)]
    entries: Vec<JsonEntry>,
}

/// Entry written by the legacy tool
#[derive(Debug, Clone, Deserialize)]
struct LegacyEntry {
    path: String,
    sha1: String,
}

/// Manifest written by the legacy tool
///
/// Its `migIndex` counts a different migration list, so every legacy document
/// starts from schema 0.
#[derive(Debug, Clone, Deserialize)]
struct LegacyManifest {
    data: Vec<LegacyEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum StoredManifest {
    Current(JsonManifest),
    Legacy(LegacyManifest),
    /// Oldest form: a bare list of linked paths
    Paths(Vec<String>),
}

fn parse(content: &str) -> ManifestResult<Manifest> {
    let stored: StoredManifest = serde_json::from_str(content)
        .map_err(|e| ManifestError::InvalidFormat(e.to_string()))?;

    let manifest = match stored {
        StoredManifest::Current(doc) => Manifest::stored(
            doc.schema_version,
            doc.entries
                .into_iter()
                .map(|e| AssetEntry::new(from_posix(&e.path), ContentHash::new(e.content_hash)))
                .collect(),
        ),
        StoredManifest::Legacy(doc) => Manifest::stored(
            0,
            doc.data
                .into_iter()
                .map(|e| AssetEntry::new(from_posix(&e.path), ContentHash::new(e.sha1)))
                .collect(),
        ),
        StoredManifest::Paths(paths) => Manifest::stored(
            0,
            paths
                .iter()
                .map(|p| AssetEntry::new(from_posix(p), ContentHash::stale()))
                .collect(),
        ),
    };
    Ok(manifest)
}

fn render(entries: &[AssetEntry]) -> ManifestResult<String> {
    let doc = JsonManifest {
        schema_version: Manifest::new().schema_version(),
        entries: entries
            .iter()
            .map(|e| JsonEntry {
                path: to_posix(e.path()),
                content_hash: e.hash().to_string(),
            })
            .collect(),
    };
    let mut out = serde_json::to_string_pretty(&doc)
        .map_err(|e| ManifestError::InvalidFormat(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

fn io_error(err: FsError) -> ManifestError {
    match err {
        FsError::Io(e) => ManifestError::Io(e),
        other => ManifestError::Io(std::io::Error::other(other.to_string())),
    }
}

impl<F: FileSystem> ManifestRepository for JsonManifestRepository<F> {
    fn read(&self, platform_root: &Path, platform: Platform) -> ManifestResult<Manifest> {
        let path = Self::path_for(platform_root);
        if !self.fs.exists(&path) {
            return Ok(Manifest::new());
        }
        let content = self.fs.read(&path).map_err(io_error)?;
        Ok(migrate(parse(&content)?, platform))
    }

    fn write(&self, platform_root: &Path, entries: &[AssetEntry]) -> ManifestResult<()> {
        let content = render(entries)?;
        self.fs
            .write(&Self::path_for(platform_root), &content)
            .map_err(io_error)
    }
}
