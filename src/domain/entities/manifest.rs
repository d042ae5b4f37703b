//! Manifest entity - the asset set applied to a platform by the previous run
//!
//! Pure data; reading, migrating and writing live in `ManifestRepository`.

use super::asset_entry::AssetEntry;
use crate::domain::services::migrations::LATEST_SCHEMA_VERSION;

/// File name of the manifest inside a platform project root
pub const MANIFEST_FILE_NAME: &str = "link-assets-manifest.json";

/// Persisted record of linked assets for one platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    schema_version: u32,
    entries: Vec<AssetEntry>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

impl Manifest {
    /// Create a new empty manifest at the latest schema
    pub fn new() -> Self {
        Self {
            schema_version: LATEST_SCHEMA_VERSION,
            entries: Vec::new(),
        }
    }

    /// Manifest with root-relative entries at the latest schema
    pub fn from_entries(entries: Vec<AssetEntry>) -> Self {
        Self {
            schema_version: LATEST_SCHEMA_VERSION,
            entries,
        }
    }

    /// Manifest as stored on disk, before migrations
    pub fn stored(schema_version: u32, entries: Vec<AssetEntry>) -> Self {
        Self {
            schema_version,
            entries,
        }
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<AssetEntry> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
