//! Link Result
//!
//! Result types for link operations.

use std::path::PathBuf;

use crate::domain::value_objects::Platform;

/// Outcome of one platform run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformReport {
    pub platform: Platform,
    /// The platform directory was missing and nothing ran
    pub skipped: bool,
    /// Entries linked across all asset classes
    pub added: usize,
    /// Entries unlinked across all asset classes
    pub removed: usize,
    /// Native files written (or that would be written on a dry run)
    pub native_files: Vec<PathBuf>,
    /// Entries recorded in the manifest
    pub manifest_entries: usize,
}

impl PlatformReport {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            skipped: false,
            added: 0,
            removed: 0,
            native_files: Vec::new(),
            manifest_entries: 0,
        }
    }

    pub fn skipped(platform: Platform) -> Self {
        Self {
            skipped: true,
            ..Self::new(platform)
        }
    }

    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.removed > 0 || !self.native_files.is_empty()
    }
}

/// Result of a link operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub platforms: Vec<PlatformReport>,
}

impl LinkReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn platform(&self, platform: Platform) -> Option<&PlatformReport> {
        self.platforms.iter().find(|r| r.platform == platform)
    }

    pub fn has_changes(&self) -> bool {
        self.platforms.iter().any(PlatformReport::has_changes)
    }

    pub fn added(&self) -> usize {
        self.platforms.iter().map(|r| r.added).sum()
    }

    pub fn removed(&self) -> usize {
        self.platforms.iter().map(|r| r.removed).sum()
    }
}
