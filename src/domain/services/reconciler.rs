//! Reconciliation service
//!
//! Pure domain logic that compares the previous manifest with the freshly
//! loaded asset set and decides, per asset class, what to unlink and what to
//! link. No file system access happens here.

use std::collections::HashSet;
use std::path::Path;

use crate::domain::entities::AssetEntry;
use crate::domain::value_objects::{AssetClass, ContentHash, IgnorePatterns, Platform};

/// Changes for one asset class
///
/// A path whose content changed is listed in both sets; appliers clean
/// before they copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassChangeSet {
    pub class: AssetClass,
    /// Previously linked entries to unlink (absolute paths)
    pub to_remove: Vec<AssetEntry>,
    /// Entries to link (absolute paths)
    pub to_add: Vec<AssetEntry>,
}

impl ClassChangeSet {
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// Result of reconciling one platform
#[derive(Debug, Clone, Default)]
pub struct ReconcilePlan {
    /// One change set per class, in class order; empty classes are kept
    pub changes: Vec<ClassChangeSet>,
    /// Full entry set to persist (root-relative, junk excluded)
    pub manifest_entries: Vec<AssetEntry>,
}

impl ReconcilePlan {
    pub fn has_changes(&self) -> bool {
        self.changes.iter().any(|c| !c.is_empty())
    }
}

/// Pure reconciliation service
pub struct Reconciler;

impl Reconciler {
    /// Plan the change sets for a platform
    ///
    /// # Arguments
    /// * `root` - app root that manifest paths are relative to
    /// * `platform` - decides the asset classes
    /// * `previous` - entries from the previous manifest (relative or absolute)
    /// * `current` - entries produced by the content loader (absolute)
    /// * `ignore` - junk file matcher
    pub fn plan(
        root: &Path,
        platform: Platform,
        previous: &[AssetEntry],
        current: &[AssetEntry],
        ignore: &IgnorePatterns,
    ) -> ReconcilePlan {
        let classes = AssetClass::for_platform(platform);

        let previous_keys: HashSet<(String, ContentHash)> =
            previous.iter().map(|e| e.key(root)).collect();
        let current_keys: HashSet<(String, ContentHash)> =
            current.iter().map(|e| e.key(root)).collect();

        let is_junk = |entry: &AssetEntry| ignore.is_ignored(entry.relative(root).path());

        let changes = classes
            .iter()
            .map(|class| {
                let to_remove: Vec<AssetEntry> = previous
                    .iter()
                    .filter(|e| class.matches(e.path(), &classes))
                    .filter(|e| !current_keys.contains(&e.key(root)))
                    .map(|e| e.absolute(root))
                    .collect();

                let live: Vec<&AssetEntry> = current
                    .iter()
                    .filter(|e| class.matches(e.path(), &classes))
                    .filter(|e| !is_junk(e))
                    .collect();

                let mut to_add: Vec<AssetEntry> = live
                    .iter()
                    .filter(|e| !previous_keys.contains(&e.key(root)))
                    .map(|e| e.absolute(root))
                    .collect();

                Self::reclaim_shared_destinations(root, &to_remove, &live, &mut to_add);

                ClassChangeSet {
                    class: *class,
                    to_remove,
                    to_add,
                }
            })
            .collect();

        let manifest_entries = current
            .iter()
            .filter(|e| !is_junk(e))
            .map(|e| e.relative(root))
            .collect();

        ReconcilePlan {
            changes,
            manifest_entries,
        }
    }

    /// Unlinking an entry removes its destination by basename. When another
    /// still-declared entry shares that basename it must be linked again.
    fn reclaim_shared_destinations(
        root: &Path,
        to_remove: &[AssetEntry],
        live: &[&AssetEntry],
        to_add: &mut Vec<AssetEntry>,
    ) {
        for removed in to_remove {
            let removed_key = removed.key(root);
            for candidate in live {
                if candidate.basename() != removed.basename() {
                    continue;
                }
                let candidate_key = candidate.key(root);
                let already_added = to_add.iter().any(|a| a.key(root).0 == candidate_key.0);
                if candidate_key != removed_key && !already_added {
                    to_add.push(candidate.absolute(root));
                }
            }
        }
    }
}
