//! Property tests for change-set planning.

use std::collections::HashSet;
use std::path::Path;

use proptest::prelude::*;

use asset_link::domain::entities::AssetEntry;
use asset_link::domain::services::Reconciler;
use asset_link::domain::value_objects::{ContentHash, IgnorePatterns, Platform};

const ROOT: &str = "/app";

fn platform() -> impl Strategy<Value = Platform> {
    prop_oneof![
        Just(Platform::Ios),
        Just(Platform::Android),
        Just(Platform::MacOs)
    ]
}

/// Entries under `assets/` with a few basenames, extensions and contents so
/// collisions are common
fn entries() -> impl Strategy<Value = Vec<AssetEntry>> {
    let entry = (
        prop::sample::select(vec!["", "fonts/", "images/", "nested/deep/"]),
        prop::sample::select(vec!["a", "b", "Logo", "Inter-Bold", ".DS_Store"]),
        prop::sample::select(vec![".ttf", ".otf", ".png", ".mp3", ".json", ""]),
        0u8..3,
    )
        .prop_map(|(dir, stem, ext, content)| {
            AssetEntry::new(
                format!("{}/assets/{}{}{}", ROOT, dir, stem, ext),
                ContentHash::from_bytes(&[content]),
            )
        });
    prop::collection::vec(entry, 0..12).prop_map(|mut list| {
        let mut seen = HashSet::new();
        list.retain(|e| seen.insert(e.path().to_path_buf()));
        list
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: An entry is never both kept and unlinked.
    #[test]
    fn property_removed_entries_are_not_current(
        platform in platform(),
        previous in entries(),
        current in entries(),
    ) {
        let root = Path::new(ROOT);
        let plan = Reconciler::plan(root, platform, &previous, &current, &IgnorePatterns::builtin());
        let current_keys: HashSet<_> = current.iter().map(|e| e.key(root)).collect();

        for change in &plan.changes {
            for removed in &change.to_remove {
                prop_assert!(!current_keys.contains(&removed.key(root)));
            }
        }
    }

    /// PROPERTY: Every new, non-junk entry is linked exactly once.
    #[test]
    fn property_new_entries_are_added(
        platform in platform(),
        previous in entries(),
        current in entries(),
    ) {
        let root = Path::new(ROOT);
        let ignore = IgnorePatterns::builtin();
        let plan = Reconciler::plan(root, platform, &previous, &current, &ignore);
        let previous_keys: HashSet<_> = previous.iter().map(|e| e.key(root)).collect();

        let added: Vec<_> = plan
            .changes
            .iter()
            .flat_map(|c| c.to_add.iter().map(|e| e.key(root)))
            .collect();
        for entry in &current {
            let key = entry.key(root);
            let junk = ignore.is_ignored(entry.relative(root).path());
            if !junk && !previous_keys.contains(&key) {
                prop_assert_eq!(added.iter().filter(|k| **k == key).count(), 1);
            }
        }
    }

    /// PROPERTY: The recorded manifest is the current non-junk set, relative.
    #[test]
    fn property_manifest_records_current_entries(
        platform in platform(),
        previous in entries(),
        current in entries(),
    ) {
        let root = Path::new(ROOT);
        let ignore = IgnorePatterns::builtin();
        let plan = Reconciler::plan(root, platform, &previous, &current, &ignore);

        let expected = current
            .iter()
            .filter(|e| !ignore.is_ignored(e.relative(root).path()))
            .count();
        prop_assert_eq!(plan.manifest_entries.len(), expected);
        prop_assert!(plan.manifest_entries.iter().all(|e| e.path().is_relative()));
    }

    /// PROPERTY: Planning against the manifest just written changes nothing.
    #[test]
    fn property_replanning_is_a_no_op(
        platform in platform(),
        previous in entries(),
        current in entries(),
    ) {
        let root = Path::new(ROOT);
        let ignore = IgnorePatterns::builtin();
        let first = Reconciler::plan(root, platform, &previous, &current, &ignore);
        let second = Reconciler::plan(root, platform, &first.manifest_entries, &current, &ignore);

        prop_assert!(!second.has_changes());
    }
}
