//! Manifest schema migrations
//!
//! An ordered list of pure transformations. A stored manifest records how
//! many have been applied (`schemaVersion`); reading applies the rest in
//! order and the next write stamps the latest version, so no migration ever
//! runs twice on the same data.

use std::collections::HashSet;
use std::path::Path;

use crate::domain::entities::{from_posix, to_posix, AssetEntry, Manifest};
use crate::domain::value_objects::{ContentHash, Platform, FONT_EXTENSIONS};

/// One schema step
pub struct Migration {
    pub name: &'static str,
    pub apply: fn(Vec<AssetEntry>, Platform) -> Vec<AssetEntry>,
}

/// All migrations, oldest first
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "strip_dot_prefix",
        apply: strip_dot_prefix,
    },
    Migration {
        name: "relink_android_fonts",
        apply: relink_android_fonts,
    },
    Migration {
        name: "posix_separators",
        apply: posix_separators,
    },
];

pub const LATEST_SCHEMA_VERSION: u32 = MIGRATIONS.len() as u32;

/// Bring a stored manifest up to the latest schema.
///
/// Manifests stamped with a newer version than this build knows are returned
/// untouched.
pub fn migrate(manifest: Manifest, platform: Platform) -> Manifest {
    let start = manifest.schema_version() as usize;
    if start >= MIGRATIONS.len() {
        return manifest;
    }
    let entries = MIGRATIONS[start..]
        .iter()
        .fold(manifest.into_entries(), |entries, migration| {
            (migration.apply)(entries, platform)
        });
    Manifest::from_entries(entries)
}

/// Legacy manifests stored `./assets/a.png`.
fn strip_dot_prefix(entries: Vec<AssetEntry>, _platform: Platform) -> Vec<AssetEntry> {
    entries
        .into_iter()
        .map(|entry| {
            let posix = to_posix(entry.path());
            match posix.strip_prefix("./") {
                Some(stripped) => entry.with_path(from_posix(stripped)),
                None => entry,
            }
        })
        .collect()
}

/// Android fonts used to be copied to `assets/fonts`; clearing their hash
/// forces one relink into `res/font` with a font-family descriptor.
fn relink_android_fonts(entries: Vec<AssetEntry>, platform: Platform) -> Vec<AssetEntry> {
    if platform != Platform::Android {
        return entries;
    }
    entries
        .into_iter()
        .map(|entry| {
            if is_font(entry.path()) {
                entry.with_hash(ContentHash::stale())
            } else {
                entry
            }
        })
        .collect()
}

/// Windows runs of the legacy tool wrote backslash separators.
fn posix_separators(entries: Vec<AssetEntry>, _platform: Platform) -> Vec<AssetEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .map(|entry| {
            let posix = to_posix(entry.path());
            entry.with_path(from_posix(&posix))
        })
        .filter(|entry| seen.insert((to_posix(entry.path()), entry.hash().clone())))
        .collect()
}

fn is_font(path: &Path) -> bool {
    path.extension()
        .map(|ext| FONT_EXTENSIONS.contains(&&*ext.to_string_lossy()))
        .unwrap_or(false)
}
