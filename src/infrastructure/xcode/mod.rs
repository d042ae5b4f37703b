//! Xcode project files
//!
//! - `pbxproj` - span-preserving parser for the project document
//! - `project` - `XcodeProject`, the resource-linking graph editor
//! - `plist` - `Info.plist` documents

mod pbxproj;
mod plist;
mod project;

#[cfg(test)]
pub(crate) mod testing;

use std::path::{Path, PathBuf};

pub use pbxproj::PbxprojError;
pub use plist::{
    add_app_fonts, info_plist_path, parse_plist, remove_app_fonts, render_plist, set_fonts_path,
    PlistError, PlistValue, APP_FONTS_KEY, FONTS_PATH_KEY,
};
pub use project::{resource_group_path, ObjectId, XcodeProject};

/// Locate `<name>.xcodeproj/project.pbxproj` directly under the platform
/// directory. Projects are taken in name order; `Pods.xcodeproj` is skipped.
pub fn find_pbxproj(platform_root: &Path) -> Option<PathBuf> {
    let mut projects: Vec<PathBuf> = std::fs::read_dir(platform_root)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "xcodeproj")
                && path.file_stem().is_some_and(|stem| stem != "Pods")
        })
        .collect();
    projects.sort();
    projects
        .into_iter()
        .map(|dir| dir.join("project.pbxproj"))
        .find(|path| path.is_file())
}
