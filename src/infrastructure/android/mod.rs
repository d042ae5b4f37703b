//! Android project files
//!
//! - `font_xml` - `res/font/<family>.xml` descriptor documents
//! - `find_main_application` - locate the `MainApplication` source file
//! - `font_documents` - list the family descriptors in `res/font`

mod font_xml;

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

pub use font_xml::{parse_font_family, render_font_family, FontXmlError};

/// Source root scanned for `MainApplication`
pub const JAVA_SOURCE_DIR: &str = "app/src/main/java";

const MAIN_APPLICATION_FILES: [&str; 2] = ["MainApplication.java", "MainApplication.kt"];

/// Find `MainApplication.{java,kt}` under the app's Java source root.
///
/// The walk is sorted so the same file wins on every run; Java is preferred
/// over Kotlin when both exist in the same directory.
pub fn find_main_application(android_root: &Path) -> Option<PathBuf> {
    let source_root = android_root.join(JAVA_SOURCE_DIR);
    if !source_root.is_dir() {
        return None;
    }

    WalkBuilder::new(&source_root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(|entry| entry.into_path())
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| MAIN_APPLICATION_FILES.contains(&name))
        })
}

/// Family descriptor documents (`*.xml`) directly inside a font directory,
/// sorted by name
pub fn font_documents(font_dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(font_dir) else {
        return Vec::new();
    };
    let mut documents: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "xml"))
        .collect();
    documents.sort();
    documents
}
