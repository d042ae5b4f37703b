//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system with atomic writes
//! - `repositories/` - Manifest store and content loader
//! - `events/` - Link event sinks (console, JSON, recording)
//! - `font/` - SFNT metadata reader
//! - `android/` - Font descriptor XML and `MainApplication` discovery
//! - `xcode/` - `project.pbxproj` graph editor and `Info.plist`

pub mod android;
pub mod events;
pub mod font;
pub mod fs;
pub mod repositories;
pub mod xcode;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink, RecordingEventSink};
pub use fs::LocalFs;
pub use repositories::{FsContentLoader, JsonManifestRepository};
