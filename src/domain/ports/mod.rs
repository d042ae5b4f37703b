//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod content_loader;
pub mod file_system;
pub mod link_events;
pub mod manifest_repository;

pub use content_loader::{BasenameConflict, ContentLoader, LoadedAssets};
pub use file_system::{FileSystem, FsError, FsResult};
pub use link_events::{LinkEvent, LinkEventSink, NoopEventSink, Severity, WarningKind};
pub use manifest_repository::{ManifestError, ManifestRepository, ManifestResult};
