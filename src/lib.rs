//! asset-link - links static assets into native mobile projects
//!
//! Declared fonts, images, sounds and other files are copied or referenced
//! into the iOS, Android and macOS projects of an app. A per-platform
//! manifest records what the previous run linked, so each run only applies
//! the difference and unlinks what is no longer declared.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{LinkOptions, LinkReport, LinkUseCase, PlatformReport};
pub use config::{CliOverrides, Config, ConfigWarning};
pub use domain::ports::{LinkEvent, LinkEventSink, WarningKind};
pub use domain::value_objects::Platform;
pub use error::{LinkError, LinkResult};
pub use infrastructure::{
    ConsoleEventSink, FsContentLoader, JsonEventSink, JsonManifestRepository, LocalFs,
};
