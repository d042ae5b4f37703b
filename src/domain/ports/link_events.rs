//! Link Event Port
//!
//! Provides an observable interface for link runs.
//! Enables progress reporting, JSON event streams, and debugging.

use std::fmt;
use std::path::PathBuf;

use crate::domain::value_objects::Platform;

/// How loud an event is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

/// Recoverable conditions a run reports and continues past
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Two declared files share a basename with different content
    BasenameConflict,
    /// The manifest could not be parsed and was treated as empty
    ManifestUnreadable,
    /// No Xcode project; project registration skipped
    ProjectMissing,
    /// No Info.plist; font registration skipped
    PlistMissing,
    /// A native document could not be parsed and was left alone
    NativeFileUnreadable,
    /// The source patcher could not apply an edit
    PatchFailed,
    /// A font's tables could not be read
    FontUnreadable,
    /// `MainApplication` was not found
    SourceNotFound,
    /// A configuration key was not recognized
    UnknownConfigKey,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::BasenameConflict => "basename_conflict",
            WarningKind::ManifestUnreadable => "manifest_unreadable",
            WarningKind::ProjectMissing => "project_missing",
            WarningKind::PlistMissing => "plist_missing",
            WarningKind::NativeFileUnreadable => "native_file_unreadable",
            WarningKind::PatchFailed => "patch_failed",
            WarningKind::FontUnreadable => "font_unreadable",
            WarningKind::SourceNotFound => "source_not_found",
            WarningKind::UnknownConfigKey => "unknown_config_key",
        }
    }
}

/// Event emitted during a link run
#[derive(Debug, Clone, PartialEq)]
pub enum LinkEvent {
    /// A platform run started
    PlatformStarted { platform: Platform, asset_count: usize },

    /// Unlinking the removed entries of one asset class
    Cleaning {
        platform: Platform,
        class: &'static str,
        count: usize,
    },

    /// Linking the added entries of one asset class
    Linking {
        platform: Platform,
        class: &'static str,
        count: usize,
    },

    /// A missing Xcode group was created
    GroupCreated { platform: Platform, group: String },

    /// Detail line, shown when verbose
    Info { platform: Platform, message: String },

    /// Recoverable problem
    Warning {
        platform: Option<Platform>,
        kind: WarningKind,
        message: String,
    },

    /// A staged native file was flushed
    NativeFileWritten { platform: Platform, path: PathBuf },

    /// Dry run: what a native file write would change
    NativeFileDiff {
        platform: Platform,
        path: PathBuf,
        diff: String,
    },

    /// The manifest was persisted
    ManifestWritten {
        platform: Platform,
        path: PathBuf,
        entry_count: usize,
    },

    /// The platform directory does not exist
    PlatformSkipped { platform: Platform, reason: String },

    /// The platform run finished
    PlatformCompleted {
        platform: Platform,
        added: usize,
        removed: usize,
    },

    /// The platform run aborted
    PlatformFailed { platform: Platform, error: String },
}

impl LinkEvent {
    pub fn severity(&self) -> Severity {
        match self {
            LinkEvent::Warning { .. } => Severity::Warn,
            LinkEvent::PlatformFailed { .. } => Severity::Error,
            _ => Severity::Info,
        }
    }

    pub fn platform(&self) -> Option<Platform> {
        match self {
            LinkEvent::PlatformStarted { platform, .. }
            | LinkEvent::Cleaning { platform, .. }
            | LinkEvent::Linking { platform, .. }
            | LinkEvent::GroupCreated { platform, .. }
            | LinkEvent::Info { platform, .. }
            | LinkEvent::NativeFileWritten { platform, .. }
            | LinkEvent::NativeFileDiff { platform, .. }
            | LinkEvent::ManifestWritten { platform, .. }
            | LinkEvent::PlatformSkipped { platform, .. }
            | LinkEvent::PlatformCompleted { platform, .. }
            | LinkEvent::PlatformFailed { platform, .. } => Some(*platform),
            LinkEvent::Warning { platform, .. } => *platform,
        }
    }
}

impl fmt::Display for LinkEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkEvent::PlatformStarted {
                platform,
                asset_count,
            } => write!(f, "Linking {} asset(s) for {}", asset_count, platform),
            LinkEvent::Cleaning {
                platform,
                class,
                count,
            } => write!(f, "Cleaning {} {} asset(s) for {}", count, class, platform),
            LinkEvent::Linking {
                platform,
                class,
                count,
            } => write!(f, "Linking {} {} asset(s) for {}", count, class, platform),
            LinkEvent::GroupCreated { group, .. } => write!(f, "Created group '{}'", group),
            LinkEvent::Info { message, .. } => f.write_str(message),
            LinkEvent::Warning { message, .. } => f.write_str(message),
            LinkEvent::NativeFileWritten { path, .. } => write!(f, "Updated {}", path.display()),
            LinkEvent::NativeFileDiff { path, .. } => {
                write!(f, "Would update {}", path.display())
            }
            LinkEvent::ManifestWritten {
                path, entry_count, ..
            } => write!(f, "Recorded {} asset(s) in {}", entry_count, path.display()),
            LinkEvent::PlatformSkipped { platform, reason } => {
                write!(f, "Skipping {}: {}", platform, reason)
            }
            LinkEvent::PlatformCompleted {
                platform,
                added,
                removed,
            } => write!(
                f,
                "{}: {} linked, {} unlinked",
                platform, added, removed
            ),
            LinkEvent::PlatformFailed { platform, error } => {
                write!(f, "{} failed: {}", platform, error)
            }
        }
    }
}

/// Trait for receiving link events
///
/// Implementations:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - RecordingEventSink: Captures events for assertions
/// - NoopEventSink: Silent operation
pub trait LinkEventSink: Send + Sync {
    /// Handle a link event
    fn on_event(&self, event: LinkEvent);

    /// Report a detail line
    fn info(&self, platform: Platform, message: String) {
        self.on_event(LinkEvent::Info { platform, message });
    }

    /// Report a recoverable problem
    fn warn(&self, platform: Option<Platform>, kind: WarningKind, message: String) {
        self.on_event(LinkEvent::Warning {
            platform,
            kind,
            message,
        });
    }

    /// Report an aborted platform run
    fn error(&self, platform: Platform, error: String) {
        self.on_event(LinkEvent::PlatformFailed { platform, error });
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl LinkEventSink for NoopEventSink {
    fn on_event(&self, _event: LinkEvent) {}
}
