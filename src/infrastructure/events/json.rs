//! JSON Event Sink
//!
//! Outputs link events as NDJSON for CI/automation consumption.

use crate::domain::ports::{LinkEvent, LinkEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

fn to_json(event: &LinkEvent) -> serde_json::Value {
    let platform = event.platform().map(|p| p.directory_name());
    let severity = event.severity().as_str();
    match event {
        LinkEvent::PlatformStarted { asset_count, .. } => serde_json::json!({
            "event": "platform_start",
            "platform": platform,
            "severity": severity,
            "asset_count": asset_count,
        }),

        LinkEvent::Cleaning { class, count, .. } => serde_json::json!({
            "event": "cleaning",
            "platform": platform,
            "severity": severity,
            "class": class,
            "count": count,
        }),

        LinkEvent::Linking { class, count, .. } => serde_json::json!({
            "event": "linking",
            "platform": platform,
            "severity": severity,
            "class": class,
            "count": count,
        }),

        LinkEvent::GroupCreated { group, .. } => serde_json::json!({
            "event": "group_created",
            "platform": platform,
            "severity": severity,
            "group": group,
        }),

        LinkEvent::Info { message, .. } => serde_json::json!({
            "event": "info",
            "platform": platform,
            "severity": severity,
            "message": message,
        }),

        LinkEvent::Warning { kind, message, .. } => serde_json::json!({
            "event": "warning",
            "platform": platform,
            "severity": severity,
            "kind": kind.as_str(),
            "message": message,
        }),

        LinkEvent::NativeFileWritten { path, .. } => serde_json::json!({
            "event": "native_file_written",
            "platform": platform,
            "severity": severity,
            "path": path.display().to_string(),
        }),

        LinkEvent::NativeFileDiff { path, diff, .. } => serde_json::json!({
            "event": "native_file_diff",
            "platform": platform,
            "severity": severity,
            "path": path.display().to_string(),
            "diff": diff,
        }),

        LinkEvent::ManifestWritten {
            path, entry_count, ..
        } => serde_json::json!({
            "event": "manifest_written",
            "platform": platform,
            "severity": severity,
            "path": path.display().to_string(),
            "entries": entry_count,
        }),

        LinkEvent::PlatformSkipped { reason, .. } => serde_json::json!({
            "event": "platform_skipped",
            "platform": platform,
            "severity": severity,
            "reason": reason,
        }),

        LinkEvent::PlatformCompleted { added, removed, .. } => serde_json::json!({
            "event": "platform_complete",
            "platform": platform,
            "severity": severity,
            "added": added,
            "removed": removed,
        }),

        LinkEvent::PlatformFailed { error, .. } => serde_json::json!({
            "event": "platform_failed",
            "platform": platform,
            "severity": severity,
            "error": error,
        }),
    }
}

impl LinkEventSink for JsonEventSink {
    fn on_event(&self, event: LinkEvent) {
        self.write_event(to_json(&event));
    }
}
