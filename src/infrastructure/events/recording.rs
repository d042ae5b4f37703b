//! Recording Event Sink
//!
//! Keeps every event in memory. Used by tests to assert on what a run
//! reported.

use std::sync::Mutex;

use crate::domain::ports::{LinkEvent, LinkEventSink, Severity, WarningKind};

/// Event sink that records all events
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<LinkEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<LinkEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Kinds of the recorded warnings, in order
    pub fn warnings(&self) -> Vec<WarningKind> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                LinkEvent::Warning { kind, .. } => Some(kind),
                _ => None,
            })
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.events()
            .iter()
            .any(|event| event.severity() == Severity::Error)
    }
}

impl LinkEventSink for RecordingEventSink {
    fn on_event(&self, event: LinkEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
