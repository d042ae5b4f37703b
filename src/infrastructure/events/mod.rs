//! Event Sink Implementations
//!
//! Provides concrete implementations of LinkEventSink:
//! - ConsoleEventSink: Human-readable progress
//! - JsonEventSink: NDJSON output for CI/automation
//! - RecordingEventSink: In-memory capture for tests

mod console;
mod json;
mod recording;

pub use console::ConsoleEventSink;
pub use json::JsonEventSink;
pub use recording::RecordingEventSink;
