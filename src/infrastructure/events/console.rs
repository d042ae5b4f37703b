//! Console Event Sink
//!
//! Human-readable progress for interactive runs. Progress goes to stdout,
//! warnings and failures to stderr. Colors and icons are only used when the
//! stream is a terminal.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::{Color, Stylize};
use is_terminal::IsTerminal;

use crate::domain::ports::{LinkEvent, LinkEventSink, Severity};

const SUCCESS: Color = Color::Green;
const ERROR: Color = Color::Red;
const WARNING: Color = Color::Yellow;
const INFO: Color = Color::Cyan;
const DIM: Color = Color::DarkGrey;

/// Event sink that prints progress lines
pub struct ConsoleEventSink {
    out: Mutex<Box<dyn Write + Send>>,
    err: Mutex<Box<dyn Write + Send>>,
    verbosity: u8,
    color: bool,
}

impl ConsoleEventSink {
    /// Print to stdout/stderr; decorate when stdout is a terminal
    pub fn stdio(verbosity: u8) -> Self {
        Self {
            out: Mutex::new(Box::new(io::stdout())),
            err: Mutex::new(Box::new(io::stderr())),
            verbosity,
            color: io::stdout().is_terminal(),
        }
    }

    /// Print to custom writers without decorations (for testing)
    pub fn with_writers<O, E>(out: O, err: E, verbosity: u8) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            out: Mutex::new(Box::new(out)),
            err: Mutex::new(Box::new(err)),
            verbosity,
            color: false,
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            format!("{}", text.with(color))
        } else {
            text.to_string()
        }
    }

    /// Minimum verbosity for an event to be shown
    fn level(event: &LinkEvent) -> u8 {
        match event {
            LinkEvent::Info { .. }
            | LinkEvent::NativeFileWritten { .. }
            | LinkEvent::ManifestWritten { .. } => 1,
            _ => 0,
        }
    }

    fn render(&self, event: &LinkEvent) -> String {
        match event {
            LinkEvent::Warning { kind, .. } => {
                let tag = self.paint(&format!("warn[{}]", kind.as_str()), WARNING);
                format!("{} {}", tag, event)
            }
            LinkEvent::PlatformFailed { .. } => {
                format!("{} {}", self.paint("error", ERROR), event)
            }
            LinkEvent::PlatformCompleted { .. } => {
                format!("{} {}", self.paint("done", SUCCESS), event)
            }
            LinkEvent::PlatformStarted { .. } => self.paint(&event.to_string(), INFO),
            LinkEvent::NativeFileDiff { diff, .. } => {
                let mut out = self.paint(&event.to_string(), INFO);
                for line in diff.lines() {
                    out.push('\n');
                    let color = if line.starts_with("+++") || line.starts_with("---") {
                        INFO
                    } else if line.starts_with('+') {
                        SUCCESS
                    } else if line.starts_with('-') {
                        ERROR
                    } else {
                        DIM
                    };
                    out.push_str(&self.paint(line, color));
                }
                out
            }
            LinkEvent::Info { .. } => format!("  {}", self.paint(&event.to_string(), DIM)),
            _ => format!("  {}", event),
        }
    }
}

impl LinkEventSink for ConsoleEventSink {
    fn on_event(&self, event: LinkEvent) {
        if Self::level(&event) > self.verbosity {
            return;
        }
        let line = self.render(&event);
        let stream = if event.severity() >= Severity::Warn {
            &self.err
        } else {
            &self.out
        };
        if let Ok(mut writer) = stream.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}
