//! In-memory doubles for the logging ports.
//!
//! These implementations are intended for:
//! - Unit/integration tests of loggers and adapters
//! - Capturing emitted lines without touching process streams

use crate::records::parse_lines;
use domainlog_ports::{LevelLogger, LogSink, Route, terminated};
use domainlog_shared::Result;
use serde_json::Value;
use std::io;
use std::sync::Mutex;

/// Sink that keeps every written line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Snapshot of the captured lines, newline included.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("memory sink lock").clone()
    }

    /// Drain the captured lines.
    pub fn take(&self) -> Vec<String> {
        let mut guard = self.lines.lock().expect("memory sink lock");
        std::mem::take(&mut *guard)
    }

    /// Captured lines parsed as JSON objects. Panics on non-JSON lines.
    pub fn records(&self) -> Vec<Value> {
        parse_lines(&self.lines())
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self.lines.lock().expect("memory sink lock");
        guard.push(terminated(line).into_owned());
        Ok(())
    }
}

/// Sink whose every write fails with the configured error kind.
#[derive(Debug, Clone, Copy)]
pub struct FailingSink {
    kind: io::ErrorKind,
}

impl FailingSink {
    /// Fail with `kind`.
    pub const fn new(kind: io::ErrorKind) -> Self {
        Self { kind }
    }
}

impl Default for FailingSink {
    fn default() -> Self {
        Self::new(io::ErrorKind::BrokenPipe)
    }
}

impl LogSink for FailingSink {
    fn write_line(&self, _line: &str) -> io::Result<()> {
        Err(io::Error::new(self.kind, "sink unavailable"))
    }
}

/// Panic payload raised by [`RecordingLevelLogger::log_fatal`].
pub const FATAL_REACHED: &str = "recording logger reached fatal";

/// Level logger that records each call instead of emitting it.
///
/// `log_fatal` records the call and then panics with [`FATAL_REACHED`], so a
/// test can observe the fatal route with `std::panic::catch_unwind` without
/// terminating the test process.
#[derive(Debug, Default)]
pub struct RecordingLevelLogger {
    calls: Mutex<Vec<(Route, String)>>,
}

impl RecordingLevelLogger {
    /// Snapshot of the recorded `(route, text)` calls.
    pub fn calls(&self) -> Vec<(Route, String)> {
        self.calls.lock().expect("recording logger lock").clone()
    }

    fn record(&self, route: Route, text: &str) {
        self.calls
            .lock()
            .expect("recording logger lock")
            .push((route, text.to_string()));
    }
}

impl LevelLogger for RecordingLevelLogger {
    fn log_info(&self, text: &str) -> Result<()> {
        self.record(Route::Info, text);
        Ok(())
    }

    fn log_error(&self, text: &str) -> Result<()> {
        self.record(Route::Error, text);
        Ok(())
    }

    fn log_fatal(&self, text: &str) -> ! {
        self.record(Route::Fatal, text);
        panic!("{FATAL_REACHED}")
    }
}
