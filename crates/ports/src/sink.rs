//! Log sink boundary contract.

use std::borrow::Cow;
use std::io;

/// A sink that receives pre-formatted log lines.
///
/// Sinks are shared between a logger and every logger derived from it, so
/// `write_line` must be safe to call from several threads at once. The
/// logger never flushes or closes a sink.
pub trait LogSink: Send + Sync {
    /// Write one line, appending `\n` if the line does not already end with
    /// one (see [`terminated`]).
    fn write_line(&self, line: &str) -> io::Result<()>;
}

/// Return `line` with exactly one trailing newline added when missing.
#[must_use]
pub fn terminated(line: &str) -> Cow<'_, str> {
    if line.ends_with('\n') {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(format!("{line}\n"))
    }
}
