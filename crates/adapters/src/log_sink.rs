//! Line sinks backed by process streams and arbitrary writers.

use domainlog_ports::{LogSink, terminated};
use std::io::{self, Write};
use std::sync::Mutex;

/// Log sink that writes to stderr. The default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(terminated(line).as_bytes())
    }
}

/// Log sink that writes to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutLogSink;

impl LogSink for StdoutLogSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(terminated(line).as_bytes())?;
        stdout.flush()
    }
}

/// Log sink over any writer, e.g. a file opened by the caller.
///
/// Writes are serialized through a mutex so one line is never interleaved
/// with another.
#[derive(Debug)]
pub struct WriterLogSink<W> {
    writer: Mutex<W>,
}

impl<W: Write> WriterLogSink<W> {
    /// Wrap `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer
            .into_inner()
            .map_err(|_| io::Error::other("log writer lock poisoned"))
    }
}

impl<W: Write + Send> LogSink for WriterLogSink<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))?;
        writer.write_all(terminated(line).as_bytes())?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_sink_terminates_lines_once() -> io::Result<()> {
        let sink = WriterLogSink::new(Vec::new());
        sink.write_line("hello\n")?;
        sink.write_line("world")?;

        let bytes = sink.into_inner()?;
        assert_eq!(String::from_utf8_lossy(&bytes), "hello\nworld\n");
        Ok(())
    }

    #[test]
    fn writer_sink_surfaces_io_errors() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let sink = WriterLogSink::new(Broken);
        let result = sink.write_line("lost");
        assert!(matches!(result, Err(error) if error.kind() == io::ErrorKind::BrokenPipe));
    }
}
