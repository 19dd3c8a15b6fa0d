//! Hierarchical structured logger.
//!
//! A [`Logger`] owns a dotted domain and a set of default data. Every call
//! builds a [`Message`] from a UTC timestamp, the logger's domain, the
//! rendered text and the merged data, formats it, and writes exactly one line
//! to the sink.
//!
//! Derived loggers (see [`Logger::child`]) share the parent's formatter,
//! sink and clock through `Arc` handles. A sink is never closed or flushed by
//! the logger; whoever opened it owns it.

use crate::clock::{Clock, SystemClock};
use crate::compat::CompatibilityAdapter;
use crate::fatal::log_then_exit;
use crate::formatter::JsonFormatter;
use crate::log_sink::StderrLogSink;
use crate::printf::{Arg, sprintf};
use domainlog_ports::{Formatter, Level, LevelLogger, LogData, LogSink, Message, merge_data};
use domainlog_shared::{ErrorCode, ErrorEnvelope, Result};
use std::fmt;
use std::sync::Arc;

/// Structured logger bound to a domain.
#[derive(Clone)]
pub struct Logger {
    domain: String,
    default_data: Arc<LogData>,
    formatter: Arc<dyn Formatter>,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Logger")
            .field("domain", &self.domain)
            .field("default_data", &self.default_data)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Create a logger from explicit parts, stamping messages with the wall
    /// clock.
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        formatter: Arc<dyn Formatter>,
        default_data: LogData,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            domain: domain.into(),
            default_data: Arc::new(default_data),
            formatter,
            sink,
            clock: Arc::new(SystemClock),
        }
    }

    /// Start building a logger with the default JSON formatter, stderr sink
    /// and no default data.
    #[must_use]
    pub fn builder(domain: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(domain)
    }

    /// Dotted domain of this logger.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Data merged into every message.
    #[must_use]
    pub fn default_data(&self) -> &LogData {
        &self.default_data
    }

    /// Derive a logger for a sub-domain.
    ///
    /// The child's domain is `"{parent}.{segment}"` and its default data is
    /// the parent's merged with `extra`, `extra` winning on shared keys. The
    /// parent is left untouched.
    #[must_use]
    pub fn child(&self, segment: &str, extra: &LogData) -> Self {
        Self {
            domain: format!("{}.{segment}", self.domain),
            default_data: Arc::new(merge_data(&self.default_data, extra)),
            formatter: Arc::clone(&self.formatter),
            sink: Arc::clone(&self.sink),
            clock: Arc::clone(&self.clock),
        }
    }

    /// Wrap a copy of this logger in the conventional severity interface.
    #[must_use]
    pub fn to_standard(&self) -> CompatibilityAdapter<Self> {
        CompatibilityAdapter::new(self.clone())
    }

    /// Emit one message with already-rendered `text`.
    pub fn log(&self, level: Level, text: &str, data: &LogData) -> Result<()> {
        let message = Message {
            time: self.clock.timestamp(),
            level,
            domain: self.domain.clone(),
            text: text.to_string(),
            data: merge_data(&self.default_data, data),
        };
        let line = self.formatter.format(&message)?;
        self.sink.write_line(&line).map_err(|error| {
            ErrorEnvelope::from(error)
                .with_code(ErrorCode::sink_write())
                .with_metadata("domain", self.domain.clone())
        })
    }

    /// Log at info level.
    pub fn info(&self, format: &str, args: &[Arg]) -> Result<()> {
        self.emit(Level::Info, &LogData::new(), format, args)
    }

    /// Log at info level with call-site data.
    pub fn info_data(&self, data: &LogData, format: &str, args: &[Arg]) -> Result<()> {
        self.emit(Level::Info, data, format, args)
    }

    /// Log at error level.
    pub fn error(&self, format: &str, args: &[Arg]) -> Result<()> {
        self.emit(Level::Error, &LogData::new(), format, args)
    }

    /// Log at error level with call-site data.
    pub fn error_data(&self, data: &LogData, format: &str, args: &[Arg]) -> Result<()> {
        self.emit(Level::Error, data, format, args)
    }

    /// Log at error level, then terminate the process with status 1.
    ///
    /// The process exits even when rendering, formatting or writing fails,
    /// and even when the formatter or sink panics.
    pub fn fatal(&self, format: &str, args: &[Arg]) -> ! {
        self.fatal_data(&LogData::new(), format, args)
    }

    /// [`Logger::fatal`] with call-site data.
    pub fn fatal_data(&self, data: &LogData, format: &str, args: &[Arg]) -> ! {
        log_then_exit(|| self.emit(Level::Error, data, format, args))
    }

    fn emit(&self, level: Level, data: &LogData, format: &str, args: &[Arg]) -> Result<()> {
        let text = sprintf(format, args).map_err(|error| {
            ErrorEnvelope::from(error).with_metadata("domain", self.domain.clone())
        })?;
        self.log(level, &text, data)
    }
}

impl LevelLogger for Logger {
    fn log_info(&self, text: &str) -> Result<()> {
        self.log(Level::Info, text, &LogData::new())
    }

    fn log_error(&self, text: &str) -> Result<()> {
        self.log(Level::Error, text, &LogData::new())
    }

    fn log_fatal(&self, text: &str) -> ! {
        log_then_exit(|| self.log(Level::Error, text, &LogData::new()))
    }
}

/// Builder for [`Logger`].
pub struct LoggerBuilder {
    domain: String,
    formatter: Arc<dyn Formatter>,
    data: LogData,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoggerBuilder")
            .field("domain", &self.domain)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

impl LoggerBuilder {
    /// Builder with defaults for `domain`.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            formatter: Arc::new(JsonFormatter),
            data: LogData::new(),
            sink: Arc::new(StderrLogSink),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the formatter.
    #[must_use]
    pub fn formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Replace the default data.
    #[must_use]
    pub fn data(mut self, data: LogData) -> Self {
        self.data = data;
        self
    }

    /// Replace the sink.
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the clock.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> Logger {
        Logger {
            domain: self.domain,
            default_data: Arc::new(self.data),
            formatter: self.formatter,
            sink: self.sink,
            clock: self.clock,
        }
    }
}

/// Log at info level with printf-style arguments.
///
/// ```ignore
/// log_info!(logger, "listening on %s:%d", host, port)?;
/// ```
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.info($format, &[$($crate::Arg::from($arg)),*])
    };
}

/// Log at info level with call-site data and printf-style arguments.
#[macro_export]
macro_rules! log_info_data {
    ($logger:expr, $data:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.info_data(&$data, $format, &[$($crate::Arg::from($arg)),*])
    };
}

/// Log at error level with printf-style arguments.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.error($format, &[$($crate::Arg::from($arg)),*])
    };
}

/// Log at error level with call-site data and printf-style arguments.
#[macro_export]
macro_rules! log_error_data {
    ($logger:expr, $data:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.error_data(&$data, $format, &[$($crate::Arg::from($arg)),*])
    };
}

/// Log at error level and terminate the process.
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.fatal($format, &[$($crate::Arg::from($arg)),*])
    };
}

/// Log at error level with call-site data and terminate the process.
#[macro_export]
macro_rules! log_fatal_data {
    ($logger:expr, $data:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.fatal_data(&$data, $format, &[$($crate::Arg::from($arg)),*])
    };
}
