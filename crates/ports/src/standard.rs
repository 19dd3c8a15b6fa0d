//! Conventional multi-severity logging interface.
//!
//! Code written against a classic six-severity logger (debug through
//! unknown) can be handed a [`StandardLogger`] backed by a two-level
//! [`LevelLogger`]. The severity-to-level mapping is a closed table, see
//! [`Severity::route`].

use domainlog_shared::Result;
use std::fmt;

/// Severity vocabulary of the conventional interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Debug. Never logged.
    Debug,
    /// Info.
    Info,
    /// Warn.
    Warn,
    /// Error.
    Error,
    /// Fatal. Logs, then terminates the process.
    Fatal,
    /// Unknown.
    Unknown,
}

impl Severity {
    /// Every severity, lowest first.
    pub const ALL: [Self; 6] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
        Self::Unknown,
    ];

    /// Upper-case label of the severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Which [`LevelLogger`] call a severity is forwarded to.
    ///
    /// Warn and unknown are logged as errors. Debug has no route.
    #[must_use]
    pub const fn route(self) -> Option<Route> {
        match self {
            Self::Error | Self::Unknown | Self::Warn => Some(Route::Error),
            Self::Fatal => Some(Route::Fatal),
            Self::Info => Some(Route::Info),
            Self::Debug => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Target call of a routed severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// [`LevelLogger::log_info`].
    Info,
    /// [`LevelLogger::log_error`].
    Error,
    /// [`LevelLogger::log_fatal`].
    Fatal,
}

/// The capability every backend of the conventional interface must offer.
///
/// Text is taken literally; no format directives are interpreted.
pub trait LevelLogger: Send + Sync {
    /// Log `text` at info level.
    fn log_info(&self, text: &str) -> Result<()>;

    /// Log `text` at error level.
    fn log_error(&self, text: &str) -> Result<()>;

    /// Log `text` at error level, then terminate the process with a
    /// non-zero status. Never returns, even when the write fails.
    fn log_fatal(&self, text: &str) -> !;
}

/// Message-producing block, evaluated only when no explicit message is given.
pub type MessageBlock<'a> = &'a dyn Fn() -> String;

/// A conventional severity-leveled logger.
///
/// Only [`StandardLogger::add`] and the `is_*_enabled` queries carry
/// behavior; every other method is routed through `add` or is an accepted
/// no-op. Threshold and datetime-format mutators exist for call-site
/// compatibility and change nothing.
pub trait StandardLogger: Send + Sync {
    /// Log `message` at `severity`.
    ///
    /// The message is resolved as: `message` if present, else the result of
    /// `block` if present, else `progname`.
    fn add(
        &self,
        severity: Severity,
        message: Option<&str>,
        progname: Option<&str>,
        block: Option<MessageBlock<'_>>,
    ) -> Result<()>;

    /// Alias of [`StandardLogger::add`] without a block.
    fn log(&self, severity: Severity, message: Option<&str>, progname: Option<&str>) -> Result<()> {
        self.add(severity, message, progname, None)
    }

    /// Append a message at info severity (the `<<` operator of classic loggers).
    fn append(&self, message: &str) -> Result<()> {
        self.add(Severity::Info, Some(message), None, None)
    }

    /// Debug entry point. Always a no-op.
    fn debug(&self, _message: &str) -> Result<()> {
        Ok(())
    }

    /// Debug entry point with a lazily built message. The block is never run.
    fn debug_with(&self, _block: MessageBlock<'_>) -> Result<()> {
        Ok(())
    }

    /// Info entry point.
    fn info(&self, message: &str) -> Result<()> {
        self.add(Severity::Info, None, Some(message), None)
    }

    /// Info entry point with a lazily built message.
    fn info_with(&self, block: MessageBlock<'_>) -> Result<()> {
        self.add(Severity::Info, None, None, Some(block))
    }

    /// Warn entry point.
    fn warn(&self, message: &str) -> Result<()> {
        self.add(Severity::Warn, None, Some(message), None)
    }

    /// Warn entry point with a lazily built message.
    fn warn_with(&self, block: MessageBlock<'_>) -> Result<()> {
        self.add(Severity::Warn, None, None, Some(block))
    }

    /// Error entry point.
    fn error(&self, message: &str) -> Result<()> {
        self.add(Severity::Error, None, Some(message), None)
    }

    /// Error entry point with a lazily built message.
    fn error_with(&self, block: MessageBlock<'_>) -> Result<()> {
        self.add(Severity::Error, None, None, Some(block))
    }

    /// Fatal entry point. Terminates the process.
    fn fatal(&self, message: &str) -> Result<()> {
        self.add(Severity::Fatal, None, Some(message), None)
    }

    /// Fatal entry point with a lazily built message. Terminates the process.
    fn fatal_with(&self, block: MessageBlock<'_>) -> Result<()> {
        self.add(Severity::Fatal, None, None, Some(block))
    }

    /// Unknown-severity entry point.
    fn unknown(&self, message: &str) -> Result<()> {
        self.add(Severity::Unknown, None, Some(message), None)
    }

    /// Unknown-severity entry point with a lazily built message.
    fn unknown_with(&self, block: MessageBlock<'_>) -> Result<()> {
        self.add(Severity::Unknown, None, None, Some(block))
    }

    /// Always false.
    fn is_debug_enabled(&self) -> bool {
        false
    }

    /// Always true.
    fn is_info_enabled(&self) -> bool {
        true
    }

    /// Always true.
    fn is_warn_enabled(&self) -> bool {
        true
    }

    /// Always true.
    fn is_error_enabled(&self) -> bool {
        true
    }

    /// Always true.
    fn is_fatal_enabled(&self) -> bool {
        true
    }

    /// Accepted and ignored: no runtime filtering exists.
    fn set_level(&self, _severity: Severity) {}

    /// Accepted and ignored: no runtime filtering exists.
    fn set_sev_threshold(&self, _severity: Severity) {}

    /// Always `None`; timestamps are owned by the formatter.
    fn datetime_format(&self) -> Option<&str> {
        None
    }

    /// Accepted and ignored.
    fn set_datetime_format(&self, _format: Option<&str>) {}

    /// No-op; the underlying sink is never owned.
    fn close(&self) {}

    /// No-op; returns the logger itself.
    fn reopen(&self) -> &Self
    where
        Self: Sized,
    {
        self
    }
}
