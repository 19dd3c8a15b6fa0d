//! # domainlog-adapters
//!
//! The logger and everything it plugs together: formatters, sinks, the
//! printf renderer, the clock, the fatal exit path, the conventional
//! severity adapter, and the `tracing` bridge.
//! This crate depends on `ports`, `shared`, and `config`.
//!
//! ```ignore
//! use domainlog_adapters::{Logger, log_info};
//! use domainlog_ports::log_data;
//!
//! let root = Logger::builder("app").build();
//! let worker = root.child("worker", &log_data! { "id" => 7 });
//! log_info!(worker, "processed %d jobs", 12)?;
//! ```

pub mod clock;
pub mod compat;
pub mod factory;
pub mod fatal;
pub mod formatter;
pub mod log_sink;
pub mod logger;
pub mod printf;
pub mod tracing_layer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use compat::CompatibilityAdapter;
pub use factory::{formatter_for, logger_from_config, sink_for};
pub use fatal::{ExitGuard, FATAL_EXIT_CODE};
pub use formatter::{JsonFormatter, TextFormatter};
pub use log_sink::{StderrLogSink, StdoutLogSink, WriterLogSink};
pub use logger::{Logger, LoggerBuilder};
pub use printf::{Arg, PrintfError, sprintf};
pub use tracing_layer::StandardLoggerLayer;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
