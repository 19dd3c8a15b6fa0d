//! Process termination for the fatal logging path.
//!
//! `fatal` is log-then-abort: once entered, the process exits with
//! [`FATAL_EXIT_CODE`] on every path out, including a panic raised by a
//! formatter or sink. Termination is process-wide; other threads are
//! abandoned and destructors on the current stack do not run.

use domainlog_shared::ErrorEnvelope;
use std::io::Write;

/// Exit status used by every fatal call.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Scope guard that terminates the process when it goes out of scope.
///
/// Dropping the guard (including during unwinding) calls
/// [`std::process::exit`]. [`ExitGuard::exit`] does the same explicitly and
/// is what normal control flow should use.
#[derive(Debug)]
#[must_use = "the process exits as soon as the guard is dropped"]
pub struct ExitGuard {
    code: i32,
}

impl ExitGuard {
    /// Arm a guard that exits with `code`.
    pub const fn new(code: i32) -> Self {
        Self { code }
    }

    /// Terminate now.
    pub fn exit(self) -> ! {
        std::process::exit(self.code)
    }
}

impl Drop for ExitGuard {
    fn drop(&mut self) {
        std::process::exit(self.code)
    }
}

/// Run `emit`, then terminate the process with [`FATAL_EXIT_CODE`].
///
/// A failed `emit` is reported on stderr before exiting.
pub fn log_then_exit(emit: impl FnOnce() -> Result<(), ErrorEnvelope>) -> ! {
    let guard = ExitGuard::new(FATAL_EXIT_CODE);
    if let Err(error) = emit() {
        let _ = writeln!(std::io::stderr(), "fatal log write failed: {error}");
    }
    guard.exit()
}
