//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Parser, Subcommand};
use commands::{EmitArgs, EmitLevel, run_config_show, run_emit};
use domainlog_adapters::{Logger, StandardLoggerLayer};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter for the CLI's own diagnostics (tracing `EnvFilter` syntax).
const ENV_TRACE: &str = "DOMAINLOG_TRACE";
const DIAGNOSTICS_DOMAIN: &str = "dlog";

#[derive(Debug, Parser)]
#[command(
    name = "dlog",
    version,
    about = "Emit domain-tagged structured log records",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write an info record.
    Info(EmitArgs),
    /// Write an error record.
    Error(EmitArgs),
    /// Write an error record, then exit with status 1.
    Fatal(EmitArgs),
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective config (defaults + env).
    Show,
}

pub(crate) struct CliOutput {
    stdout: String,
    exit_code: ExitCode,
}

impl CliOutput {
    pub(crate) const fn empty() -> Self {
        Self {
            stdout: String::new(),
            exit_code: ExitCode::Ok,
        }
    }

    pub(crate) const fn stdout(stdout: String) -> Self {
        Self {
            stdout,
            exit_code: ExitCode::Ok,
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);
    install_diagnostics();

    match run(&cli.command, mode) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

/// Route the CLI's own `tracing` events through a domainlog logger on stderr.
fn install_diagnostics() {
    let filter = EnvFilter::try_from_env(ENV_TRACE).unwrap_or_else(|_| EnvFilter::new("warn"));
    let logger = Logger::builder(DIAGNOSTICS_DOMAIN).build();
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(StandardLoggerLayer::new(logger.to_standard()))
        .try_init();
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands, mode: OutputMode) -> Result<CliOutput, CliError> {
    match command {
        Commands::Info(args) => run_emit(EmitLevel::Info, args),
        Commands::Error(args) => run_emit(EmitLevel::Error, args),
        Commands::Fatal(args) => run_emit(EmitLevel::Fatal, args),
        Commands::Config { command } => match command {
            ConfigCommands::Show => run_config_show(mode),
        },
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
