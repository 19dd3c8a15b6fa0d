use crate::CliOutput;
use crate::error::CliError;
use crate::format::OutputMode;
use domainlog_config::{load_logger_config_std_env, to_pretty_json};
use std::fmt::Write as _;

/// Show the effective logger config (defaults + `DOMAINLOG_*` env).
pub fn run_config_show(mode: OutputMode) -> Result<CliOutput, CliError> {
    let config = load_logger_config_std_env()?;

    if mode.is_json() {
        return Ok(CliOutput::stdout(to_pretty_json(config.as_ref())?));
    }

    let mut out = String::new();
    let _ = writeln!(out, "domain: {}", config.domain);
    let _ = writeln!(out, "format: {}", config.format);
    let _ = writeln!(out, "sink: {}", config.sink);
    if config.data.is_empty() {
        out.push_str("data: {}\n");
    } else {
        out.push_str("data:\n");
        for (key, value) in &config.data {
            let _ = writeln!(out, "  {key}: {value}");
        }
    }
    Ok(CliOutput::stdout(out))
}
