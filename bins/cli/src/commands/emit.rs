//! `dlog info|error|fatal`: emit one record through a configured logger.

use crate::CliOutput;
use crate::error::CliError;
use clap::{Args, ValueEnum};
use domainlog_adapters::{Arg, Logger, logger_from_config};
use domainlog_config::{
    FormatKind, LoggerEnv, SinkKind, ValidatedLoggerConfig, apply_env_overrides,
    load_logger_config_std_env,
};
use domainlog_ports::{LogData, RESERVED_KEYS};
use serde_json::Value;

/// Severity selected by the subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitLevel {
    Info,
    Error,
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Text,
}

impl From<FormatArg> for FormatKind {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => Self::Json,
            FormatArg::Text => Self::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkArg {
    Stderr,
    Stdout,
}

impl From<SinkArg> for SinkKind {
    fn from(value: SinkArg) -> Self {
        match value {
            SinkArg::Stderr => Self::Stderr,
            SinkArg::Stdout => Self::Stdout,
        }
    }
}

#[derive(Debug, Args)]
pub struct EmitArgs {
    /// printf-style template, e.g. "processed %d jobs".
    #[arg(value_name = "FORMAT")]
    pub template: String,
    /// Values substituted into the template, in order.
    #[arg(value_name = "ARG", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
    /// Root domain (overrides DOMAINLOG_DOMAIN).
    #[arg(long)]
    pub domain: Option<String>,
    /// Derive a child logger; repeat to nest.
    #[arg(long = "child", value_name = "SEGMENT")]
    pub children: Vec<String>,
    /// Call-site data as KEY=VALUE; VALUE is parsed as JSON when possible.
    #[arg(long = "data", value_name = "KEY=VALUE", value_parser = parse_data_pair)]
    pub data: Vec<(String, Value)>,
    /// Wire format (overrides DOMAINLOG_FORMAT).
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
    /// Output stream (overrides DOMAINLOG_SINK).
    #[arg(long, value_enum)]
    pub sink: Option<SinkArg>,
}

fn parse_data_pair(raw: &str) -> Result<(String, Value), String> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(format!("expected KEY=VALUE, got `{raw}`"));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }
    let value =
        serde_json::from_str::<Value>(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub fn run_emit(level: EmitLevel, args: &EmitArgs) -> Result<CliOutput, CliError> {
    let config = resolve_config(args)?;
    let logger = derive_logger(logger_from_config(&config), &args.children)?;
    let data = call_data(&args.data);
    let arguments: Vec<Arg> = args.args.iter().map(Arg::from).collect();

    match level {
        EmitLevel::Info => logger.info_data(&data, &args.template, &arguments)?,
        EmitLevel::Error => logger.error_data(&data, &args.template, &arguments)?,
        EmitLevel::Fatal => logger.fatal_data(&data, &args.template, &arguments),
    }

    Ok(CliOutput::empty())
}

fn resolve_config(args: &EmitArgs) -> Result<ValidatedLoggerConfig, CliError> {
    let base = load_logger_config_std_env()?;
    let flags = LoggerEnv {
        domain: args.domain.clone(),
        format: args.format.map(FormatKind::from),
        sink: args.sink.map(SinkKind::from),
        data: None,
    };
    if flags.is_empty() {
        return Ok(base);
    }
    Ok(apply_env_overrides(base.into_inner(), &flags)?)
}

fn derive_logger(root: Logger, children: &[String]) -> Result<Logger, CliError> {
    children.iter().try_fold(root, |logger, segment| {
        if segment.is_empty() || segment.chars().any(char::is_whitespace) {
            return Err(CliError::InvalidInput(format!(
                "child segment `{segment}` must be non-empty without whitespace"
            )));
        }
        Ok(logger.child(segment, &LogData::new()))
    })
}

fn call_data(pairs: &[(String, Value)]) -> LogData {
    let mut data = LogData::new();
    for (key, value) in pairs {
        if RESERVED_KEYS.contains(&key.as_str()) {
            tracing::warn!(%key, "call data key is reserved and will be overwritten");
        }
        data.insert(key.clone(), value.clone());
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_values_parse_as_json_then_fall_back_to_strings() -> Result<(), String> {
        assert_eq!(parse_data_pair("n=3")?, ("n".to_string(), Value::from(3)));
        assert_eq!(parse_data_pair("ok=true")?, ("ok".to_string(), Value::Bool(true)));
        assert_eq!(parse_data_pair("who=bob")?, ("who".to_string(), Value::from("bob")));
        assert_eq!(parse_data_pair("eq=a=b")?, ("eq".to_string(), Value::from("a=b")));
        assert_eq!(parse_data_pair("empty=")?, ("empty".to_string(), Value::from("")));
        Ok(())
    }

    #[test]
    fn data_pairs_need_a_key_and_separator() {
        assert!(parse_data_pair("novalue").is_err());
        assert!(parse_data_pair("=3").is_err());
    }

    #[test]
    fn repeated_data_keys_keep_the_last_value() {
        let data = call_data(&[
            ("a".to_string(), Value::from(1)),
            ("b".to_string(), Value::from(2)),
            ("a".to_string(), Value::from(3)),
        ]);
        assert_eq!(data.get("a"), Some(&Value::from(3)));
        assert_eq!(data.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn children_nest_under_the_root_domain() -> Result<(), CliError> {
        let root = Logger::builder("app").build();
        let logger = derive_logger(root, &["api".to_string(), "v1".to_string()])?;
        assert_eq!(logger.domain(), "app.api.v1");
        Ok(())
    }

    #[test]
    fn blank_child_segments_are_rejected() {
        let root = Logger::builder("app").build();
        let result = derive_logger(root, &[" ".to_string()]);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
