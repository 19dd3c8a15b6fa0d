//! Env override fixtures applied through the public config API.

use domainlog_config::{
    ENV_DATA, ENV_DOMAIN, ENV_FORMAT, ENV_SINK, EnvParseError, FormatKind, LoggerEnv, SinkKind,
    load_logger_config, to_pretty_json,
};
use domainlog_shared::ErrorCode;
use std::collections::BTreeMap;
use std::error::Error;

fn env_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

#[test]
fn full_env_produces_effective_config() -> Result<(), Box<dyn Error>> {
    let env = LoggerEnv::from_map(&env_map(&[
        (ENV_DOMAIN, "payments.worker"),
        (ENV_FORMAT, "text"),
        (ENV_SINK, "stdout"),
        (ENV_DATA, "{\"service\":\"payments\",\"replica\":2}"),
    ]))?;

    let config = load_logger_config(&env)?;

    assert_eq!(config.domain, "payments.worker");
    assert_eq!(config.format, FormatKind::Text);
    assert_eq!(config.sink, SinkKind::Stdout);
    assert_eq!(config.data["replica"], 2);

    let rendered = to_pretty_json(config.as_ref())?;
    assert!(rendered.contains("\"format\": \"text\""));
    assert!(rendered.contains("\"sink\": \"stdout\""));
    Ok(())
}

#[test]
fn invalid_env_is_rejected_with_config_codes() -> Result<(), Box<dyn Error>> {
    let error = LoggerEnv::from_map(&env_map(&[(ENV_FORMAT, "xml")])).err();
    assert!(matches!(error, Some(EnvParseError::InvalidEnum { .. })));

    let envelope: domainlog_shared::ErrorEnvelope = error
        .ok_or_else(|| std::io::Error::other("expected invalid env error"))?
        .into();
    assert_eq!(envelope.code, ErrorCode::new("config", "invalid_env_enum"));
    assert_eq!(
        envelope.metadata.get("env_var").map(String::as_str),
        Some(ENV_FORMAT)
    );
    Ok(())
}

#[test]
fn invalid_domain_from_env_fails_validation() -> Result<(), Box<dyn Error>> {
    let env = LoggerEnv::from_map(&env_map(&[(ENV_DOMAIN, "app..worker")]))?;
    let error = load_logger_config(&env).err();
    assert_eq!(
        error.map(|error| error.code),
        Some(ErrorCode::new("config", "invalid_domain"))
    );
    Ok(())
}
