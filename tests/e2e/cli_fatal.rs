//! End-to-end: `dlog fatal` writes its record and exits with status 1.

use domainlog_testkit::records::{assert_record, parse_line};
use std::error::Error;
use std::process::{Command, Output};

type TestResult = Result<(), Box<dyn Error>>;

fn dlog_fatal(args: &[&str]) -> std::io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_dlog"))
        .env_remove("DOMAINLOG_DOMAIN")
        .env_remove("DOMAINLOG_FORMAT")
        .env_remove("DOMAINLOG_DATA")
        .env_remove("DOMAINLOG_TRACE")
        .env("DOMAINLOG_SINK", "stderr")
        .arg("fatal")
        .args(args)
        .output()
}

#[test]
fn fatal_logs_at_error_then_exits_one() -> TestResult {
    let output = dlog_fatal(&["--data", "signal=\"TERM\"", "shutting down: %s", "signal"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr)?;
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "stderr: {stderr}");
    let record = parse_line(lines[0]);
    assert_record(&record, "error", "app", "shutting down: signal");
    assert_eq!(record["signal"], "TERM");
    Ok(())
}

#[test]
fn fatal_exits_one_even_when_the_record_cannot_be_rendered() -> TestResult {
    let output = dlog_fatal(&["%d missing"])?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fatal log write failed"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn config_errors_stop_before_the_fatal_path() -> TestResult {
    let output = Command::new(env!("CARGO_BIN_EXE_dlog"))
        .env_remove("DOMAINLOG_DOMAIN")
        .env_remove("DOMAINLOG_DATA")
        .env("DOMAINLOG_SINK", "pipe")
        .args(["fatal", "never"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config:invalid_env_enum"), "stderr: {stderr}");
    Ok(())
}
