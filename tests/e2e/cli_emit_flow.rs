//! End-to-end: a service-style sequence of `dlog` calls sharing env config.

use domainlog_ports::log_data;
use domainlog_testkit::records::{assert_record, data_of, parse_line};
use serde_json::Value;
use std::error::Error;
use std::process::Command;

type TestResult = Result<(), Box<dyn Error>>;

fn dlog_with_service_env() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_dlog"));
    command
        .env_remove("DOMAINLOG_FORMAT")
        .env_remove("DOMAINLOG_SINK")
        .env_remove("DOMAINLOG_TRACE")
        .env("DOMAINLOG_DOMAIN", "shop")
        .env("DOMAINLOG_DATA", r#"{"svc":"checkout"}"#);
    command
}

fn run_one(args: &[&str]) -> Result<Value, Box<dyn Error>> {
    let output = dlog_with_service_env().args(args).output()?;
    assert_eq!(output.status.code(), Some(0), "args: {args:?}");
    let stderr = String::from_utf8(output.stderr)?;
    let mut lines = stderr.lines();
    let record = parse_line(lines.next().ok_or("no record written")?);
    assert!(lines.next().is_none(), "extra output: {stderr}");
    Ok(record)
}

#[test]
fn request_lifecycle_records() -> TestResult {
    let started = run_one(&["info", "--child", "http", "--data", "path=/cart", "request started"])?;
    let failed = run_one(&[
        "error",
        "--child",
        "http",
        "--data",
        "status=502",
        "upstream %s failed after %d ms",
        "payments",
        "1500",
    ])?;

    assert_record(&started, "info", "shop.http", "request started");
    assert_eq!(data_of(&started), log_data! { "svc" => "checkout", "path" => "/cart" });

    assert_record(&failed, "error", "shop.http", "upstream payments failed after 1500 ms");
    assert_eq!(failed["svc"], "checkout");
    assert_eq!(failed["status"], 502);
    Ok(())
}

#[test]
fn record_keys_follow_data_then_reserved_fields() -> TestResult {
    let record = run_one(&["info", "--data", "a=1", "--data", "b=2", "ordered"])?;

    let keys: Vec<&str> = record
        .as_object()
        .map(|object| object.keys().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(keys, ["svc", "a", "b", "ts", "domain", "message", "level"]);
    Ok(())
}

#[test]
fn percent_literal_and_float_directives() -> TestResult {
    let record = run_one(&["info", "cpu at %.1f%%", "93.27"])?;

    assert_eq!(record["message"], "cpu at 93.3%");
    Ok(())
}
