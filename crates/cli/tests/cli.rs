//! End-to-end runs of the `receiptkit` binary.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(format!("../normalizer/tests/fixtures/{name}"))
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_receiptkit"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to execute receiptkit")
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_receiptkit"))
        .args(args)
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn receiptkit");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn normalize_prints_canonical_json() {
    let path = fixture("pos_order.json");
    let output = run(&["normalize", path.to_str().unwrap()]);
    assert!(output.status.success(), "normalize should exit 0");

    let receipt: Value = serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(receipt["order_no"], "POS-77120");
    assert_eq!(receipt["source"], "point_of_sale");
    assert_eq!(receipt["items"].as_array().map(Vec::len), Some(5));
    assert_eq!(receipt["totals"]["change"], 150.0);
}

#[test]
fn pretty_output_is_indented() {
    let path = fixture("backend_order.json");
    let output = run(&["normalize", "--pretty", path.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\n  \"order_no\": \"WEB-1001\""));
}

#[test]
fn now_flag_fills_missing_dates() {
    let output = run_with_stdin(&["normalize", "--now", "2026-10-19T14:30:00+06:00", "-"], "{}");
    assert!(output.status.success());
    let receipt: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(receipt["date_time"], "10/19/2026, 2:30:00 PM");
    assert_eq!(receipt["items"], serde_json::json!([]));
}

#[test]
fn bad_now_flag_is_rejected() {
    let output = run(&["normalize", "--now", "yesterday"]);
    assert!(!output.status.success());
}

#[test]
fn inspect_summarizes_the_receipt() {
    let path = fixture("social_order.json");
    let output = run(&["inspect", path.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("source:    social"));
    assert!(stdout.contains("(2 products, 1 services)"));
    assert!(stdout.contains("total:     2861.00"));
}

#[test]
fn malformed_json_exits_non_zero() {
    let output = run_with_stdin(&["normalize"], "{not json");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse order"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_file_exits_non_zero() {
    let output = run(&["inspect", "/definitely/not/here.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read order"), "stderr: {stderr}");
}
