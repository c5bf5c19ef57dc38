//! Integration tests for headless mode plumbing: output formats, scripts,
//! exit codes and argument errors.

use super::common::{run_headless, run_json};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_headless_basic_execution() {
    let (code, stdout, _) = run_headless(&["--headless", "--events", "key:esc"]);

    assert_eq!(code, 0, "Expected exit code 0");
    assert!(
        stdout.contains("Events: 1 executed"),
        "Should show events executed"
    );
    assert!(stdout.contains("Category"));
    assert!(stdout.contains("Start entering the name"));
}

#[test]
fn test_headless_type_event() {
    let (code, json) = run_json("key:tab,type:Fo");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["input_text"], "Fo");
    assert_eq!(json["state"]["cursor"], 2);
    assert_eq!(json["state"]["focus"], "Field");
}

#[test]
fn test_headless_assertion_pass() {
    let (code, json) = run_json("key:tab,type:be,assert:contains:Beverages");

    assert_eq!(code, 0);
    assert_eq!(json["assertions"]["passed"], 1);
    assert_eq!(json["assertions"]["failed"], 0);
}

#[test]
fn test_headless_assertion_fail() {
    let (code, json) = run_json("key:tab,type:be,assert:contains:Travel");

    assert_eq!(code, 1, "Should exit with code 1 on assertion failure");
    assert_eq!(json["assertions"]["passed"], 0);
    assert_eq!(json["assertions"]["failed"], 1);
    assert_eq!(json["assertions"]["failures"][0], "assert:contains:Travel");
}

#[test]
fn test_headless_fail_fast() {
    let (code, stdout, _) = run_headless(&[
        "--headless",
        "--events",
        "assert:contains:nope,key:tab,assert:contains:nope",
        "--fail-fast",
    ]);

    assert_eq!(code, 1);
    assert!(stdout.contains("Events: 1 executed"));
    assert!(stdout.contains("Assertions: 0 passed, 1 failed"));
}

#[test]
fn test_headless_custom_size() {
    let (code, stdout, _) = run_headless(&[
        "--headless",
        "--events",
        "key:tab",
        "--size",
        "60x16",
        "--output",
        "json",
    ]);

    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let lines = json["screen_lines"].as_array().unwrap();
    assert_eq!(lines.len(), 16);
    assert!(lines
        .iter()
        .all(|line| line.as_str().unwrap().chars().count() <= 60));
}

#[test]
fn test_headless_frames_output() {
    let (code, stdout, _) = run_headless(&[
        "--headless",
        "--events",
        "key:tab,type:r",
        "--output",
        "frames",
    ]);

    assert_eq!(code, 0);
    assert!(stdout.contains("=== FRAME 0 (initial) ==="));
    assert!(stdout.contains("=== FRAME 1 (key:tab) ==="));
    assert!(stdout.contains("=== FRAME 2 (type:r) ==="));
    assert!(stdout.contains("Total: 3 frames"));
}

#[test]
fn test_headless_script_file() {
    let mut script = NamedTempFile::new().unwrap();
    writeln!(
        script,
        "# Pick a category from the list\nclick:field\ntype:t\nassert:state:suggestions=Travel\nkey:tab\nassert:state:input_text=Travel"
    )
    .unwrap();

    let (code, stdout, stderr) = run_headless(&[
        "--headless",
        "--script",
        script.path().to_str().unwrap(),
    ]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Assertions: 2 passed, 0 failed"));
}

#[test]
fn test_headless_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("result.json");

    let (code, stdout, _) = run_headless(&[
        "--headless",
        "--events",
        "key:tab",
        "--output",
        "json",
        "--output-file",
        out.to_str().unwrap(),
    ]);

    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(&out).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["state"]["dropdown_visible"], true);
}

#[test]
fn test_headless_invalid_event() {
    let (code, _, stderr) = run_headless(&["--headless", "--events", "jump:high"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown event type"));
}

#[test]
fn test_headless_requires_events() {
    let (code, _, stderr) = run_headless(&["--headless"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("--headless requires --events or --script"));
}

#[test]
fn test_headless_invalid_size() {
    let (code, _, stderr) = run_headless(&["--headless", "--events", "key:tab", "--size", "0x10"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("Configuration"));
}
