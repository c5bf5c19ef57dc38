//! Common test utilities for TUI tests.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run labelprint with the given arguments and a config file that does not
/// exist, so the built-in categories are used.
pub fn run_headless(args: &[&str]) -> (i32, String, String) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = dir.path().join("missing.toml");
    run_with_config(&config, args)
}

/// Run labelprint with an explicit config file.
pub fn run_with_config(config: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_labelprint"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute command");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

/// Run a headless event string and return the JSON output.
pub fn run_json(events: &str) -> (i32, serde_json::Value) {
    let (code, stdout, stderr) =
        run_headless(&["--headless", "--events", events, "--output", "json"]);
    let json = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("Invalid JSON ({e}). stdout: {stdout}\nstderr: {stderr}"));
    (code, json)
}
