// crates/winxml-cli/tests/config_commands.rs
// ============================================================================
// Module: CLI Config Command Tests
// Description: Integration tests for CLI config validation workflows.
// Purpose: Ensure config validation reports success and fails closed on errors.
// Dependencies: win-xml binary
// ============================================================================

//! ## Overview
//! Runs the CLI binary for config validation and ensures invalid configuration
//! fails closed with explicit errors.
//!
//! Security posture: configuration inputs are untrusted; validation must fail closed.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use tempfile::TempDir;
use winxml_config::config_toml_example;

mod common;

/// The canonical example validates.
#[test]
fn cli_config_validate_accepts_example() {
    let dir = TempDir::new().expect("temp dir");
    let path = common::write_file(dir.path(), "win-xml.toml", &config_toml_example())
        .expect("write config");
    let args = ["config", "validate", "--config", path.to_str().unwrap()];
    let output = common::run_in(dir.path(), &args).expect("config validate");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Config valid"));
}

/// A missing default config file falls back to defaults.
#[test]
fn cli_config_validate_accepts_absent_default_file() {
    let dir = TempDir::new().expect("temp dir");
    let output = common::run_in(dir.path(), &["config", "validate"]).expect("config validate");
    assert!(output.status.success());
}

/// A missing explicit config file is an error.
#[test]
fn cli_config_validate_rejects_missing_explicit_file() {
    let dir = TempDir::new().expect("temp dir");
    let output = common::run_in(dir.path(), &["config", "validate", "--config", "absent.toml"])
        .expect("config validate");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load config"), "unexpected stderr: {stderr}");
}

/// Inconsistent audit settings fail closed.
#[test]
fn cli_config_validate_rejects_file_sink_without_path() {
    let dir = TempDir::new().expect("temp dir");
    common::write_file(dir.path(), "win-xml.toml", "[audit]\nsink = \"file\"\n")
        .expect("write config");
    let output = common::run_in(dir.path(), &["config", "validate"]).expect("config validate");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("audit.path is required"), "unexpected stderr: {stderr}");
}
