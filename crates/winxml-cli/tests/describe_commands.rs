// crates/winxml-cli/tests/describe_commands.rs
// ============================================================================
// Module: CLI Describe Command Tests
// Description: Integration tests for reference and schema output.
// Purpose: Ensure published references match the library generators.
// Dependencies: win-xml binary
// ============================================================================

//! ## Overview
//! Runs `win-xml describe` and `win-xml schema` and compares their output
//! with the generators in `winxml-descriptor`.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use serde_json::json;
use tempfile::TempDir;
use winxml_descriptor::descriptor_docs_markdown;
use winxml_descriptor::descriptor_schema;
use winxml_descriptor::win_xml_descriptor;

mod common;

/// Default describe output is the Markdown reference.
#[test]
fn cli_describe_prints_markdown_reference() {
    let dir = TempDir::new().expect("temp dir");
    let output = common::run_in(dir.path(), &["describe"]).expect("run describe");
    assert!(output.status.success());
    let expected = descriptor_docs_markdown(win_xml_descriptor().unwrap());
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

/// YAML describe output is a documentation block.
#[test]
fn cli_describe_prints_documentation_yaml() {
    let dir = TempDir::new().expect("temp dir");
    let output = common::run_in(dir.path(), &["describe", "--format", "yaml"]).expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("---\n"));
    let parsed: serde_yaml::Value = serde_yaml::from_str(&stdout).expect("yaml");
    assert_eq!(parsed["module"], serde_yaml::Value::String("win_xml".to_string()));
}

/// JSON describe output carries parameters and rules.
#[test]
fn cli_describe_prints_descriptor_json() {
    let dir = TempDir::new().expect("temp dir");
    let output = common::run_in(dir.path(), &["describe", "--format", "json"]).expect("run");
    assert!(output.status.success());
    let descriptor = common::stdout_json(&output).expect("json");
    assert_eq!(descriptor["operation_name"], json!("win_xml"));
    let names: Vec<&str> = descriptor["parameters"]
        .as_array()
        .expect("parameters array")
        .iter()
        .map(|parameter| parameter["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, ["path", "fragment", "root", "backup", "type", "attribute"]);
    assert_eq!(descriptor["rules"][0]["rule"], json!("required_if"));
}

/// Schema output equals the library schema.
#[test]
fn cli_schema_prints_input_schema() {
    let dir = TempDir::new().expect("temp dir");
    let output = common::run_in(dir.path(), &["schema"]).expect("run schema");
    assert!(output.status.success());
    let schema = common::stdout_json(&output).expect("schema json");
    assert_eq!(schema, descriptor_schema(win_xml_descriptor().unwrap()));
}

/// Unknown describe formats are rejected by argument parsing.
#[test]
fn cli_describe_rejects_unknown_format() {
    let dir = TempDir::new().expect("temp dir");
    let output = common::run_in(dir.path(), &["describe", "--format", "html"]).expect("run");
    assert!(!output.status.success());
}
