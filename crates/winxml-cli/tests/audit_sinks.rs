//! Audit sink tests for winxml-cli.
// crates/winxml-cli/tests/audit_sinks.rs
// =============================================================================
// Module: Audit Sink Tests
// Description: Sink selection and file sink output.
// Purpose: Ensure configured sinks are honored and write one JSON line per event.
// =============================================================================

use std::path::PathBuf;

use tempfile::TempDir;
use winxml_cli::FileAuditSink;
use winxml_cli::ValidationAuditEvent;
use winxml_cli::ValidationAuditEventParams;
use winxml_cli::ValidationAuditSink;
use winxml_cli::ValidationOutcome;
use winxml_cli::audit_sink_from_config;
use winxml_config::AuditConfig;
use winxml_config::AuditSinkKind;
use winxml_descriptor::ViolationKind;

type TestResult = Result<(), String>;

fn sample_event() -> ValidationAuditEvent {
    ValidationAuditEvent::new(ValidationAuditEventParams {
        operation: "win_xml".to_string(),
        outcome: ValidationOutcome::Rejected,
        input_bytes: 12,
        supplied_keys: vec!["type".to_string()],
        ignored_keys: Vec::new(),
        violation_count: 2,
        violation_kinds: vec![ViolationKind::MissingRequired],
    })
}

#[test]
fn file_sink_appends_json_lines() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("audit.jsonl");
    let sink = FileAuditSink::new(&path).map_err(|err| err.to_string())?;
    sink.record(&sample_event());
    sink.record(&sample_event());

    let content = std::fs::read_to_string(&path).map_err(|err| err.to_string())?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() != 2 {
        return Err(format!("expected two lines, got {}", lines.len()));
    }
    let event: serde_json::Value = serde_json::from_str(lines[0]).map_err(|err| err.to_string())?;
    if event["event"] != "input_validation"
        || event["outcome"] != "rejected"
        || event["violation_kinds"] != serde_json::json!(["missing_required"])
    {
        return Err(format!("unexpected event: {event}"));
    }
    Ok(())
}

#[test]
fn configured_file_sink_writes_to_path() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("configured.jsonl");
    let config = AuditConfig {
        enabled: true,
        sink: AuditSinkKind::File,
        path: Some(path.clone()),
    };
    let sink = audit_sink_from_config(&config).map_err(|err| err.to_string())?;
    sink.record(&sample_event());
    let content = std::fs::read_to_string(&path).map_err(|err| err.to_string())?;
    if content.lines().count() != 1 {
        return Err(format!("expected one line, got {content:?}"));
    }
    Ok(())
}

#[test]
fn disabled_audit_writes_nothing() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("disabled.jsonl");
    let config = AuditConfig {
        enabled: false,
        sink: AuditSinkKind::File,
        path: Some(path.clone()),
    };
    let sink = audit_sink_from_config(&config).map_err(|err| err.to_string())?;
    sink.record(&sample_event());
    if path.exists() {
        return Err("disabled audit must not create a log file".to_string());
    }
    Ok(())
}

#[test]
fn file_sink_without_path_is_rejected() -> TestResult {
    let config = AuditConfig {
        enabled: true,
        sink: AuditSinkKind::File,
        path: None,
    };
    match audit_sink_from_config(&config) {
        Err(err) if err.kind() == std::io::ErrorKind::InvalidInput => Ok(()),
        Err(err) => Err(format!("unexpected error kind: {err}")),
        Ok(_) => Err("file sink without path must fail".to_string()),
    }
}

#[test]
fn file_sink_in_missing_directory_fails_to_open() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path: PathBuf = dir.path().join("missing").join("audit.jsonl");
    if FileAuditSink::new(&path).is_ok() {
        return Err("opening a log in a missing directory must fail".to_string());
    }
    Ok(())
}
