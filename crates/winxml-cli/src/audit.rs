// crates/winxml-cli/src/audit.rs
// ============================================================================
// Module: Validation Audit Logging
// Description: Structured audit events for input validation.
// Purpose: Emit redacted audit logs without hard dependencies.
// Dependencies: serde, serde_json, winxml-config, winxml-descriptor
// ============================================================================

//! ## Overview
//! One [`ValidationAuditEvent`] is emitted per validation as a JSON line.
//! Events carry input keys and violation kinds but never input values, so
//! fragments and paths supplied by callers stay out of the log.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use winxml_config::AuditConfig;
use winxml_config::AuditSinkKind;
use winxml_descriptor::ViolationKind;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Validation outcome recorded in audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// Input satisfied the descriptor.
    Accepted,
    /// Input produced at least one violation.
    Rejected,
    /// Input could not be read or decoded into an argument map.
    Malformed,
}

/// Validation audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Operation the input was validated against.
    pub operation: String,
    /// Validation outcome.
    pub outcome: ValidationOutcome,
    /// Raw input size in bytes.
    pub input_bytes: usize,
    /// Keys supplied by the caller, in input order.
    pub supplied_keys: Vec<String>,
    /// Keys dropped under the ignore policy.
    pub ignored_keys: Vec<String>,
    /// Number of violations reported.
    pub violation_count: usize,
    /// Distinct violation kinds, sorted.
    pub violation_kinds: Vec<ViolationKind>,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

/// Parameters for constructing a [`ValidationAuditEvent`].
#[derive(Debug, Clone)]
pub struct ValidationAuditEventParams {
    /// Operation the input was validated against.
    pub operation: String,
    /// Validation outcome.
    pub outcome: ValidationOutcome,
    /// Raw input size in bytes.
    pub input_bytes: usize,
    /// Keys supplied by the caller.
    pub supplied_keys: Vec<String>,
    /// Keys dropped under the ignore policy.
    pub ignored_keys: Vec<String>,
    /// Number of violations reported.
    pub violation_count: usize,
    /// Distinct violation kinds.
    pub violation_kinds: Vec<ViolationKind>,
}

impl ValidationAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: ValidationAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "input_validation",
            timestamp_ms,
            operation: params.operation,
            outcome: params.outcome,
            input_bytes: params.input_bytes,
            supplied_keys: params.supplied_keys,
            ignored_keys: params.ignored_keys,
            violation_count: params.violation_count,
            violation_kinds: params.violation_kinds,
            redaction: "keys_only",
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for validation events.
pub trait ValidationAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ValidationAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ValidationAuditSink for StderrAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ValidationAuditSink for FileAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl ValidationAuditSink for NoopAuditSink {
    fn record(&self, _event: &ValidationAuditEvent) {}
}

/// Builds the audit sink selected by configuration.
///
/// # Errors
///
/// Returns an error when the file sink cannot open its log file.
pub fn audit_sink_from_config(config: &AuditConfig) -> io::Result<Box<dyn ValidationAuditSink>> {
    if !config.enabled {
        return Ok(Box::new(NoopAuditSink));
    }
    match (config.sink, &config.path) {
        (AuditSinkKind::Stderr, _) => Ok(Box::new(StderrAuditSink)),
        (AuditSinkKind::File, Some(path)) => Ok(Box::new(FileAuditSink::new(path)?)),
        (AuditSinkKind::File, None) => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "audit.path is required when audit.sink is file",
        )),
    }
}
