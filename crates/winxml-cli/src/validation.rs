// crates/winxml-cli/src/validation.rs
// ============================================================================
// Module: Audited Validation
// Description: Run descriptor validation and record one audit event.
// Purpose: Keep the CLI command a thin wrapper around testable logic.
// Dependencies: serde, serde_json, winxml-descriptor
// ============================================================================

//! ## Overview
//! [`validate_and_audit`] validates an argument map and records the outcome
//! on the supplied sink whether or not validation succeeds.
//! [`audit_malformed_input`] covers input that never reached validation.
//! [`ValidationReport`] is the JSON document the CLI writes for an accepted
//! input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use winxml_descriptor::Descriptor;
use winxml_descriptor::UnknownKeyPolicy;
use winxml_descriptor::ValidatedArgs;
use winxml_descriptor::ValidationOptions;
use winxml_descriptor::ValidationResult;
use winxml_descriptor::Violation;

use crate::audit::ValidationAuditEvent;
use crate::audit::ValidationAuditEventParams;
use crate::audit::ValidationAuditSink;
use crate::audit::ValidationOutcome;

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates `input` against `descriptor` and records an audit event.
///
/// # Errors
///
/// Returns the descriptor's [`winxml_descriptor::ValidationError`] when the
/// input violates any declaration.
pub fn validate_and_audit(
    descriptor: &Descriptor,
    input: &Map<String, Value>,
    options: ValidationOptions,
    input_bytes: usize,
    sink: &dyn ValidationAuditSink,
) -> ValidationResult {
    let result = descriptor.validate_with(input, options);
    let (outcome, ignored_keys, violations) = match &result {
        Ok(validated) => {
            (ValidationOutcome::Accepted, validated.ignored_keys().to_vec(), &[][..])
        }
        Err(error) => (
            ValidationOutcome::Rejected,
            ignored_input_keys(descriptor, input, options),
            error.violations.as_slice(),
        ),
    };
    let kinds = violations.iter().map(Violation::kind).collect::<BTreeSet<_>>();
    sink.record(&ValidationAuditEvent::new(ValidationAuditEventParams {
        operation: descriptor.operation_name().to_string(),
        outcome,
        input_bytes,
        supplied_keys: input.keys().cloned().collect(),
        ignored_keys,
        violation_count: violations.len(),
        violation_kinds: kinds.into_iter().collect(),
    }));
    result
}

/// Records an audit event for input that never reached validation.
///
/// Used when the input cannot be read or decoded, so no keys are known.
pub fn audit_malformed_input(
    descriptor: &Descriptor,
    input_bytes: usize,
    sink: &dyn ValidationAuditSink,
) {
    sink.record(&ValidationAuditEvent::new(ValidationAuditEventParams {
        operation: descriptor.operation_name().to_string(),
        outcome: ValidationOutcome::Malformed,
        input_bytes,
        supplied_keys: Vec::new(),
        ignored_keys: Vec::new(),
        violation_count: 0,
        violation_kinds: Vec::new(),
    }));
}

/// Keys the ignore policy drops from `input`, in input order.
fn ignored_input_keys(
    descriptor: &Descriptor,
    input: &Map<String, Value>,
    options: ValidationOptions,
) -> Vec<String> {
    match options.unknown_keys {
        UnknownKeyPolicy::Reject => Vec::new(),
        UnknownKeyPolicy::Ignore => input
            .keys()
            .filter(|key| descriptor.canonical_name(key).is_none())
            .cloned()
            .collect(),
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Report written for accepted input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Operation the input was validated against.
    pub operation: String,
    /// Resolved arguments keyed by canonical name, defaults applied.
    pub arguments: Map<String, Value>,
    /// Canonical names the caller supplied explicitly.
    pub supplied: Vec<String>,
    /// Keys dropped under the ignore policy.
    pub ignored_keys: Vec<String>,
}

impl ValidationReport {
    /// Builds a report from a validation result.
    #[must_use]
    pub fn new(descriptor: &Descriptor, validated: &ValidatedArgs) -> Self {
        let supplied = descriptor
            .parameters()
            .iter()
            .filter(|parameter| validated.is_supplied(&parameter.name))
            .map(|parameter| parameter.name.clone())
            .collect();
        Self {
            operation: descriptor.operation_name().to_string(),
            arguments: validated.to_json_map(),
            supplied,
            ignored_keys: validated.ignored_keys().to_vec(),
        }
    }
}
