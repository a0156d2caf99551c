// crates/winxml-descriptor/tests/common/mod.rs
// =============================================================================
// Module: Descriptor Test Helpers
// Description: Shared helpers for descriptor integration tests.
// Purpose: Reduce duplication across integration tests for winxml-descriptor.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use serde_json::Map;
use serde_json::Value;
use winxml_descriptor::Descriptor;
use winxml_descriptor::win_xml_descriptor;

/// Returns the shared `win_xml` descriptor as a test result.
pub fn descriptor() -> Result<&'static Descriptor, String> {
    win_xml_descriptor().map_err(|err| err.to_string())
}

/// Converts a JSON literal into an input map.
pub fn object(value: Value) -> Result<Map<String, Value>, String> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(format!("expected json object, got {other}")),
    }
}
