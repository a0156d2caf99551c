// crates/winxml-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical `win-xml.toml` example. Every field is spelled out with its
//! default so the file doubles as a reference.

/// Returns a canonical example `win-xml.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[validation]
unknown_keys = "reject"
max_input_bytes = 1048576

[audit]
enabled = true
sink = "stderr"
# path = "win-xml-audit.jsonl"
"#,
    )
}
