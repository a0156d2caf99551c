// crates/winxml-cli/src/lib.rs
// ============================================================================
// Module: win-xml CLI Library
// Description: Shared helpers for the win-xml command-line interface.
// Purpose: Input decoding, audited validation, and audit sinks for the binary.
// Dependencies: serde, serde_json, serde_yaml, toml, winxml-config, winxml-descriptor
// ============================================================================

//! ## Overview
//! The binary entry point (`src/main.rs`) stays a thin dispatcher. Everything
//! it does with caller input lives here so it can be unit tested: decoding
//! input files, running descriptor validation, and emitting one audit event
//! per validation.
//!
//! Security posture: CLI inputs are untrusted and must be validated.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Structured audit events and sinks.
pub mod audit;
/// Caller input decoding.
pub mod input;
/// Audited validation and report rendering.
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::*;
pub use input::InputError;
pub use input::InputFormat;
pub use input::parse_input;
pub use validation::ValidationReport;
pub use validation::audit_malformed_input;
pub use validation::validate_and_audit;
