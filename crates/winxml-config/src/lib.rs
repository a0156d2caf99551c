// crates/winxml-config/src/lib.rs
// ============================================================================
// Module: win-xml Config Library
// Description: Host configuration model, validation, and canonical example.
// Purpose: Single source of truth for win-xml.toml semantics.
// Dependencies: serde, toml, winxml-descriptor
// ============================================================================

//! ## Overview
//! `winxml-config` defines how a host running the `win_xml` descriptor is
//! configured: how strictly caller input is validated and where audit events
//! go. Loading is fail-closed with hard size and path limits.
//!
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
