// crates/winxml-descriptor/src/lib.rs
// ============================================================================
// Module: win-xml Descriptor Library
// Description: Module descriptor model, validation, and artifact generation.
// Purpose: Single source of truth for the win_xml parameter contract.
// Dependencies: serde, serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! `winxml-descriptor` defines the static descriptor for the `win_xml`
//! module: its parameters, aliases, defaults, choice sets, cross-field rules,
//! and usage examples. Hosts use it to validate caller input before handing
//! typed arguments to the executor, and to generate help text and schemas.
//!
//! Security posture: caller input is untrusted; validation collects every
//! violation and fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod args;
pub mod catalog;
pub mod descriptor;
pub mod docs;
pub mod examples;
pub mod rules;
pub mod schema;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use args::ArgsError;
pub use args::FragmentType;
pub use args::WinXmlArgs;
pub use catalog::WIN_XML_OPERATION;
pub use catalog::build_win_xml_descriptor;
pub use catalog::win_xml_descriptor;
pub use descriptor::*;
pub use docs::DocsError;
pub use docs::descriptor_docs_markdown;
pub use docs::descriptor_documentation_yaml;
pub use docs::verify_descriptor_docs;
pub use docs::write_descriptor_docs;
pub use examples::ExampleError;
pub use examples::ExampleInput;
pub use examples::example_inputs;
pub use rules::CrossFieldRule;
pub use schema::descriptor_schema;
pub use validate::*;
