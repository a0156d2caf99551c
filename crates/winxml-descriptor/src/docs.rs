// crates/winxml-descriptor/src/docs.rs
// ============================================================================
// Module: Descriptor Docs Generator
// Description: Markdown and YAML reference generators for descriptors.
// Purpose: Keep help text in sync with the parameter table.
// Dependencies: serde_yaml, std
// ============================================================================

//! ## Overview
//! Generates a Markdown reference and an automation-style `DOCUMENTATION`
//! YAML block from a [`Descriptor`]. Output is deterministic so committed
//! copies can be checked for drift with [`verify_descriptor_docs`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;
use std::fs;
use std::path::Path;

use serde_yaml::Mapping;
use serde_yaml::Value as YamlValue;
use thiserror::Error;

use crate::descriptor::ArgValue;
use crate::descriptor::Descriptor;
use crate::descriptor::Parameter;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when generating or verifying descriptor docs.
#[derive(Debug, Error)]
pub enum DocsError {
    /// IO failure while reading or writing docs.
    #[error("docs io error: {0}")]
    Io(String),
    /// Rendering failure.
    #[error("docs render error: {0}")]
    Render(String),
    /// Generated docs do not match the committed file.
    #[error("docs drift: {0}")]
    Drift(String),
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Generates the Markdown reference for a descriptor.
#[must_use]
pub fn descriptor_docs_markdown(descriptor: &Descriptor) -> String {
    let name = descriptor.operation_name();
    let mut out = String::new();

    out.push_str("<!--\n");
    let _ = writeln!(out, "Document: {name} module reference");
    out.push_str("Generated: This file is auto-generated; do not edit manually.\n");
    out.push_str("-->\n\n");

    let _ = writeln!(out, "# {name}\n");
    let _ = writeln!(out, "{}\n", descriptor.summary());

    out.push_str("## Overview\n\n");
    for paragraph in descriptor.description() {
        let _ = writeln!(out, "{paragraph}\n");
    }
    out.push_str("| Metadata | Value |\n");
    out.push_str("| --- | --- |\n");
    let metadata = [
        ("Version added", descriptor.version_introduced().to_string()),
        ("Status", descriptor.status().join(", ")),
        ("Supported by", descriptor.support_tier().to_string()),
        ("Author", descriptor.author().to_string()),
    ];
    for (label, value) in metadata {
        let _ = writeln!(out, "| {label} | {} |", escape_table_cell(&value));
    }
    out.push('\n');

    out.push_str("## Parameters\n\n");
    out.push_str(&render_parameter_table(descriptor.parameters()));
    out.push('\n');

    if !descriptor.rules().is_empty() {
        out.push_str("## Constraints\n\n");
        for rule in descriptor.rules() {
            let _ = writeln!(out, "- {rule}.");
        }
        out.push('\n');
    }

    if !descriptor.examples().is_empty() {
        out.push_str("## Examples\n\n");
        for (idx, example) in descriptor.examples().iter().enumerate() {
            match &example.caption {
                Some(caption) => {
                    let _ = writeln!(out, "### {caption}\n");
                }
                None => {
                    let _ = writeln!(out, "### Example {}\n", idx + 1);
                }
            }
            out.push_str("```yaml\n");
            out.push_str(example.body.trim_end());
            out.push_str("\n```\n\n");
        }
    }

    out
}

/// Renders the automation-style `DOCUMENTATION` YAML block.
///
/// # Errors
///
/// Returns [`DocsError::Render`] when YAML serialization fails.
pub fn descriptor_documentation_yaml(descriptor: &Descriptor) -> Result<String, DocsError> {
    let mut options = Mapping::new();
    for parameter in descriptor.parameters() {
        options.insert(yaml_str(&parameter.name), option_yaml(parameter));
    }

    let mut doc = Mapping::new();
    doc.insert(yaml_str("module"), yaml_str(descriptor.operation_name()));
    doc.insert(yaml_str("version_added"), yaml_str(descriptor.version_introduced()));
    doc.insert(yaml_str("short_description"), yaml_str(descriptor.summary()));
    doc.insert(yaml_str("description"), yaml_list(descriptor.description()));
    doc.insert(yaml_str("options"), YamlValue::Mapping(options));
    doc.insert(yaml_str("author"), yaml_str(descriptor.author()));

    let body = serde_yaml::to_string(&YamlValue::Mapping(doc))
        .map_err(|err| DocsError::Render(err.to_string()))?;
    Ok(format!("---\n{}", body.trim_start_matches("---\n")))
}

/// Writes the generated Markdown reference to `path`.
///
/// # Errors
///
/// Returns [`DocsError`] when file output fails.
pub fn write_descriptor_docs(descriptor: &Descriptor, path: &Path) -> Result<(), DocsError> {
    let content = descriptor_docs_markdown(descriptor);
    fs::write(path, content.as_bytes()).map_err(|err| DocsError::Io(err.to_string()))
}

/// Verifies the on-disk reference matches the generated output.
///
/// # Errors
///
/// Returns [`DocsError`] when the docs drift or cannot be read.
pub fn verify_descriptor_docs(descriptor: &Descriptor, path: &Path) -> Result<(), DocsError> {
    let content = descriptor_docs_markdown(descriptor);
    let existing = fs::read_to_string(path).map_err(|err| DocsError::Io(err.to_string()))?;
    if existing != content {
        return Err(DocsError::Drift(format!("docs mismatch: {}", path.display())));
    }
    Ok(())
}

// ============================================================================
// SECTION: Rendering Helpers
// ============================================================================

/// Renders the parameter reference table.
fn render_parameter_table(parameters: &[Parameter]) -> String {
    let mut table = String::new();
    table.push_str("| Parameter | Type | Required | Default | Choices | Aliases | Notes |\n");
    table.push_str("| --- | --- | --- | --- | --- | --- | --- |\n");
    for parameter in parameters {
        let required = if parameter.required { "yes" } else { "no" };
        let default = parameter.default.as_ref().map_or_else(|| "n/a".to_string(), format_default);
        let choices = parameter
            .allowed_values
            .as_ref()
            .map_or_else(|| "n/a".to_string(), |values| code_list(values));
        let aliases = if parameter.aliases.is_empty() {
            "n/a".to_string()
        } else {
            code_list(&parameter.aliases)
        };
        let _ = writeln!(
            table,
            "| `{}` | {} | {required} | {} | {} | {} | {} |",
            parameter.name,
            parameter.kind,
            escape_table_cell(&default),
            escape_table_cell(&choices),
            escape_table_cell(&aliases),
            escape_table_cell(&parameter.description),
        );
    }
    table
}

/// Renders names as a comma-separated list of code spans.
fn code_list(items: &[String]) -> String {
    items.iter().map(|item| format!("`{item}`")).collect::<Vec<_>>().join(", ")
}

/// Escapes pipe characters for markdown table cells.
fn escape_table_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

/// Formats a default value for display in docs.
fn format_default(value: &ArgValue) -> String {
    match value {
        ArgValue::Str(text) => format!("`{text}`"),
        ArgValue::Bool(flag) => flag.to_string(),
    }
}

/// Builds the YAML option entry for one parameter.
fn option_yaml(parameter: &Parameter) -> YamlValue {
    let mut option = Mapping::new();
    let description = std::slice::from_ref(&parameter.description);
    option.insert(yaml_str("description"), yaml_list(description));
    option.insert(yaml_str("type"), yaml_str(parameter.kind.as_str()));
    option.insert(yaml_str("required"), YamlValue::Bool(parameter.required));
    if let Some(default) = &parameter.default {
        let value = match default {
            ArgValue::Str(text) => yaml_str(text),
            ArgValue::Bool(flag) => YamlValue::Bool(*flag),
        };
        option.insert(yaml_str("default"), value);
    }
    if let Some(allowed) = &parameter.allowed_values {
        option.insert(yaml_str("choices"), yaml_list(allowed));
    }
    if !parameter.aliases.is_empty() {
        option.insert(yaml_str("aliases"), yaml_list(&parameter.aliases));
    }
    YamlValue::Mapping(option)
}

/// Wraps text as a YAML string.
fn yaml_str(text: &str) -> YamlValue {
    YamlValue::String(text.to_string())
}

/// Wraps a string list as a YAML sequence.
fn yaml_list(items: &[String]) -> YamlValue {
    YamlValue::Sequence(items.iter().map(|item| yaml_str(item)).collect())
}
