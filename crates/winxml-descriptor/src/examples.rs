// crates/winxml-descriptor/src/examples.rs
// ============================================================================
// Module: Descriptor Examples
// Description: Extraction of module arguments from example task snippets.
// Purpose: Let tooling validate bundled examples against the descriptor.
// Dependencies: serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! Example bodies are opaque text to the descriptor itself. This module
//! reads them as YAML task lists and pulls out the argument map of every
//! task that invokes the descriptor's module, so the examples can be run
//! through [`crate::Descriptor::validate`] and kept honest.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use serde_yaml::Value as YamlValue;
use thiserror::Error;

use crate::descriptor::Descriptor;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Module arguments extracted from one example task.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleInput {
    /// Caption of the example the task came from.
    pub caption: Option<String>,
    /// Argument map passed to the module.
    pub args: Map<String, Value>,
}

/// Failures reading example bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExampleError {
    /// The example body is not valid YAML.
    #[error("example {index} is not valid yaml: {message}")]
    Parse {
        /// Zero-based example position.
        index: usize,
        /// Parser message.
        message: String,
    },
    /// The example body does not have the expected task-list shape.
    #[error("example {index} has unexpected shape: {message}")]
    Shape {
        /// Zero-based example position.
        index: usize,
        /// Description of the mismatch.
        message: String,
    },
}

// ============================================================================
// SECTION: Extraction
// ============================================================================

/// Extracts the module arguments from every bundled example.
///
/// # Errors
///
/// Returns [`ExampleError`] when an example cannot be parsed or invokes no task
/// of the descriptor's module.
pub fn example_inputs(descriptor: &Descriptor) -> Result<Vec<ExampleInput>, ExampleError> {
    let module = descriptor.operation_name();
    let mut inputs = Vec::new();
    for (index, example) in descriptor.examples().iter().enumerate() {
        let parsed: YamlValue =
            serde_yaml::from_str(&example.body).map_err(|err| ExampleError::Parse {
                index,
                message: err.to_string(),
            })?;
        let YamlValue::Sequence(tasks) = parsed else {
            return Err(shape(index, "expected a task list"));
        };
        let before = inputs.len();
        for task in &tasks {
            let Some(args) = task.get(module) else {
                continue;
            };
            let json = serde_json::to_value(args).map_err(|err| shape(index, &err.to_string()))?;
            let Value::Object(args) = json else {
                return Err(shape(index, "module arguments must be a mapping"));
            };
            inputs.push(ExampleInput {
                caption: example.caption.clone(),
                args,
            });
        }
        if inputs.len() == before {
            return Err(shape(index, &format!("no {module} task found")));
        }
    }
    Ok(inputs)
}

/// Builds a shape error.
fn shape(index: usize, message: &str) -> ExampleError {
    ExampleError::Shape {
        index,
        message: message.to_string(),
    }
}
