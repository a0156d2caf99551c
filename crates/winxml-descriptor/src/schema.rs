// crates/winxml-descriptor/src/schema.rs
// ============================================================================
// Module: Descriptor Schemas
// Description: JSON schema builder for descriptor input.
// Purpose: Provide a canonical input schema for hosts and tooling.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Builds a JSON Schema (draft 2020-12) describing canonical-name input for a
//! descriptor. Aliases are resolved before schema checks, so the schema only
//! names canonical parameters. Cross-field rules become `if`/`then` blocks.

use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::descriptor::Descriptor;
use crate::descriptor::Parameter;
use crate::descriptor::ParameterKind;
use crate::rules::CrossFieldRule;

/// Returns the JSON schema for a descriptor's canonical input.
#[must_use]
pub fn descriptor_schema(descriptor: &Descriptor) -> Value {
    let mut properties = Map::new();
    for parameter in descriptor.parameters() {
        properties.insert(parameter.name.clone(), parameter_schema(parameter));
    }
    let required = descriptor
        .parameters()
        .iter()
        .filter(|parameter| parameter.required)
        .map(|parameter| Value::String(parameter.name.clone()))
        .collect::<Vec<_>>();

    let mut schema = json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": format!("win-xml://schemas/{}.schema.json", descriptor.operation_name()),
        "title": format!("{} input", descriptor.operation_name()),
        "description": descriptor.summary(),
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    });

    let conditions = descriptor
        .rules()
        .iter()
        .map(|rule| rule_schema(descriptor, rule))
        .collect::<Vec<_>>();
    if !conditions.is_empty()
        && let Some(object) = schema.as_object_mut()
    {
        object.insert("allOf".to_string(), Value::Array(conditions));
    }
    schema
}

/// Schema for one parameter.
fn parameter_schema(parameter: &Parameter) -> Value {
    let mut schema = match parameter.kind {
        ParameterKind::String => json!({ "type": "string" }),
        ParameterKind::Path => json!({ "type": "string", "minLength": 1 }),
        ParameterKind::Bool => json!({ "type": "boolean" }),
    };
    if let Some(object) = schema.as_object_mut() {
        object.insert("description".to_string(), Value::String(parameter.description.clone()));
        if let Some(allowed) = &parameter.allowed_values {
            object.insert(
                "enum".to_string(),
                Value::Array(allowed.iter().cloned().map(Value::String).collect()),
            );
        }
        if let Some(default) = &parameter.default {
            object.insert("default".to_string(), default.to_json());
        }
    }
    schema
}

/// Schema fragment enforcing a cross-field rule.
fn rule_schema(descriptor: &Descriptor, rule: &CrossFieldRule) -> Value {
    match rule {
        CrossFieldRule::RequiredIf {
            parameter,
            equals,
            requires,
        } => {
            let mut trigger = Map::new();
            trigger.insert(parameter.clone(), json!({ "const": equals.to_json() }));
            let mut condition = json!({ "properties": trigger });
            let triggered_by_default = descriptor
                .get_parameter(parameter)
                .ok()
                .and_then(|declared| declared.default.as_ref())
                .is_some_and(|default| default == equals);
            if !triggered_by_default && let Some(object) = condition.as_object_mut() {
                object.insert("required".to_string(), json!([parameter]));
            }
            json!({
                "if": condition,
                "then": { "required": requires }
            })
        }
    }
}
