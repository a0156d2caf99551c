//! Schema alignment tests for winxml-descriptor.
// crates/winxml-descriptor/tests/schema_alignment.rs
// =============================================================================
// Module: Schema Alignment Tests
// Description: Ensure the generated JSON schema matches descriptor semantics.
// Purpose: Prevent drift between validation, defaults, and the published schema.
// =============================================================================

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;
use winxml_descriptor::descriptor_schema;
use winxml_descriptor::example_inputs;

mod common;

type TestResult = Result<(), String>;

fn compile(schema: &Value) -> Result<Validator, String> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|err| format!("failed to compile schema: {err}"))
}

fn errors(validator: &Validator, instance: &Value) -> Vec<String> {
    validator.iter_errors(instance).map(|err| err.to_string()).collect()
}

#[test]
fn schema_defaults_match_descriptor_defaults() -> TestResult {
    let descriptor = common::descriptor()?;
    let schema = descriptor_schema(descriptor);
    for parameter in descriptor.parameters() {
        let pointer = format!("/properties/{}/default", parameter.name);
        let actual = schema.pointer(&pointer);
        let expected = parameter.default.as_ref().map(winxml_descriptor::ArgValue::to_json);
        if actual != expected.as_ref() {
            return Err(format!("default mismatch at {pointer}: {actual:?} vs {expected:?}"));
        }
    }
    Ok(())
}

#[test]
fn schema_lists_required_parameters() -> TestResult {
    let descriptor = common::descriptor()?;
    let schema = descriptor_schema(descriptor);
    if schema.get("required") != Some(&json!(["path", "fragment"])) {
        return Err(format!("unexpected required list: {:?}", schema.get("required")));
    }
    if schema.pointer("/properties/type/enum") != Some(&json!(["element", "attribute", "text"])) {
        return Err("type enum missing from schema".to_string());
    }
    Ok(())
}

#[test]
fn validated_examples_satisfy_schema() -> TestResult {
    let descriptor = common::descriptor()?;
    let validator = compile(&descriptor_schema(descriptor))?;
    for example in example_inputs(descriptor).map_err(|err| err.to_string())? {
        let validated = descriptor.validate(&example.args).map_err(|err| err.to_string())?;
        let instance = Value::Object(validated.to_json_map());
        let found = errors(&validator, &instance);
        if !found.is_empty() {
            return Err(format!("example {:?} rejected: {}", example.caption, found.join(", ")));
        }
    }
    Ok(())
}

#[test]
fn schema_enforces_attribute_rule() -> TestResult {
    let descriptor = common::descriptor()?;
    let validator = compile(&descriptor_schema(descriptor))?;
    let missing = json!({"path": "p", "fragment": "f", "type": "attribute"});
    if validator.is_valid(&missing) {
        return Err("schema accepted attribute type without attribute".to_string());
    }
    let present = json!({"path": "p", "fragment": "f", "type": "attribute", "attribute": "a"});
    if !validator.is_valid(&present) {
        let found = errors(&validator, &present);
        return Err(format!("schema rejected valid input: {}", found.join(", ")));
    }
    let element = json!({"path": "p", "fragment": "f"});
    if !validator.is_valid(&element) {
        return Err("schema rejected element input without type".to_string());
    }
    Ok(())
}

#[test]
fn schema_rejects_unknown_and_empty_path() -> TestResult {
    let descriptor = common::descriptor()?;
    let validator = compile(&descriptor_schema(descriptor))?;
    if validator.is_valid(&json!({"path": "p", "fragment": "f", "xml": "x"})) {
        return Err("schema accepted unknown key".to_string());
    }
    if validator.is_valid(&json!({"path": "", "fragment": "f"})) {
        return Err("schema accepted empty path".to_string());
    }
    Ok(())
}
