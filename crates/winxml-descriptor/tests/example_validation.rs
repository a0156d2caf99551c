//! Bundled example tests for winxml-descriptor.
// crates/winxml-descriptor/tests/example_validation.rs
// =============================================================================
// Module: Example Validation Tests
// Description: Ensure bundled usage examples satisfy the descriptor.
// Purpose: Keep documentation examples executable against validation.
// =============================================================================

use winxml_descriptor::Descriptor;
use winxml_descriptor::Example;
use winxml_descriptor::ExampleError;
use winxml_descriptor::FragmentType;
use winxml_descriptor::Parameter;
use winxml_descriptor::ParameterKind;
use winxml_descriptor::WinXmlArgs;
use winxml_descriptor::example_inputs;

mod common;

type TestResult = Result<(), String>;

#[test]
fn every_bundled_example_validates() -> TestResult {
    let descriptor = common::descriptor()?;
    let inputs = example_inputs(descriptor).map_err(|err| err.to_string())?;
    if inputs.len() != descriptor.examples().len() {
        return Err(format!("expected one task per example, got {}", inputs.len()));
    }
    for input in &inputs {
        descriptor
            .validate(&input.args)
            .map_err(|err| format!("example {:?} invalid: {err}", input.caption))?;
    }
    Ok(())
}

#[test]
fn server_xml_example_sets_attribute_fragment() -> TestResult {
    let descriptor = common::descriptor()?;
    let inputs = example_inputs(descriptor).map_err(|err| err.to_string())?;
    let input = inputs.get(1).ok_or("second example missing")?;
    let validated = descriptor.validate(&input.args).map_err(|err| err.to_string())?;
    let args = WinXmlArgs::from_validated(&validated).map_err(|err| err.to_string())?;
    if args.fragment_type != FragmentType::Attribute
        || args.attribute.as_deref() != Some("sslEnabledProtocols")
        || args.path != r"C:\\Tomcat\conf\server.xml"
        || args.root != "//Server/Service[@name=\"Catalina\"]/Connector[@port=\"9443\"]"
    {
        return Err(format!("unexpected args: {args:?}"));
    }
    Ok(())
}

#[test]
fn example_without_module_task_is_rejected() -> TestResult {
    let descriptor = Descriptor::builder("win_xml")
        .parameter(Parameter::new("path", ParameterKind::Path, "Path."))
        .example(Example::new("wrong module", "- win_copy:\n    src: a\n"))
        .build()
        .map_err(|err| err.to_string())?;
    match example_inputs(&descriptor) {
        Err(ExampleError::Shape {
            index: 0,
            ..
        }) => Ok(()),
        other => Err(format!("expected shape error, got {other:?}")),
    }
}

#[test]
fn malformed_example_is_parse_error() -> TestResult {
    let descriptor = Descriptor::builder("win_xml")
        .example(Example::new("broken", "- win_xml: [unclosed\n"))
        .build()
        .map_err(|err| err.to_string())?;
    match example_inputs(&descriptor) {
        Err(ExampleError::Parse {
            index: 0,
            ..
        }) => Ok(()),
        other => Err(format!("expected parse error, got {other:?}")),
    }
}

#[test]
fn web_xml_example_body_is_kept_verbatim() -> TestResult {
    let descriptor = common::descriptor()?;
    let example = descriptor.examples().first().ok_or("first example missing")?;
    if !example.body.contains(r"path: C:\\apache-tomcat\webapps\myapp\WEB-INF\web.xml") {
        return Err(format!("example body rewritten: {}", example.body));
    }
    let inputs = example_inputs(descriptor).map_err(|err| err.to_string())?;
    let input = inputs.first().ok_or("first example task missing")?;
    let validated = descriptor.validate(&input.args).map_err(|err| err.to_string())?;
    let args = WinXmlArgs::from_validated(&validated).map_err(|err| err.to_string())?;
    if args.path != r"C:\\apache-tomcat\webapps\myapp\WEB-INF\web.xml" {
        return Err(format!("unexpected path: {}", args.path));
    }
    Ok(())
}
