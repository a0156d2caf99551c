// crates/winxml-descriptor/src/catalog.rs
// ============================================================================
// Module: win_xml Catalog Entry
// Description: Static declaration of the win_xml module descriptor.
// Purpose: Canonical parameter table consumed by hosts, docs, and schemas.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Declares the `win_xml` module: add an XML fragment (element, attribute
//! value, or text) beneath a node of an existing XML document on a Windows
//! host. The descriptor is built once per process and shared read-only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::OnceLock;

use crate::descriptor::ArgValue;
use crate::descriptor::Descriptor;
use crate::descriptor::DescriptorError;
use crate::descriptor::Example;
use crate::descriptor::Parameter;
use crate::descriptor::ParameterKind;
use crate::rules::CrossFieldRule;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Module identifier.
pub const WIN_XML_OPERATION: &str = "win_xml";
/// Remote XML document location.
pub const PARAM_PATH: &str = "path";
/// Fragment content.
pub const PARAM_FRAGMENT: &str = "fragment";
/// Parent node selector.
pub const PARAM_ROOT: &str = "root";
/// Backup flag.
pub const PARAM_BACKUP: &str = "backup";
/// Fragment type selector.
pub const PARAM_TYPE: &str = "type";
/// Attribute name for attribute fragments.
pub const PARAM_ATTRIBUTE: &str = "attribute";
/// Default parent node selector.
pub const DEFAULT_ROOT: &str = "DocumentElement";
/// Fragment types accepted by `type`.
pub const FRAGMENT_TYPES: [&str; 3] = ["element", "attribute", "text"];

/// Example: append a servlet filter to a Tomcat `web.xml`.
const EXAMPLE_WEB_XML: &str = r"- win_xml:
   path: C:\\apache-tomcat\webapps\myapp\WEB-INF\web.xml
   fragment: '<filter><filter-name>MyFilter</filter-name><filter-class>com.example.MyFilter</filter-class></filter>'
";

/// Example: set `sslEnabledProtocols` on a Tomcat connector.
const EXAMPLE_SERVER_XML: &str = r#"- win_xml:
   path: C:\\Tomcat\conf\server.xml
   root: '//Server/Service[@name="Catalina"]/Connector[@port="9443"]'
   attribute: 'sslEnabledProtocols'
   fragment: 'TLSv1,TLSv1.1,TLSv1.2'
   type: attribute
"#;

// ============================================================================
// SECTION: Descriptor
// ============================================================================

/// Process-wide descriptor instance.
static WIN_XML: OnceLock<Result<Descriptor, DescriptorError>> = OnceLock::new();

/// Returns the shared `win_xml` descriptor.
///
/// # Errors
///
/// Returns [`DescriptorError`] when the static declarations are inconsistent.
pub fn win_xml_descriptor() -> Result<&'static Descriptor, DescriptorError> {
    WIN_XML.get_or_init(build_win_xml_descriptor).as_ref().map_err(Clone::clone)
}

/// Builds a fresh `win_xml` descriptor from the static declarations.
///
/// # Errors
///
/// Returns [`DescriptorError`] when the static declarations are inconsistent.
pub fn build_win_xml_descriptor() -> Result<Descriptor, DescriptorError> {
    Descriptor::builder(WIN_XML_OPERATION)
        .version_introduced("2.0")
        .summary("Add XML fragment to an XML parent")
        .description("Adds XML fragments formatted as strings to existing XML on remote servers")
        .parameter(
            Parameter::new(PARAM_PATH, ParameterKind::Path, "The path of remote servers XML")
                .required()
                .alias("dest")
                .alias("file"),
        )
        .parameter(
            Parameter::new(
                PARAM_FRAGMENT,
                ParameterKind::String,
                "The string representation of the XML fragment to be added",
            )
            .required()
            .alias("xmlstring"),
        )
        .parameter(
            Parameter::new(
                PARAM_ROOT,
                ParameterKind::String,
                "The root of the remote server XML where the fragment will go",
            )
            .alias("xpath")
            .default_value(ArgValue::str(DEFAULT_ROOT)),
        )
        .parameter(
            Parameter::new(
                PARAM_BACKUP,
                ParameterKind::Bool,
                "Whether to backup the remote server's XML before applying the change (yes/no)",
            )
            .default_value(ArgValue::Bool(false)),
        )
        .parameter(
            Parameter::new(
                PARAM_TYPE,
                ParameterKind::String,
                "The type of XML you are working with",
            )
            .choices(FRAGMENT_TYPES)
            .default_value(ArgValue::str(FRAGMENT_TYPES[0])),
        )
        .parameter(Parameter::new(
            PARAM_ATTRIBUTE,
            ParameterKind::String,
            "The attribute name IFF type is 'attribute'",
        ))
        .rule(CrossFieldRule::required_if(
            PARAM_TYPE,
            ArgValue::str("attribute"),
            [PARAM_ATTRIBUTE],
        ))
        .example(Example::new("Apply our filter to Tomcat web.xml", EXAMPLE_WEB_XML))
        .example(Example::new(
            "Apply sslEnabledProtocols to Tomcat's server.xml",
            EXAMPLE_SERVER_XML,
        ))
        .author("Richard Levenberg (richard.levenberg@cosocloud.com)")
        .support_tier("core")
        .status("preview")
        .metadata_version("1.0")
        .build()
}
