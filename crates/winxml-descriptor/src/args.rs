// crates/winxml-descriptor/src/args.rs
// ============================================================================
// Module: win_xml Typed Arguments
// Description: Typed view of validated win_xml input.
// Purpose: Hand the executor a checked struct instead of a loose value map.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`WinXmlArgs::from_validated`] converts a successful validation result
//! into the typed payload the executor consumes. Conversion re-checks the
//! shape of each value so a result produced by a different descriptor cannot
//! be smuggled through.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::PARAM_ATTRIBUTE;
use crate::catalog::PARAM_BACKUP;
use crate::catalog::PARAM_FRAGMENT;
use crate::catalog::PARAM_PATH;
use crate::catalog::PARAM_ROOT;
use crate::catalog::PARAM_TYPE;
use crate::validate::ValidatedArgs;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Kind of XML content the fragment represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentType {
    /// Fragment is an element appended to the parent node.
    #[default]
    Element,
    /// Fragment is the value of an attribute on the parent node.
    Attribute,
    /// Fragment is text content of the parent node.
    Text,
}

impl FragmentType {
    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Element => "element",
            Self::Attribute => "attribute",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for FragmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FragmentType {
    type Err = ArgsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "element" => Ok(Self::Element),
            "attribute" => Ok(Self::Attribute),
            "text" => Ok(Self::Text),
            other => Err(ArgsError::InvalidValue {
                parameter: PARAM_TYPE,
                value: other.to_string(),
            }),
        }
    }
}

/// Typed `win_xml` arguments.
///
/// # Invariants
/// - `attribute` is `Some` when `fragment_type` is [`FragmentType::Attribute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinXmlArgs {
    /// Remote XML document location.
    pub path: String,
    /// Fragment content.
    pub fragment: String,
    /// Parent node selector.
    pub root: String,
    /// Whether to back up the document first.
    pub backup: bool,
    /// Fragment type.
    #[serde(rename = "type")]
    pub fragment_type: FragmentType,
    /// Attribute name for attribute fragments.
    pub attribute: Option<String>,
}

impl WinXmlArgs {
    /// Builds typed arguments from a validated `win_xml` input.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError`] when a value is missing or has the wrong shape.
    pub fn from_validated(args: &ValidatedArgs) -> Result<Self, ArgsError> {
        let fragment_type: FragmentType = required_str(args, PARAM_TYPE)?.parse()?;
        let attribute = args.get_str(PARAM_ATTRIBUTE).map(ToString::to_string);
        if fragment_type == FragmentType::Attribute && attribute.is_none() {
            return Err(ArgsError::Missing(PARAM_ATTRIBUTE));
        }
        Ok(Self {
            path: required_str(args, PARAM_PATH)?.to_string(),
            fragment: required_str(args, PARAM_FRAGMENT)?.to_string(),
            root: required_str(args, PARAM_ROOT)?.to_string(),
            backup: args.get_bool(PARAM_BACKUP).ok_or(ArgsError::Missing(PARAM_BACKUP))?,
            fragment_type,
            attribute,
        })
    }
}

/// Reads a string value that must be present.
fn required_str<'a>(args: &'a ValidatedArgs, name: &'static str) -> Result<&'a str, ArgsError> {
    args.get_str(name).ok_or(ArgsError::Missing(name))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures converting validated input into [`WinXmlArgs`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    /// A value is absent or not of the expected shape.
    #[error("validated input lacks {0}")]
    Missing(&'static str),
    /// A value is outside the accepted set.
    #[error("invalid value for {parameter}: {value}")]
    InvalidValue {
        /// Parameter name.
        parameter: &'static str,
        /// Offending value.
        value: String,
    },
}
