// crates/winxml-descriptor/src/descriptor.rs
// ============================================================================
// Module: Module Descriptor
// Description: Static metadata records for a module and its parameters.
// Purpose: Provide an immutable, indexed parameter table with checked invariants.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`Descriptor`] is built once from static declarations through
//! [`DescriptorBuilder`] and is never mutated afterwards. The builder checks
//! every declaration invariant and returns [`DescriptorError`] instead of
//! producing an inconsistent table. Lookups by canonical name or alias go
//! through a name index built at the same time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::rules::CrossFieldRule;

// ============================================================================
// SECTION: Values
// ============================================================================

/// Value type accepted by a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Free-form string.
    String,
    /// Non-empty string naming a file on the target host.
    Path,
    /// Boolean flag (`yes`/`no` style strings are accepted).
    Bool,
}

impl ParameterKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "str",
            Self::Path => "path",
            Self::Bool => "bool",
        }
    }

    /// Returns true when `value` has the shape this kind stores.
    #[must_use]
    pub const fn accepts(self, value: &ArgValue) -> bool {
        matches!(
            (self, value),
            (Self::String | Self::Path, ArgValue::Str(_)) | (Self::Bool, ArgValue::Bool(_))
        )
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Boolean value.
    Bool(bool),
    /// String value.
    Str(String),
}

impl ArgValue {
    /// Builds a string value.
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Returns the string payload when this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            Self::Bool(_) => None,
        }
    }

    /// Returns the boolean payload when this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Str(_) => None,
        }
    }

    /// Returns the text used when comparing against a choice set.
    #[must_use]
    pub fn choice_text(&self) -> String {
        match self {
            Self::Str(value) => value.clone(),
            Self::Bool(value) => value.to_string(),
        }
    }

    /// Converts the value into its JSON form.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Str(value) => serde_json::Value::String(value.clone()),
            Self::Bool(value) => serde_json::Value::Bool(*value),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// One named input slot of a descriptor.
///
/// # Invariants
/// When owned by a [`Descriptor`]:
/// - `name` is unique within the descriptor and distinct from every alias.
/// - `required` parameters carry no `default`.
/// - `allowed_values`, when present, is non-empty and contains `default`.
/// - `default`, when present, matches `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Canonical parameter name.
    pub name: String,
    /// Alternate names accepted for this parameter.
    pub aliases: Vec<String>,
    /// Value type.
    pub kind: ParameterKind,
    /// Whether callers must supply the parameter.
    pub required: bool,
    /// Value applied when the caller omits the parameter.
    pub default: Option<ArgValue>,
    /// Closed set of accepted values.
    pub allowed_values: Option<Vec<String>>,
    /// Human-readable description.
    pub description: String,
}

impl Parameter {
    /// Starts an optional parameter declaration with no default.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: ParameterKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            kind,
            required: false,
            default: None,
            allowed_values: None,
            description: description.into(),
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Marks the parameter as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: ArgValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Restricts accepted values to `choices`.
    #[must_use]
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true when `name` is this parameter's canonical name or an alias.
    #[must_use]
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|alias| alias == name)
    }
}

// ============================================================================
// SECTION: Examples
// ============================================================================

/// Opaque usage example attached to a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// One-line caption describing the example.
    pub caption: Option<String>,
    /// Free-form example body (an automation task snippet).
    pub body: String,
}

impl Example {
    /// Builds an example with a caption.
    #[must_use]
    pub fn new(caption: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            caption: Some(caption.into()),
            body: body.into(),
        }
    }
}

// ============================================================================
// SECTION: Descriptor
// ============================================================================

/// Immutable metadata record for one module.
///
/// # Invariants
/// - Every invariant listed on [`Parameter`] holds for `parameters`.
/// - `index` maps every canonical name and alias to exactly one position in `parameters`.
/// - Every parameter referenced by `rules` is declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// Module identifier.
    operation_name: String,
    /// Release in which the module first shipped.
    version_introduced: String,
    /// One-line summary.
    summary: String,
    /// Long-form description paragraphs.
    description: Vec<String>,
    /// Parameters in declaration order.
    parameters: Vec<Parameter>,
    /// Cross-field rules evaluated after per-parameter checks.
    rules: Vec<CrossFieldRule>,
    /// Usage examples in declaration order.
    examples: Vec<Example>,
    /// Author attribution.
    author: String,
    /// Support tier label.
    support_tier: String,
    /// Release status labels.
    status: Vec<String>,
    /// Metadata format version.
    metadata_version: String,
    /// Name and alias lookup table.
    #[serde(skip)]
    index: BTreeMap<String, usize>,
}

impl Descriptor {
    /// Starts a descriptor declaration.
    #[must_use]
    pub fn builder(operation_name: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder::new(operation_name)
    }

    /// Returns the module identifier.
    #[must_use]
    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    /// Returns the release in which the module first shipped.
    #[must_use]
    pub fn version_introduced(&self) -> &str {
        &self.version_introduced
    }

    /// Returns the one-line summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the long-form description paragraphs.
    #[must_use]
    pub fn description(&self) -> &[String] {
        &self.description
    }

    /// Returns the parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Returns the cross-field rules.
    #[must_use]
    pub fn rules(&self) -> &[CrossFieldRule] {
        &self.rules
    }

    /// Returns the usage examples.
    #[must_use]
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// Returns the author attribution.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the support tier label.
    #[must_use]
    pub fn support_tier(&self) -> &str {
        &self.support_tier
    }

    /// Returns the release status labels.
    #[must_use]
    pub fn status(&self) -> &[String] {
        &self.status
    }

    /// Returns the metadata format version.
    #[must_use]
    pub fn metadata_version(&self) -> &str {
        &self.metadata_version
    }

    /// Looks up a parameter by canonical name or alias.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when no parameter answers to `name_or_alias`.
    pub fn get_parameter(&self, name_or_alias: &str) -> Result<&Parameter, NotFoundError> {
        self.position(name_or_alias).map(|idx| &self.parameters[idx]).ok_or_else(|| {
            NotFoundError {
                name: name_or_alias.to_string(),
            }
        })
    }

    /// Resolves a name or alias to the canonical parameter name.
    #[must_use]
    pub fn canonical_name(&self, name_or_alias: &str) -> Option<&str> {
        self.position(name_or_alias).map(|idx| self.parameters[idx].name.as_str())
    }

    /// Returns the declaration position for a name or alias.
    pub(crate) fn position(&self, name_or_alias: &str) -> Option<usize> {
        self.index.get(name_or_alias).copied()
    }
}

/// Builder that checks declaration invariants before producing a [`Descriptor`].
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    /// Descriptor under construction.
    draft: Descriptor,
}

impl DescriptorBuilder {
    /// Creates a builder with empty metadata.
    #[must_use]
    pub fn new(operation_name: impl Into<String>) -> Self {
        Self {
            draft: Descriptor {
                operation_name: operation_name.into(),
                version_introduced: String::new(),
                summary: String::new(),
                description: Vec::new(),
                parameters: Vec::new(),
                rules: Vec::new(),
                examples: Vec::new(),
                author: String::new(),
                support_tier: String::new(),
                status: Vec::new(),
                metadata_version: String::new(),
                index: BTreeMap::new(),
            },
        }
    }

    /// Sets the release in which the module first shipped.
    #[must_use]
    pub fn version_introduced(mut self, version: impl Into<String>) -> Self {
        self.draft.version_introduced = version.into();
        self
    }

    /// Sets the one-line summary.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.draft.summary = summary.into();
        self
    }

    /// Appends a description paragraph.
    #[must_use]
    pub fn description(mut self, paragraph: impl Into<String>) -> Self {
        self.draft.description.push(paragraph.into());
        self
    }

    /// Appends a parameter declaration.
    #[must_use]
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.draft.parameters.push(parameter);
        self
    }

    /// Appends a cross-field rule.
    #[must_use]
    pub fn rule(mut self, rule: CrossFieldRule) -> Self {
        self.draft.rules.push(rule);
        self
    }

    /// Appends a usage example.
    #[must_use]
    pub fn example(mut self, example: Example) -> Self {
        self.draft.examples.push(example);
        self
    }

    /// Sets the author attribution.
    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.draft.author = author.into();
        self
    }

    /// Sets the support tier label.
    #[must_use]
    pub fn support_tier(mut self, tier: impl Into<String>) -> Self {
        self.draft.support_tier = tier.into();
        self
    }

    /// Appends a release status label.
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.draft.status.push(status.into());
        self
    }

    /// Sets the metadata format version.
    #[must_use]
    pub fn metadata_version(mut self, version: impl Into<String>) -> Self {
        self.draft.metadata_version = version.into();
        self
    }

    /// Checks every declaration invariant and freezes the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] when a declaration is inconsistent.
    pub fn build(self) -> Result<Descriptor, DescriptorError> {
        let mut descriptor = self.draft;
        if descriptor.operation_name.trim().is_empty() {
            return Err(DescriptorError::EmptyName);
        }
        descriptor.index = build_index(&descriptor.parameters)?;
        for parameter in &descriptor.parameters {
            check_parameter(parameter)?;
        }
        for rule in &descriptor.rules {
            for name in rule.referenced_parameters() {
                if !descriptor.index.contains_key(name) {
                    return Err(DescriptorError::UnknownRuleParameter(name.to_string()));
                }
            }
        }
        Ok(descriptor)
    }
}

/// Builds the name and alias index, rejecting collisions.
fn build_index(parameters: &[Parameter]) -> Result<BTreeMap<String, usize>, DescriptorError> {
    let mut index = BTreeMap::new();
    let mut names = BTreeSet::new();
    for (idx, parameter) in parameters.iter().enumerate() {
        if parameter.name.trim().is_empty() {
            return Err(DescriptorError::EmptyName);
        }
        if !names.insert(parameter.name.as_str()) {
            return Err(DescriptorError::DuplicateName(parameter.name.clone()));
        }
        index.insert(parameter.name.clone(), idx);
    }
    for (idx, parameter) in parameters.iter().enumerate() {
        for alias in &parameter.aliases {
            if names.contains(alias.as_str()) {
                return Err(DescriptorError::AliasShadowsName {
                    alias: alias.clone(),
                    parameter: parameter.name.clone(),
                });
            }
            if let Some(existing) = index.insert(alias.clone(), idx) {
                return Err(DescriptorError::DuplicateAlias {
                    alias: alias.clone(),
                    first: parameters[existing].name.clone(),
                    second: parameter.name.clone(),
                });
            }
        }
    }
    Ok(index)
}

/// Checks the per-parameter declaration invariants.
fn check_parameter(parameter: &Parameter) -> Result<(), DescriptorError> {
    if parameter.required && parameter.default.is_some() {
        return Err(DescriptorError::RequiredWithDefault(parameter.name.clone()));
    }
    if let Some(default) = &parameter.default
        && !parameter.kind.accepts(default)
    {
        return Err(DescriptorError::DefaultKindMismatch {
            parameter: parameter.name.clone(),
            kind: parameter.kind,
        });
    }
    if let Some(allowed) = &parameter.allowed_values {
        if allowed.is_empty() {
            return Err(DescriptorError::EmptyChoices(parameter.name.clone()));
        }
        if let Some(default) = &parameter.default {
            let text = default.choice_text();
            if !allowed.contains(&text) {
                return Err(DescriptorError::DefaultNotInChoices {
                    parameter: parameter.name.clone(),
                    default: text,
                });
            }
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Inconsistent descriptor declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Operation or parameter name is empty.
    #[error("descriptor names must be non-empty")]
    EmptyName,
    /// Two parameters share a canonical name.
    #[error("duplicate parameter name: {0}")]
    DuplicateName(String),
    /// An alias is declared by more than one parameter.
    #[error("alias {alias} declared by both {first} and {second}")]
    DuplicateAlias {
        /// Conflicting alias.
        alias: String,
        /// Parameter that declared the alias first.
        first: String,
        /// Parameter that declared it again.
        second: String,
    },
    /// An alias repeats a canonical parameter name.
    #[error("alias {alias} of {parameter} shadows a parameter name")]
    AliasShadowsName {
        /// Offending alias.
        alias: String,
        /// Parameter declaring the alias.
        parameter: String,
    },
    /// A required parameter declares a default.
    #[error("required parameter {0} must not declare a default")]
    RequiredWithDefault(String),
    /// A choice set is empty.
    #[error("parameter {0} declares an empty choice set")]
    EmptyChoices(String),
    /// A default is outside the declared choices.
    #[error("default {default} of {parameter} is not an allowed value")]
    DefaultNotInChoices {
        /// Offending parameter.
        parameter: String,
        /// Declared default, rendered as text.
        default: String,
    },
    /// A default does not match the parameter kind.
    #[error("default of {parameter} does not match kind {kind}")]
    DefaultKindMismatch {
        /// Offending parameter.
        parameter: String,
        /// Declared kind.
        kind: ParameterKind,
    },
    /// A rule references an undeclared parameter.
    #[error("rule references undeclared parameter: {0}")]
    UnknownRuleParameter(String),
}

/// Lookup of an undeclared parameter name or alias.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parameter not found: {name}")]
pub struct NotFoundError {
    /// Name that failed to resolve.
    pub name: String,
}
