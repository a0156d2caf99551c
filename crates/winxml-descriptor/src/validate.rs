// crates/winxml-descriptor/src/validate.rs
// ============================================================================
// Module: Input Validation
// Description: Validation of caller input maps against a descriptor.
// Purpose: Resolve aliases, coerce values, apply defaults, and collect violations.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`Descriptor::validate`] checks a caller-supplied JSON object against the
//! descriptor. Keys are resolved through the alias index, values are coerced
//! to the parameter kind, choice sets are enforced, required parameters are
//! checked, and cross-field rules run last. Every violation is collected;
//! validation never stops at the first failure.
//!
//! Violations are ordered deterministically: per-key violations in input key
//! order, then alias conflicts and missing required parameters in
//! declaration order, then cross-field violations in rule order.
//!
//! Security posture: caller input is untrusted; unknown keys are rejected
//! unless the host explicitly opts into ignoring them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::descriptor::ArgValue;
use crate::descriptor::Descriptor;
use crate::descriptor::Parameter;
use crate::descriptor::ParameterKind;
use crate::rules::RuleInputs;
use crate::rules::evaluate_rule;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// String spellings accepted as boolean true (compared case-insensitively).
const TRUE_WORDS: &[&str] = &["yes", "y", "true", "t", "on", "1"];
/// String spellings accepted as boolean false (compared case-insensitively).
const FALSE_WORDS: &[&str] = &["no", "n", "false", "f", "off", "0"];

// ============================================================================
// SECTION: Options
// ============================================================================

/// Host policy for keys that match no parameter or alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeyPolicy {
    /// Report each unknown key as a violation (strict mode).
    #[default]
    Reject,
    /// Drop unknown keys and list them on the result.
    Ignore,
}

/// Options controlling a validation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Unknown key handling.
    pub unknown_keys: UnknownKeyPolicy,
}

impl ValidationOptions {
    /// Strict options: unknown keys are violations.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            unknown_keys: UnknownKeyPolicy::Reject,
        }
    }

    /// Lenient options: unknown keys are ignored.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            unknown_keys: UnknownKeyPolicy::Ignore,
        }
    }
}

// ============================================================================
// SECTION: Violations
// ============================================================================

/// A single validation failure, tagged with the offending parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// A required parameter was not supplied.
    #[error("missing required parameter: {parameter}")]
    MissingRequired {
        /// Canonical parameter name.
        parameter: String,
    },
    /// A value is outside the parameter's choice set.
    #[error("value of {parameter} must be one of: {} (got {value})", .allowed.join(", "))]
    InvalidChoice {
        /// Canonical parameter name.
        parameter: String,
        /// Supplied value rendered as text.
        value: String,
        /// Accepted values.
        allowed: Vec<String>,
    },
    /// A key matches no parameter or alias.
    #[error("unsupported parameter: {parameter}")]
    UnknownKey {
        /// Key as supplied by the caller.
        parameter: String,
    },
    /// A value cannot be converted to the parameter kind.
    #[error("value of {parameter} is not a valid {expected}")]
    InvalidType {
        /// Canonical parameter name.
        parameter: String,
        /// Expected kind.
        expected: ParameterKind,
    },
    /// The same parameter was supplied under more than one name.
    #[error("parameter {parameter} supplied more than once via: {}", .keys.join(", "))]
    AliasConflict {
        /// Canonical parameter name.
        parameter: String,
        /// Keys that resolved to the parameter, in input order.
        keys: Vec<String>,
    },
    /// A cross-field rule requires the parameter.
    #[error("parameter {parameter} is required when {condition}")]
    CrossFieldConstraintViolation {
        /// Canonical name of the parameter that became required.
        parameter: String,
        /// Triggering condition.
        condition: String,
    },
}

/// Violation classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// See [`Violation::MissingRequired`].
    MissingRequired,
    /// See [`Violation::InvalidChoice`].
    InvalidChoice,
    /// See [`Violation::UnknownKey`].
    UnknownKey,
    /// See [`Violation::InvalidType`].
    InvalidType,
    /// See [`Violation::AliasConflict`].
    AliasConflict,
    /// See [`Violation::CrossFieldConstraintViolation`].
    CrossFieldConstraintViolation,
}

impl ViolationKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequired => "missing_required",
            Self::InvalidChoice => "invalid_choice",
            Self::UnknownKey => "unknown_key",
            Self::InvalidType => "invalid_type",
            Self::AliasConflict => "alias_conflict",
            Self::CrossFieldConstraintViolation => "cross_field_constraint_violation",
        }
    }
}

impl Violation {
    /// Returns the parameter (or unknown key) the violation is tagged with.
    #[must_use]
    pub fn parameter(&self) -> &str {
        match self {
            Self::MissingRequired {
                parameter,
            }
            | Self::InvalidChoice {
                parameter,
                ..
            }
            | Self::UnknownKey {
                parameter,
            }
            | Self::InvalidType {
                parameter,
                ..
            }
            | Self::AliasConflict {
                parameter,
                ..
            }
            | Self::CrossFieldConstraintViolation {
                parameter,
                ..
            } => parameter,
        }
    }

    /// Returns the violation classification.
    #[must_use]
    pub const fn kind(&self) -> ViolationKind {
        match self {
            Self::MissingRequired {
                ..
            } => ViolationKind::MissingRequired,
            Self::InvalidChoice {
                ..
            } => ViolationKind::InvalidChoice,
            Self::UnknownKey {
                ..
            } => ViolationKind::UnknownKey,
            Self::InvalidType {
                ..
            } => ViolationKind::InvalidType,
            Self::AliasConflict {
                ..
            } => ViolationKind::AliasConflict,
            Self::CrossFieldConstraintViolation {
                ..
            } => ViolationKind::CrossFieldConstraintViolation,
        }
    }
}

/// Composite validation failure.
///
/// # Invariants
/// - `violations` is non-empty when produced by [`Descriptor::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("input validation failed: {}", render_violations(.violations))]
pub struct ValidationError {
    /// Collected violations in deterministic order.
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Returns true when any violation has the given kind.
    #[must_use]
    pub fn has(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|violation| violation.kind() == kind)
    }

    /// Returns the violations of one kind.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |violation| violation.kind() == kind)
    }
}

/// Joins violation messages for display.
fn render_violations(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

// ============================================================================
// SECTION: Results
// ============================================================================

/// Outcome of a validation pass.
pub type ValidationResult = Result<ValidatedArgs, ValidationError>;

/// Successfully validated input keyed by canonical parameter name.
///
/// # Invariants
/// - `values` holds every supplied parameter and every omitted parameter with a default.
/// - `supplied` lists canonical names the caller supplied with a non-null value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedArgs {
    /// Resolved values.
    values: BTreeMap<String, ArgValue>,
    /// Canonical names supplied by the caller.
    supplied: BTreeSet<String>,
    /// Unknown keys dropped under [`UnknownKeyPolicy::Ignore`].
    ignored_keys: Vec<String>,
}

impl ValidatedArgs {
    /// Returns the resolved value for a canonical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// Returns the resolved string value for a canonical name.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(ArgValue::as_str)
    }

    /// Returns the resolved boolean value for a canonical name.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(ArgValue::as_bool)
    }

    /// Returns true when the caller supplied the parameter.
    #[must_use]
    pub fn is_supplied(&self, name: &str) -> bool {
        self.supplied.contains(name)
    }

    /// Returns every resolved value.
    #[must_use]
    pub const fn values(&self) -> &BTreeMap<String, ArgValue> {
        &self.values
    }

    /// Returns unknown keys dropped during validation.
    #[must_use]
    pub fn ignored_keys(&self) -> &[String] {
        &self.ignored_keys
    }

    /// Returns the resolved values as a JSON object.
    #[must_use]
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.values.iter().map(|(name, value)| (name.clone(), value.to_json())).collect()
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

impl Descriptor {
    /// Validates caller input in strict mode.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every violation found.
    pub fn validate(&self, input: &Map<String, Value>) -> ValidationResult {
        self.validate_with(input, ValidationOptions::strict())
    }

    /// Validates caller input with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every violation found.
    pub fn validate_with(
        &self,
        input: &Map<String, Value>,
        options: ValidationOptions,
    ) -> ValidationResult {
        let parameters = self.parameters();
        let mut violations = Vec::new();
        let mut keys_by_position: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        let mut coerced: BTreeMap<usize, ArgValue> = BTreeMap::new();
        let mut rejected_positions = BTreeSet::new();
        let mut ignored_keys = Vec::new();

        for (key, raw) in input {
            let Some(position) = self.position(key) else {
                match options.unknown_keys {
                    UnknownKeyPolicy::Reject => violations.push(Violation::UnknownKey {
                        parameter: key.clone(),
                    }),
                    UnknownKeyPolicy::Ignore => ignored_keys.push(key.clone()),
                }
                continue;
            };
            if raw.is_null() {
                continue;
            }
            let keys = keys_by_position.entry(position).or_default();
            keys.push(key.clone());
            if keys.len() > 1 {
                continue;
            }
            match check_value(&parameters[position], raw) {
                Ok(value) => {
                    coerced.insert(position, value);
                }
                Err(violation) => {
                    violations.push(violation);
                    rejected_positions.insert(position);
                }
            }
        }

        for (position, keys) in &keys_by_position {
            if keys.len() > 1 {
                violations.push(Violation::AliasConflict {
                    parameter: parameters[*position].name.clone(),
                    keys: keys.clone(),
                });
                rejected_positions.insert(*position);
                coerced.remove(position);
            }
        }

        let mut values = BTreeMap::new();
        for (position, parameter) in parameters.iter().enumerate() {
            let supplied = keys_by_position.contains_key(&position);
            if parameter.required && !supplied {
                violations.push(Violation::MissingRequired {
                    parameter: parameter.name.clone(),
                });
            }
            if let Some(value) = coerced.remove(&position) {
                values.insert(parameter.name.clone(), value);
            } else if !supplied && let Some(default) = &parameter.default {
                values.insert(parameter.name.clone(), default.clone());
            }
        }

        let supplied = names_at(parameters, keys_by_position.keys());
        let rejected = names_at(parameters, rejected_positions.iter());
        let inputs = RuleInputs {
            values: &values,
            supplied: &supplied,
            rejected: &rejected,
        };
        for rule in self.rules() {
            evaluate_rule(rule, &inputs, &mut violations);
        }

        if violations.is_empty() {
            Ok(ValidatedArgs {
                values,
                supplied,
                ignored_keys,
            })
        } else {
            Err(ValidationError {
                violations,
            })
        }
    }
}

/// Maps declaration positions to canonical names.
fn names_at<'a>(
    parameters: &[Parameter],
    positions: impl Iterator<Item = &'a usize>,
) -> BTreeSet<String> {
    positions.map(|position| parameters[*position].name.clone()).collect()
}

/// Coerces one supplied value and checks it against the choice set.
fn check_value(parameter: &Parameter, raw: &Value) -> Result<ArgValue, Violation> {
    let value = coerce_value(parameter.kind, raw).ok_or_else(|| Violation::InvalidType {
        parameter: parameter.name.clone(),
        expected: parameter.kind,
    })?;
    if let Some(allowed) = &parameter.allowed_values {
        let text = value.choice_text();
        if !allowed.contains(&text) {
            return Err(Violation::InvalidChoice {
                parameter: parameter.name.clone(),
                value: text,
                allowed: allowed.clone(),
            });
        }
    }
    Ok(value)
}

/// Converts a JSON value into the shape stored for `kind`.
#[must_use]
pub fn coerce_value(kind: ParameterKind, raw: &Value) -> Option<ArgValue> {
    match kind {
        ParameterKind::String => scalar_text(raw).map(ArgValue::Str),
        ParameterKind::Path => {
            scalar_text(raw).filter(|text| !text.trim().is_empty()).map(ArgValue::Str)
        }
        ParameterKind::Bool => coerce_bool(raw).map(ArgValue::Bool),
    }
}

/// Renders string and number scalars as text.
fn scalar_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Interprets booleans, `0`/`1`, and yes/no style words.
fn coerce_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_u64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(text) => {
            let lowered = text.trim().to_ascii_lowercase();
            if TRUE_WORDS.contains(&lowered.as_str()) {
                Some(true)
            } else if FALSE_WORDS.contains(&lowered.as_str()) {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
