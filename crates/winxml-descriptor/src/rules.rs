// crates/winxml-descriptor/src/rules.rs
// ============================================================================
// Module: Cross-Field Rules
// Description: Constraints spanning more than one parameter.
// Purpose: Express conditional requirements as data evaluated after the generic pass.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Per-parameter declarations cannot say "`attribute` is required when
//! `type` is `attribute`". Such constraints are declared as
//! [`CrossFieldRule`] values on the descriptor and evaluated by
//! [`crate::Descriptor::validate`] once every per-parameter check has run.
//! A rule whose trigger parameter already failed its own checks is skipped,
//! so one bad input never produces two unrelated violations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::descriptor::ArgValue;
use crate::validate::Violation;

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Constraint spanning multiple parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CrossFieldRule {
    /// Parameters in `requires` must be supplied when `parameter` resolves to `equals`.
    RequiredIf {
        /// Trigger parameter (canonical name).
        parameter: String,
        /// Trigger value.
        equals: ArgValue,
        /// Parameters that become required (canonical names).
        requires: Vec<String>,
    },
}

impl CrossFieldRule {
    /// Declares a `required_if` rule.
    #[must_use]
    pub fn required_if<I, S>(parameter: impl Into<String>, equals: ArgValue, requires: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RequiredIf {
            parameter: parameter.into(),
            equals,
            requires: requires.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns every parameter name the rule references.
    pub fn referenced_parameters(&self) -> impl Iterator<Item = &str> {
        match self {
            Self::RequiredIf {
                parameter,
                requires,
                ..
            } => std::iter::once(parameter.as_str()).chain(requires.iter().map(String::as_str)),
        }
    }

    /// Returns a short rendering of the triggering condition.
    #[must_use]
    pub fn condition(&self) -> String {
        match self {
            Self::RequiredIf {
                parameter,
                equals,
                ..
            } => format!("{parameter} == {equals}"),
        }
    }
}

impl fmt::Display for CrossFieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequiredIf {
                requires,
                ..
            } => write!(f, "{} requires {}", self.condition(), requires.join(", ")),
        }
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Resolved state handed to rule evaluation.
pub(crate) struct RuleInputs<'a> {
    /// Resolved values (supplied or defaulted) by canonical name.
    pub values: &'a BTreeMap<String, ArgValue>,
    /// Canonical names the caller supplied with a non-null value.
    pub supplied: &'a BTreeSet<String>,
    /// Canonical names that already failed per-parameter checks.
    pub rejected: &'a BTreeSet<String>,
}

/// Evaluates one rule, appending violations.
pub(crate) fn evaluate_rule(
    rule: &CrossFieldRule,
    inputs: &RuleInputs<'_>,
    out: &mut Vec<Violation>,
) {
    match rule {
        CrossFieldRule::RequiredIf {
            parameter,
            equals,
            requires,
        } => {
            if inputs.rejected.contains(parameter) {
                return;
            }
            if inputs.values.get(parameter) != Some(equals) {
                return;
            }
            for required in requires {
                if inputs.supplied.contains(required) || inputs.rejected.contains(required) {
                    continue;
                }
                out.push(Violation::CrossFieldConstraintViolation {
                    parameter: required.clone(),
                    condition: rule.condition(),
                });
            }
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
