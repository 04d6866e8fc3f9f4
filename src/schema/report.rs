use std::fmt;

use nonempty::NonEmpty;
use serde::{Serialize, ser::SerializeStruct};

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// A required field was absent.
    #[error("missing required field")]
    MissingRequiredField,

    /// A string was shorter or longer than allowed.
    ///
    /// Only the bound that was crossed is populated.
    #[error("length {actual} is {}", bounds(.min.as_ref(), .max.as_ref()))]
    LengthConstraint {
        /// The violated minimum length.
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        /// The violated maximum length.
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
        /// The actual length in characters.
        actual: usize,
    },

    /// A number was outside the allowed range.
    ///
    /// Only the bound that was crossed is populated.
    #[error("value {actual} is {}", bounds(.min.as_ref(), .max.as_ref()))]
    RangeConstraint {
        /// The violated minimum.
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        /// The violated maximum.
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
        /// The actual value.
        actual: i128,
    },

    /// A string was not a member of the field's vocabulary.
    #[error("'{value}' is not one of: {}", .allowed.join(", "))]
    EnumMembership {
        /// The rejected value.
        value: String,
        /// The accepted values.
        allowed: &'static [&'static str],
    },

    /// A value had the wrong type.
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: &'static str,
        /// The JSON type actually supplied.
        actual: &'static str,
    },
}

fn bounds<T: fmt::Display>(min: Option<&T>, max: Option<&T>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("outside {min}..={max}"),
        (Some(min), None) => format!("below the minimum of {min}"),
        (None, Some(max)) => format!("above the maximum of {max}"),
        (None, None) => "out of bounds".to_string(),
    }
}

/// A violation addressed by its dotted field path.
///
/// Paths use internal field names. Nested value object fields are qualified
/// by their parent (`coverage_spectrum.left`) and list elements by their
/// index (`keywords.3`, `category_list.0.name`). The empty path refers to the
/// record as a whole.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[error("{}: {violation}", display_path(.path))]
pub struct FieldViolation {
    /// The dotted path of the offending field.
    pub path: String,
    /// What went wrong.
    #[serde(flatten)]
    pub violation: Violation,
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "(record)" } else { path }
}

impl FieldViolation {
    /// Creates a violation at the given path.
    #[must_use]
    pub fn new(path: impl Into<String>, violation: Violation) -> Self {
        Self {
            path: path.into(),
            violation,
        }
    }

    /// Qualifies the path with a parent path segment.
    #[must_use]
    pub fn nested_under(self, parent: &str) -> Self {
        let path = if self.path.is_empty() {
            parent.to_string()
        } else {
            format!("{parent}.{}", self.path)
        };
        Self { path, ..self }
    }
}

/// The complete set of violations found while validating one record.
///
/// A report is never empty: a record with no violations validates
/// successfully and produces no report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {entity}: {}", render(.violations))]
pub struct ValidationReport {
    entity: &'static str,
    violations: NonEmpty<FieldViolation>,
}

fn render(violations: &NonEmpty<FieldViolation>) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationReport {
    /// Builds a report from accumulated violations.
    ///
    /// Returns `None` if there are no violations.
    #[must_use]
    pub fn from_violations(entity: &'static str, violations: Vec<FieldViolation>) -> Option<Self> {
        NonEmpty::from_vec(violations).map(|violations| Self {
            entity,
            violations,
        })
    }

    /// Builds a report holding a single violation.
    #[must_use]
    pub fn single(entity: &'static str, violation: FieldViolation) -> Self {
        Self {
            entity,
            violations: NonEmpty::new(violation),
        }
    }

    /// The record type that failed validation.
    #[must_use]
    pub const fn entity(&self) -> &'static str {
        self.entity
    }

    /// The violation recorded at the given dotted path, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Violation> {
        self.violations
            .iter()
            .find(|v| v.path == path)
            .map(|v| &v.violation)
    }

    /// Iterates over all violations in field declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.violations.iter()
    }

    /// The number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Always `false`; a report holds at least one violation.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Serialize for ValidationReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let violations: Vec<&FieldViolation> = self.violations.iter().collect();
        let mut state = serializer.serialize_struct("ValidationReport", 2)?;
        state.serialize_field("entity", self.entity)?;
        state.serialize_field("violations", &violations)?;
        state.end()
    }
}
