use std::{collections::BTreeMap, str::FromStr};

use chrono::{DateTime, Utc};

use super::{FieldViolation, Record, Violation};
use crate::domain::{Keyword, UnknownVariantError};

/// A checked field value.
///
/// Vocabulary fields are carried as their wire string.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A string.
    Text(String),
    /// A whole number.
    Integer(i128),
    /// A point in time.
    Timestamp(DateTime<Utc>),
    /// A list of keywords.
    Keywords(Vec<Keyword>),
    /// A list of floating point numbers.
    Numbers(Vec<f64>),
    /// A nested value object.
    Object(Fields),
    /// A list of nested value objects.
    Objects(Vec<Fields>),
}

impl FieldValue {
    const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Integer(_) => "integer",
            Self::Timestamp(_) => "timestamp",
            Self::Keywords(_) | Self::Numbers(_) | Self::Objects(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        Self::Integer(value.into())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Vec<Keyword>> for FieldValue {
    fn from(value: Vec<Keyword>) -> Self {
        Self::Keywords(value)
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(value: Vec<f64>) -> Self {
        Self::Numbers(value)
    }
}

impl From<Fields> for FieldValue {
    fn from(value: Fields) -> Self {
        Self::Object(value)
    }
}

impl From<Vec<Fields>> for FieldValue {
    fn from(value: Vec<Fields>) -> Self {
        Self::Objects(value)
    }
}

/// Checked field values keyed by internal field name.
///
/// This is the intermediate form between a raw record and a typed one. The
/// engine produces it from raw input; records build it from themselves for
/// serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(BTreeMap<&'static str, FieldValue>);

impl Fields {
    /// Creates an empty set of fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field value.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        self.0.insert(name, value.into());
        self
    }

    /// Adds a field value if one is present.
    #[must_use]
    pub fn with_opt<V: Into<FieldValue>>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    pub(crate) fn insert(&mut self, name: &'static str, value: FieldValue) {
        self.0.insert(name, value);
    }

    /// The value of a field, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// The number of present fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Takes an optional string field.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the field holds another kind of value.
    pub fn text(&mut self, name: &'static str) -> Result<Option<String>, FieldViolation> {
        self.take(name, "string", |value| match value {
            FieldValue::Text(s) => Ok(s),
            other => Err(other),
        })
    }

    /// Takes a required string field.
    ///
    /// # Errors
    ///
    /// Returns a violation if the field is absent or not a string.
    pub fn required_text(&mut self, name: &'static str) -> Result<String, FieldViolation> {
        present(name, self.text(name)?)
    }

    /// Takes an optional whole number field, converted to `T`.
    ///
    /// # Errors
    ///
    /// Returns a violation if the field is not a whole number or does not
    /// fit in `T`.
    pub fn integer<T: TryFrom<i128>>(
        &mut self,
        name: &'static str,
    ) -> Result<Option<T>, FieldViolation> {
        let Some(value) = self.take(name, "integer", |value| match value {
            FieldValue::Integer(i) => Ok(i),
            other => Err(other),
        })?
        else {
            return Ok(None);
        };

        T::try_from(value).map(Some).map_err(|_| {
            FieldViolation::new(
                name,
                Violation::RangeConstraint {
                    min: None,
                    max: None,
                    actual: value,
                },
            )
        })
    }

    /// Takes a required whole number field, converted to `T`.
    ///
    /// # Errors
    ///
    /// Returns a violation if the field is absent, not a whole number, or
    /// does not fit in `T`.
    pub fn required_integer<T: TryFrom<i128>>(
        &mut self,
        name: &'static str,
    ) -> Result<T, FieldViolation> {
        present(name, self.integer(name)?)
    }

    /// Takes an optional timestamp field.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the field holds another kind of value.
    pub fn timestamp(
        &mut self,
        name: &'static str,
    ) -> Result<Option<DateTime<Utc>>, FieldViolation> {
        self.take(name, "timestamp", |value| match value {
            FieldValue::Timestamp(dt) => Ok(dt),
            other => Err(other),
        })
    }

    /// Takes a required timestamp field.
    ///
    /// # Errors
    ///
    /// Returns a violation if the field is absent or not a timestamp.
    pub fn required_timestamp(
        &mut self,
        name: &'static str,
    ) -> Result<DateTime<Utc>, FieldViolation> {
        present(name, self.timestamp(name)?)
    }

    /// Takes an optional keyword list field.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the field holds another kind of value.
    pub fn keywords(&mut self, name: &'static str) -> Result<Option<Vec<Keyword>>, FieldViolation> {
        self.take(name, "array", |value| match value {
            FieldValue::Keywords(keywords) => Ok(keywords),
            other => Err(other),
        })
    }

    /// Takes an optional number list field.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the field holds another kind of value.
    pub fn numbers(&mut self, name: &'static str) -> Result<Option<Vec<f64>>, FieldViolation> {
        self.take(name, "array", |value| match value {
            FieldValue::Numbers(numbers) => Ok(numbers),
            other => Err(other),
        })
    }

    /// Takes an optional vocabulary field, parsed as `T`.
    ///
    /// # Errors
    ///
    /// Returns a violation if the field is not a string or not a member of
    /// `T`'s vocabulary.
    pub fn vocabulary<T>(&mut self, name: &'static str) -> Result<Option<T>, FieldViolation>
    where
        T: FromStr<Err = UnknownVariantError>,
    {
        self.text(name)?
            .map(|s| {
                s.parse::<T>().map_err(|e| {
                    FieldViolation::new(
                        name,
                        Violation::EnumMembership {
                            value: e.value().to_string(),
                            allowed: e.allowed(),
                        },
                    )
                })
            })
            .transpose()
    }

    /// Takes a required vocabulary field, parsed as `T`.
    ///
    /// # Errors
    ///
    /// Returns a violation if the field is absent, not a string, or not a
    /// member of `T`'s vocabulary.
    pub fn required_vocabulary<T>(&mut self, name: &'static str) -> Result<T, FieldViolation>
    where
        T: FromStr<Err = UnknownVariantError>,
    {
        present(name, self.vocabulary(name)?)
    }

    /// Takes an optional nested value object.
    ///
    /// # Errors
    ///
    /// Returns the nested record's violation, qualified by `name`.
    pub fn object<T: Record>(&mut self, name: &'static str) -> Result<Option<T>, FieldViolation> {
        self.take(name, "object", |value| match value {
            FieldValue::Object(fields) => Ok(fields),
            other => Err(other),
        })?
        .map(|fields| T::from_fields(fields).map_err(|e| e.nested_under(name)))
        .transpose()
    }

    /// Takes an optional list of nested value objects.
    ///
    /// # Errors
    ///
    /// Returns the first nested record's violation, qualified by `name` and
    /// the element index.
    pub fn objects<T: Record>(
        &mut self,
        name: &'static str,
    ) -> Result<Option<Vec<T>>, FieldViolation> {
        self.take(name, "array", |value| match value {
            FieldValue::Objects(items) => Ok(items),
            other => Err(other),
        })?
        .map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(index, fields)| {
                    T::from_fields(fields).map_err(|e| e.nested_under(&format!("{name}.{index}")))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
    }

    fn take<T>(
        &mut self,
        name: &'static str,
        expected: &'static str,
        extract: impl FnOnce(FieldValue) -> Result<T, FieldValue>,
    ) -> Result<Option<T>, FieldViolation> {
        self.0
            .remove(name)
            .map(|value| {
                extract(value).map_err(|other| {
                    FieldViolation::new(
                        name,
                        Violation::TypeMismatch {
                            expected,
                            actual: other.type_name(),
                        },
                    )
                })
            })
            .transpose()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }
}

fn present<T>(name: &'static str, value: Option<T>) -> Result<T, FieldViolation> {
    value.ok_or_else(|| FieldViolation::new(name, Violation::MissingRequiredField))
}
