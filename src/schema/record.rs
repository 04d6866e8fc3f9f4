use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{
    FieldViolation, Fields, Keying, Schema, ValidationReport,
    engine::{serialize_fields, validate_fields, validate_value},
};

/// A record type described by a [`Schema`].
///
/// Implementors describe how to build themselves from checked [`Fields`] and
/// how to break themselves back down. Validation and serialization are
/// provided by the shared engine.
pub trait Record: Sized {
    /// The field table for this record type.
    fn schema() -> &'static Schema;

    /// Builds the record from checked fields.
    ///
    /// # Errors
    ///
    /// Returns a violation if a field is missing or holds an unexpected kind
    /// of value.
    fn from_fields(fields: Fields) -> Result<Self, FieldViolation>;

    /// Breaks the record down into fields. Absent optional fields are
    /// omitted.
    fn to_fields(&self) -> Fields;

    /// Validates a raw record.
    ///
    /// Keys may be aliases, internal names, or a mix of both.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationReport`] holding every violation found.
    fn validate(raw: &Map<String, Value>) -> Result<Self, ValidationReport> {
        let schema = Self::schema();
        let fields = validate_fields(schema, raw)?;
        Self::from_fields(fields)
            .map_err(|violation| ValidationReport::single(schema.entity, violation))
    }

    /// Validates an arbitrary JSON value as a raw record.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationReport`] if the value is not an object or holds
    /// any violation.
    fn validate_value(raw: &Value) -> Result<Self, ValidationReport> {
        let schema = Self::schema();
        let fields = validate_value(schema, raw)?;
        Self::from_fields(fields)
            .map_err(|violation| ValidationReport::single(schema.entity, violation))
    }

    /// Converts the record to a raw record keyed by the given convention.
    ///
    /// Absent optional fields are omitted, never emitted as `null`.
    /// Timestamps are emitted as RFC 3339 in UTC, so a timestamp supplied
    /// with another offset (`2024-01-01T09:00:00+09:00`) comes back as the
    /// same instant in `Z` form (`2024-01-01T00:00:00Z`).
    fn to_record(&self, keying: Keying) -> Map<String, Value> {
        serialize_fields(Self::schema(), &self.to_fields(), keying)
    }

    /// Builds a new record from this one with the given fields replaced.
    ///
    /// The patch may use aliases or internal names. A `null` clears an
    /// optional field. The merged record is revalidated as a whole; this
    /// record is left untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationReport`] if the merged record is invalid.
    fn merged(&self, patch: &Map<String, Value>) -> Result<Self, ValidationReport> {
        let schema = Self::schema();
        let mut raw = self.to_record(Keying::Alias);
        for (key, value) in patch {
            if let Some(field) = schema.field_by_key(key) {
                raw.insert(field.alias.to_string(), value.clone());
            }
        }
        Self::validate(&raw)
    }
}

/// Serializes a record keyed by aliases.
pub(crate) fn serialize_aliased<R, S>(record: &R, serializer: S) -> Result<S::Ok, S::Error>
where
    R: Record,
    S: Serializer,
{
    record.to_record(Keying::Alias).serialize(serializer)
}

/// Deserializes and validates a record keyed by aliases or internal names.
pub(crate) fn deserialize_validated<'de, R, D>(deserializer: D) -> Result<R, D::Error>
where
    R: Record,
    D: Deserializer<'de>,
{
    let raw = Map::<String, Value>::deserialize(deserializer)?;
    R::validate(&raw).map_err(serde::de::Error::custom)
}
