//! The schema engine.
//!
//! Each record type declares an ordered table of [`Field`]s. One engine
//! checks raw records against any table, accumulating every violation into a
//! [`ValidationReport`], and converts checked records back into raw records
//! keyed by either convention.

mod engine;
pub use engine::{serialize_fields, validate_fields, validate_value};

mod export;
pub use export::collection_validator;

mod field;
pub use field::{Field, Keying, Kind, Schema};

mod fields;
pub use fields::{FieldValue, Fields};

mod record;
pub use record::Record;
pub(crate) use record::{deserialize_validated, serialize_aliased};

mod report;
pub use report::{FieldViolation, ValidationReport, Violation};

mod timestamp;

use serde_json::{Map, Value};

/// Validates a raw record as `R`.
///
/// # Errors
///
/// Returns a [`ValidationReport`] holding every violation found.
pub fn validate<R: Record>(raw: &Map<String, Value>) -> Result<R, ValidationReport> {
    R::validate(raw)
}

/// Serializes a record keyed by the given convention.
#[must_use]
pub fn serialize<R: Record>(record: &R, keying: Keying) -> Map<String, Value> {
    record.to_record(keying)
}
