use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::schema::{
    Field, FieldViolation, Fields, Kind, Record, Schema, deserialize_validated, serialize_aliased,
};

pub(super) static SCHEMA: Schema = Schema {
    entity: "CoverageSpectrum",
    collection: None,
    fields: &[
        Field::required("left", Kind::non_negative()),
        Field::required("center", Kind::non_negative()),
        Field::required("right", Kind::non_negative()),
        Field::required("total", Kind::non_negative()),
    ],
};

/// Counts of left, centre and right leaning coverage of an issue.
///
/// `total` is an independent counter. It is not required to equal
/// `left + center + right`; see [`CoverageSpectrum::is_consistent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoverageSpectrum {
    left: u64,
    center: u64,
    right: u64,
    total: u64,
}

impl CoverageSpectrum {
    /// Creates a coverage spectrum from its four counts.
    #[must_use]
    pub const fn new(left: u64, center: u64, right: u64, total: u64) -> Self {
        Self {
            left,
            center,
            right,
            total,
        }
    }

    /// Left leaning coverage.
    #[must_use]
    pub const fn left(&self) -> u64 {
        self.left
    }

    /// Centrist coverage.
    #[must_use]
    pub const fn center(&self) -> u64 {
        self.center
    }

    /// Right leaning coverage.
    #[must_use]
    pub const fn right(&self) -> u64 {
        self.right
    }

    /// Total coverage, as recorded.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Whether `total` equals `left + center + right`.
    ///
    /// This is never enforced during validation.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        u128::from(self.left) + u128::from(self.center) + u128::from(self.right)
            == u128::from(self.total)
    }
}

impl Record for CoverageSpectrum {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn from_fields(mut fields: Fields) -> Result<Self, FieldViolation> {
        Ok(Self {
            left: fields.required_integer("left")?,
            center: fields.required_integer("center")?,
            right: fields.required_integer("right")?,
            total: fields.required_integer("total")?,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("left", self.left)
            .with("center", self.center)
            .with("right", self.right)
            .with("total", self.total)
    }
}

impl Serialize for CoverageSpectrum {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_aliased(self, serializer)
    }
}

impl<'de> Deserialize<'de> for CoverageSpectrum {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_validated(deserializer)
    }
}
