use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::schema::{
    Field, FieldViolation, Fields, Kind, Record, Schema, deserialize_validated, serialize_aliased,
};

pub(super) static SCHEMA: Schema = Schema {
    entity: "CategoryInfo",
    collection: None,
    fields: &[
        Field::required("name", Kind::text(1, 50)),
        Field::required("url", Kind::text_up_to(500)),
    ],
};

/// A section a media source publishes under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryInfo {
    name: String,
    url: String,
}

impl CategoryInfo {
    /// The section name, 1 to 50 characters.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The section's landing page, at most 500 characters.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Record for CategoryInfo {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn from_fields(mut fields: Fields) -> Result<Self, FieldViolation> {
        Ok(Self {
            name: fields.required_text("name")?,
            url: fields.required_text("url")?,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("name", self.name.as_str())
            .with("url", self.url.as_str())
    }
}

impl Serialize for CategoryInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_aliased(self, serializer)
    }
}

impl<'de> Deserialize<'de> for CategoryInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_validated(deserializer)
    }
}
