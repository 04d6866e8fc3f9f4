use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{CategoryInfo, Perspective, category_info};
use crate::schema::{
    Field, FieldViolation, Fields, Kind, Record, Schema, deserialize_validated, serialize_aliased,
};

static SCHEMA: Schema = Schema {
    entity: "MediaSource",
    collection: Some("mediaSources"),
    fields: &[
        Field::required("id", Kind::TEXT).alias("_id"),
        Field::required("name", Kind::text(1, 50)),
        Field::required("perspective", Kind::Vocabulary(Perspective::VARIANTS)),
        Field::optional("description", Kind::text_up_to(500)),
        Field::optional("website_url", Kind::TEXT).alias("websiteUrl"),
        Field::optional("founded_year", Kind::integer(1800, 2026)).alias("foundedYear"),
        Field::optional("ownership_info", Kind::text_up_to(200)).alias("ownershipInfo"),
        Field::optional("created_at", Kind::Timestamp).alias("createdAt"),
        Field::optional("category_list", Kind::Objects(&category_info::SCHEMA)),
    ],
};

/// A publisher profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    id: String,
    name: String,
    perspective: Perspective,
    description: Option<String>,
    website_url: Option<String>,
    founded_year: Option<u16>,
    ownership_info: Option<String>,
    created_at: Option<DateTime<Utc>>,
    category_list: Option<Vec<CategoryInfo>>,
}

impl MediaSource {
    /// The source identifier (`_id` on the wire).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The outlet name, 1 to 50 characters.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared political leaning.
    #[must_use]
    pub const fn perspective(&self) -> Perspective {
        self.perspective
    }

    /// A description of the outlet, at most 500 characters.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The outlet's home page.
    #[must_use]
    pub fn website_url(&self) -> Option<&str> {
        self.website_url.as_deref()
    }

    /// The year the outlet was founded, 1800 to 2026.
    #[must_use]
    pub const fn founded_year(&self) -> Option<u16> {
        self.founded_year
    }

    /// Who owns the outlet, at most 200 characters.
    #[must_use]
    pub fn ownership_info(&self) -> Option<&str> {
        self.ownership_info.as_deref()
    }

    /// When the source was registered.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// The sections the outlet publishes under.
    #[must_use]
    pub fn category_list(&self) -> Option<&[CategoryInfo]> {
        self.category_list.as_deref()
    }
}

impl Record for MediaSource {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn from_fields(mut fields: Fields) -> Result<Self, FieldViolation> {
        Ok(Self {
            id: fields.required_text("id")?,
            name: fields.required_text("name")?,
            perspective: fields.required_vocabulary("perspective")?,
            description: fields.text("description")?,
            website_url: fields.text("website_url")?,
            founded_year: fields.integer("founded_year")?,
            ownership_info: fields.text("ownership_info")?,
            created_at: fields.timestamp("created_at")?,
            category_list: fields.objects("category_list")?,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("id", self.id.as_str())
            .with("name", self.name.as_str())
            .with("perspective", self.perspective.as_str())
            .with_opt("description", self.description.as_deref())
            .with_opt("website_url", self.website_url.as_deref())
            .with_opt("founded_year", self.founded_year)
            .with_opt("ownership_info", self.ownership_info.as_deref())
            .with_opt("created_at", self.created_at)
            .with_opt(
                "category_list",
                self.category_list
                    .as_ref()
                    .map(|list| list.iter().map(Record::to_fields).collect::<Vec<_>>()),
            )
    }
}

impl Serialize for MediaSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_aliased(self, serializer)
    }
}

impl<'de> Deserialize<'de> for MediaSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_validated(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};
    use test_case::test_case;

    use super::*;
    use crate::schema::{Keying, Violation};

    fn raw(value: Value) -> Map<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test_case(1800, true; "earliest year")]
    #[test_case(2026, true; "latest year")]
    #[test_case(1799, false; "before earliest")]
    #[test_case(2027, false; "after latest")]
    fn founded_year_bounds(year: i64, valid: bool) {
        let input = json!({"_id": "m1", "name": "Outlet", "perspective": "left", "foundedYear": year});
        assert_eq!(MediaSource::validate(&raw(input)).is_ok(), valid);
    }

    #[test]
    fn founded_year_reports_violated_bound() {
        let input = json!({"_id": "m1", "name": "Outlet", "perspective": "left", "foundedYear": 2027});
        let report = MediaSource::validate(&raw(input)).unwrap_err();
        assert_eq!(
            report.get("founded_year"),
            Some(&Violation::RangeConstraint {
                min: None,
                max: Some(2026),
                actual: 2027,
            })
        );
    }

    #[test]
    fn perspective_is_required() {
        let report =
            MediaSource::validate(&raw(json!({"_id": "m1", "name": "Outlet"}))).unwrap_err();
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.get("perspective"),
            Some(&Violation::MissingRequiredField)
        );
    }

    #[test]
    fn category_list_round_trips() {
        let input = json!({
            "_id": "m1",
            "name": "Daily Ledger",
            "perspective": "center_right",
            "websiteUrl": "https://ledger.example.com",
            "foundedYear": 1921,
            "ownershipInfo": "Ledger Holdings",
            "createdAt": "2023-06-01T00:00:00Z",
            "category_list": [
                {"name": "Economy", "url": "https://ledger.example.com/economy"},
                {"name": "World", "url": "https://ledger.example.com/world"},
            ],
        });

        let source = MediaSource::validate(&raw(input.clone())).unwrap();
        assert_eq!(source.perspective(), Perspective::CenterRight);
        assert_eq!(source.category_list().map(<[_]>::len), Some(2));
        assert_eq!(Value::Object(source.to_record(Keying::Alias)), input);

        let internal = source.to_record(Keying::Internal);
        assert_eq!(internal["category_list"][1]["name"], "World");
        assert_eq!(internal["founded_year"], 1921);
    }

    #[test]
    fn category_list_violations_are_indexed() {
        let input = json!({
            "_id": "m1",
            "name": "Outlet",
            "perspective": "right",
            "category_list": [
                {"name": "Economy", "url": "https://example.com/economy"},
                {"name": "", "url": "https://example.com/blank"},
            ],
        });

        let report = MediaSource::validate(&raw(input)).unwrap_err();
        assert!(matches!(
            report.get("category_list.1.name"),
            Some(Violation::LengthConstraint { min: Some(1), actual: 0, .. })
        ));
    }
}
