use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Category, CoverageSpectrum, Keyword, coverage_spectrum};
use crate::schema::{
    Field, FieldViolation, Fields, Kind, Record, Schema, deserialize_validated, serialize_aliased,
};

static SCHEMA: Schema = Schema {
    entity: "Issue",
    collection: Some("issues"),
    fields: &[
        Field::required("id", Kind::TEXT).alias("_id"),
        Field::required("title", Kind::text(1, 200)),
        Field::optional("category", Kind::Vocabulary(Category::VARIANTS)),
        Field::required("summary", Kind::text(1, 500)),
        Field::optional("image_url", Kind::TEXT).alias("imageUrl"),
        Field::optional("keywords", Kind::Keywords),
        Field::required("created_at", Kind::Timestamp).alias("createdAt"),
        Field::optional("updated_at", Kind::Timestamp).alias("updatedAt"),
        // perspective detail
        Field::optional("left_summary", Kind::text_up_to(500)).alias("leftSummary"),
        Field::optional("center_summary", Kind::text_up_to(500)).alias("centerSummary"),
        Field::optional("right_summary", Kind::text_up_to(500)).alias("rightSummary"),
        Field::optional("bias_comparison", Kind::text_up_to(500)).alias("biasComparison"),
        // statistics
        Field::optional("view", Kind::non_negative()),
        Field::optional("coverage_spectrum", Kind::Object(&coverage_spectrum::SCHEMA))
            .alias("coverageSpectrum"),
        Field::optional("left_keywords", Kind::Keywords).alias("leftKeywords"),
        Field::optional("center_keywords", Kind::Keywords).alias("centerKeywords"),
        Field::optional("right_keywords", Kind::Keywords).alias("rightKeywords"),
    ],
};

/// A synthesized news story aggregating articles across perspectives.
///
/// An issue can only be obtained by validating a raw record (see
/// [`Record::validate`]), so every instance satisfies its field constraints.
/// To change an issue, build a new one with [`Record::merged`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    id: String,
    title: String,
    category: Option<Category>,
    summary: String,
    image_url: Option<String>,
    keywords: Option<Vec<Keyword>>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    left_summary: Option<String>,
    center_summary: Option<String>,
    right_summary: Option<String>,
    bias_comparison: Option<String>,
    view: Option<u64>,
    coverage_spectrum: Option<CoverageSpectrum>,
    left_keywords: Option<Vec<Keyword>>,
    center_keywords: Option<Vec<Keyword>>,
    right_keywords: Option<Vec<Keyword>>,
}

impl Issue {
    /// The issue identifier (`_id` on the wire).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The headline, 1 to 200 characters.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The topical category, if assigned.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        self.category
    }

    /// The synthesized summary, 1 to 500 characters.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// A representative image.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Descriptive keywords.
    #[must_use]
    pub fn keywords(&self) -> Option<&[Keyword]> {
        self.keywords.as_deref()
    }

    /// When the issue was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the issue was last updated.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// How left leaning sources cover the issue.
    #[must_use]
    pub fn left_summary(&self) -> Option<&str> {
        self.left_summary.as_deref()
    }

    /// How centrist sources cover the issue.
    #[must_use]
    pub fn center_summary(&self) -> Option<&str> {
        self.center_summary.as_deref()
    }

    /// How right leaning sources cover the issue.
    #[must_use]
    pub fn right_summary(&self) -> Option<&str> {
        self.right_summary.as_deref()
    }

    /// A comparison of the perspectives' framing.
    #[must_use]
    pub fn bias_comparison(&self) -> Option<&str> {
        self.bias_comparison.as_deref()
    }

    /// The view count.
    #[must_use]
    pub const fn view(&self) -> Option<u64> {
        self.view
    }

    /// Coverage counts across the political spectrum.
    #[must_use]
    pub const fn coverage_spectrum(&self) -> Option<&CoverageSpectrum> {
        self.coverage_spectrum.as_ref()
    }

    /// Keywords drawn from left leaning coverage.
    #[must_use]
    pub fn left_keywords(&self) -> Option<&[Keyword]> {
        self.left_keywords.as_deref()
    }

    /// Keywords drawn from centrist coverage.
    #[must_use]
    pub fn center_keywords(&self) -> Option<&[Keyword]> {
        self.center_keywords.as_deref()
    }

    /// Keywords drawn from right leaning coverage.
    #[must_use]
    pub fn right_keywords(&self) -> Option<&[Keyword]> {
        self.right_keywords.as_deref()
    }
}

impl Record for Issue {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn from_fields(mut fields: Fields) -> Result<Self, FieldViolation> {
        Ok(Self {
            id: fields.required_text("id")?,
            title: fields.required_text("title")?,
            category: fields.vocabulary("category")?,
            summary: fields.required_text("summary")?,
            image_url: fields.text("image_url")?,
            keywords: fields.keywords("keywords")?,
            created_at: fields.required_timestamp("created_at")?,
            updated_at: fields.timestamp("updated_at")?,
            left_summary: fields.text("left_summary")?,
            center_summary: fields.text("center_summary")?,
            right_summary: fields.text("right_summary")?,
            bias_comparison: fields.text("bias_comparison")?,
            view: fields.integer("view")?,
            coverage_spectrum: fields.object("coverage_spectrum")?,
            left_keywords: fields.keywords("left_keywords")?,
            center_keywords: fields.keywords("center_keywords")?,
            right_keywords: fields.keywords("right_keywords")?,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("id", self.id.as_str())
            .with("title", self.title.as_str())
            .with_opt("category", self.category.map(Category::as_str))
            .with("summary", self.summary.as_str())
            .with_opt("image_url", self.image_url.as_deref())
            .with_opt("keywords", self.keywords.clone())
            .with("created_at", self.created_at)
            .with_opt("updated_at", self.updated_at)
            .with_opt("left_summary", self.left_summary.as_deref())
            .with_opt("center_summary", self.center_summary.as_deref())
            .with_opt("right_summary", self.right_summary.as_deref())
            .with_opt("bias_comparison", self.bias_comparison.as_deref())
            .with_opt("view", self.view)
            .with_opt(
                "coverage_spectrum",
                self.coverage_spectrum.as_ref().map(Record::to_fields),
            )
            .with_opt("left_keywords", self.left_keywords.clone())
            .with_opt("center_keywords", self.center_keywords.clone())
            .with_opt("right_keywords", self.right_keywords.clone())
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_aliased(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Issue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_validated(deserializer)
    }
}
