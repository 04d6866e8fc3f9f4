use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Category, Keyword};
use crate::schema::{
    Field, FieldViolation, Fields, Kind, Record, Schema, deserialize_validated, serialize_aliased,
};

static SCHEMA: Schema = Schema {
    entity: "Article",
    collection: Some("articles"),
    fields: &[
        Field::required("id", Kind::TEXT).alias("_id"),
        Field::optional("preview", Kind::text(1, 1000)),
        Field::required("title", Kind::text(1, 300)),
        Field::optional("keywords", Kind::Keywords),
        Field::required("content", Kind::TEXT),
        Field::required("url", Kind::TEXT),
        Field::optional("reporter", Kind::text(1, 50)),
        Field::optional("published_at", Kind::TEXT).alias("publishedAt"),
        Field::optional("issue_id", Kind::TEXT).alias("issueId"),
        Field::optional("category", Kind::Vocabulary(Category::VARIANTS)),
        Field::optional("image_url", Kind::TEXT).alias("imageUrl"),
        Field::optional("source_id", Kind::TEXT).alias("sourceId"),
        Field::optional("embedding", Kind::Numbers),
    ],
};

/// A single sourced news item.
///
/// An article optionally belongs to one [`Issue`](super::Issue) (via
/// `issue_id`) and one [`MediaSource`](super::MediaSource) (via `source_id`).
/// These references are not resolved here.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    id: String,
    preview: Option<String>,
    title: String,
    keywords: Option<Vec<Keyword>>,
    content: String,
    url: String,
    reporter: Option<String>,
    published_at: Option<String>,
    issue_id: Option<String>,
    category: Option<Category>,
    image_url: Option<String>,
    source_id: Option<String>,
    embedding: Option<Vec<f64>>,
}

impl Article {
    /// The article identifier (`_id` on the wire).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// A teaser, 1 to 1000 characters.
    #[must_use]
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// The headline, 1 to 300 characters.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Descriptive keywords.
    #[must_use]
    pub fn keywords(&self) -> Option<&[Keyword]> {
        self.keywords.as_deref()
    }

    /// The body text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Where the article was published.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The byline, 1 to 50 characters.
    #[must_use]
    pub fn reporter(&self) -> Option<&str> {
        self.reporter.as_deref()
    }

    /// The publication time as supplied by the source.
    ///
    /// This is free-form text; no timestamp format is imposed.
    #[must_use]
    pub fn published_at(&self) -> Option<&str> {
        self.published_at.as_deref()
    }

    /// The issue this article was clustered into.
    #[must_use]
    pub fn issue_id(&self) -> Option<&str> {
        self.issue_id.as_deref()
    }

    /// The topical category.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        self.category
    }

    /// A representative image.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// The media source that published the article.
    #[must_use]
    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }

    /// The article's embedding vector.
    #[must_use]
    pub fn embedding(&self) -> Option<&[f64]> {
        self.embedding.as_deref()
    }
}

impl Record for Article {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn from_fields(mut fields: Fields) -> Result<Self, FieldViolation> {
        Ok(Self {
            id: fields.required_text("id")?,
            preview: fields.text("preview")?,
            title: fields.required_text("title")?,
            keywords: fields.keywords("keywords")?,
            content: fields.required_text("content")?,
            url: fields.required_text("url")?,
            reporter: fields.text("reporter")?,
            published_at: fields.text("published_at")?,
            issue_id: fields.text("issue_id")?,
            category: fields.vocabulary("category")?,
            image_url: fields.text("image_url")?,
            source_id: fields.text("source_id")?,
            embedding: fields.numbers("embedding")?,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("id", self.id.as_str())
            .with_opt("preview", self.preview.as_deref())
            .with("title", self.title.as_str())
            .with_opt("keywords", self.keywords.clone())
            .with("content", self.content.as_str())
            .with("url", self.url.as_str())
            .with_opt("reporter", self.reporter.as_deref())
            .with_opt("published_at", self.published_at.as_deref())
            .with_opt("issue_id", self.issue_id.as_deref())
            .with_opt("category", self.category.map(Category::as_str))
            .with_opt("image_url", self.image_url.as_deref())
            .with_opt("source_id", self.source_id.as_deref())
            .with_opt("embedding", self.embedding.clone())
    }
}

impl Serialize for Article {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_aliased(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Article {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_validated(deserializer)
    }
}
