//! Validated news records
//!
//! Records for a multi-perspective news aggregation platform: issues,
//! articles and media sources. Raw records arrive as JSON objects from the
//! document store or an API boundary; this crate validates them into
//! immutable typed records, reporting every violation at once, and
//! serializes them back keyed by either the wire aliases or the internal
//! field names.

/// Validated record types.
pub mod domain;
pub use domain::{
    Article, Category, CategoryInfo, CoverageSpectrum, Issue, Keyword, MediaSource, Perspective,
};

/// The shared validation and serialization engine.
pub mod schema;
pub use schema::{FieldViolation, Keying, Record, ValidationReport, Violation, serialize, validate};

/// Command line configuration.
pub mod config;
pub use config::Config;
