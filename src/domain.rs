//! Domain records for the news aggregation platform.
//!
//! This module contains the validated record types: the constrained
//! [`Keyword`] string, the closed [`Category`] and [`Perspective`]
//! vocabularies, the [`CoverageSpectrum`] and [`CategoryInfo`] value objects,
//! and the root entities [`Issue`], [`Article`] and [`MediaSource`].

mod keyword;
pub use keyword::{InvalidKeywordError, Keyword};

mod vocabulary;
pub use vocabulary::{Category, Perspective, UnknownVariantError};

mod coverage_spectrum;
pub use coverage_spectrum::CoverageSpectrum;

mod category_info;
pub use category_info::CategoryInfo;

mod issue;
pub use issue::Issue;

mod article;
pub use article::Article;

mod media_source;
pub use media_source::MediaSource;
