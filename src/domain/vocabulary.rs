//! Closed vocabularies used by issues, articles and media sources.
//!
//! Each vocabulary has exactly one lowercase wire string per case. Parsing is
//! exact and case-sensitive.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The topical category of an issue or article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Domestic politics.
    Politics,
    /// Economy and business.
    Economy,
    /// Society and public affairs.
    Society,
    /// Culture and the arts.
    Culture,
    /// International affairs.
    International,
    /// Environment and climate.
    Environment,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Politics,
        Self::Economy,
        Self::Society,
        Self::Culture,
        Self::International,
        Self::Environment,
    ];

    /// The wire strings of every category, in declaration order.
    pub const VARIANTS: &'static [&'static str] = &[
        "politics",
        "economy",
        "society",
        "culture",
        "international",
        "environment",
    ];

    /// The canonical wire string for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Politics => "politics",
            Self::Economy => "economy",
            Self::Society => "society",
            Self::Culture => "culture",
            Self::International => "international",
            Self::Environment => "environment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownVariantError::new(s, Self::VARIANTS))
    }
}

/// The declared political leaning of a media source.
///
/// The cases run left to right, but no ordering is implied by the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    /// Left.
    Left,
    /// Centre-left.
    CenterLeft,
    /// Centre.
    Center,
    /// Centre-right.
    CenterRight,
    /// Right.
    Right,
}

impl Perspective {
    /// Every perspective, from left to right.
    pub const ALL: [Self; 5] = [
        Self::Left,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::Right,
    ];

    /// The wire strings of every perspective, from left to right.
    pub const VARIANTS: &'static [&'static str] =
        &["left", "center_left", "center", "center_right", "right"];

    /// The canonical wire string for this perspective.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::CenterLeft => "center_left",
            Self::Center => "center",
            Self::CenterRight => "center_right",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Perspective {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|perspective| perspective.as_str() == s)
            .ok_or_else(|| UnknownVariantError::new(s, Self::VARIANTS))
    }
}

/// Error returned when a string is not a member of a closed vocabulary.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("'{value}' is not one of: {}", .allowed.join(", "))]
pub struct UnknownVariantError {
    value: String,
    allowed: &'static [&'static str],
}

impl UnknownVariantError {
    fn new(value: &str, allowed: &'static [&'static str]) -> Self {
        Self {
            value: value.to_string(),
            allowed,
        }
    }

    /// The rejected value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The wire strings that would have been accepted.
    #[must_use]
    pub const fn allowed(&self) -> &'static [&'static str] {
        self.allowed
    }
}
