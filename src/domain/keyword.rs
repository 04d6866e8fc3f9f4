use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// A short descriptive tag attached to issues and articles.
///
/// Keywords are non-empty and at most [`Keyword::MAX_LEN`] characters long.
/// Length is measured in characters rather than bytes, so multi-byte text is
/// bounded the same way as ASCII.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Keyword(NonEmptyString);

impl Keyword {
    /// The minimum number of characters in a keyword.
    pub const MIN_LEN: usize = 1;

    /// The maximum number of characters in a keyword.
    pub const MAX_LEN: usize = 50;

    /// Creates a new `Keyword` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidKeywordError`] if the string is empty or longer than
    /// [`Keyword::MAX_LEN`] characters.
    pub fn new(s: String) -> Result<Self, InvalidKeywordError> {
        let actual = s.chars().count();
        if actual > Self::MAX_LEN {
            return Err(InvalidKeywordError::TooLong { actual });
        }

        NonEmptyString::new(s)
            .map(Self)
            .map_err(|_| InvalidKeywordError::Empty)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Keyword {
    type Error = InvalidKeywordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Keyword {
    type Error = InvalidKeywordError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for Keyword {
    type Err = InvalidKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for Keyword {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Keyword {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string is not a valid [`Keyword`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidKeywordError {
    /// The keyword was an empty string.
    #[error("keyword must not be empty")]
    Empty,

    /// The keyword exceeded the maximum length.
    #[error("keyword must be at most {} characters, got {actual}", Keyword::MAX_LEN)]
    TooLong {
        /// The number of characters in the rejected keyword.
        actual: usize,
    },
}

impl InvalidKeywordError {
    /// The character count of the rejected keyword.
    #[must_use]
    pub const fn actual(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::TooLong { actual } => *actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(1; "minimum length")]
    #[test_case(25; "typical length")]
    #[test_case(50; "maximum length")]
    fn accepts_lengths_within_bounds(len: usize) {
        let keyword = Keyword::new("k".repeat(len)).unwrap();
        assert_eq!(keyword.chars().count(), len);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Keyword::new(String::new()), Err(InvalidKeywordError::Empty));
    }

    #[test]
    fn rejects_one_past_maximum() {
        assert_eq!(
            Keyword::new("k".repeat(51)),
            Err(InvalidKeywordError::TooLong { actual: 51 })
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 50 Hangul syllables are 150 bytes in UTF-8
        let keyword = Keyword::new("정".repeat(50)).unwrap();
        assert_eq!(keyword.len(), 150);

        assert!(Keyword::new("정".repeat(51)).is_err());
    }

    #[test]
    fn display_matches_input() {
        let keyword = Keyword::try_from("election").unwrap();
        assert_eq!(keyword.to_string(), "election");
        assert_eq!(keyword.as_str(), "election");
    }

    #[test]
    fn error_display() {
        let error = InvalidKeywordError::TooLong { actual: 60 };
        assert_eq!(
            error.to_string(),
            "keyword must be at most 50 characters, got 60"
        );
    }
}
