//! Validated scalar values carried by a wish.

use super::WishDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trimmed, non-empty wish title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishTitle(String);

impl WishTitle {
    /// Creates a validated title of at most `max_chars` characters.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::EmptyTitle`] or
    /// [`WishDomainError::TitleTooLong`].
    pub fn new(value: impl Into<String>, max_chars: usize) -> Result<Self, WishDomainError> {
        let trimmed = bounded_text(value.into(), max_chars).map_err(|bound| match bound {
            TextBound::Empty => WishDomainError::EmptyTitle,
            TextBound::TooLong(actual) => WishDomainError::TitleTooLong {
                max: max_chars,
                actual,
            },
        })?;
        Ok(Self(trimmed))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WishTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty wish description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishDescription(String);

impl WishDescription {
    /// Creates a validated description of at most `max_chars` characters.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::EmptyDescription`] or
    /// [`WishDomainError::DescriptionTooLong`].
    pub fn new(value: impl Into<String>, max_chars: usize) -> Result<Self, WishDomainError> {
        let trimmed = bounded_text(value.into(), max_chars).map_err(|bound| match bound {
            TextBound::Empty => WishDomainError::EmptyDescription,
            TextBound::TooLong(actual) => WishDomainError::DescriptionTooLong {
                max: max_chars,
                actual,
            },
        })?;
        Ok(Self(trimmed))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordered list of trimmed, non-empty tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Validates tags against the per-tag length and the tag count limit.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::EmptyTag`], [`WishDomainError::TagTooLong`]
    /// or [`WishDomainError::TooManyTags`].
    pub fn new(
        values: impl IntoIterator<Item = String>,
        max_tag_chars: usize,
        max_tags: usize,
    ) -> Result<Self, WishDomainError> {
        let tags = values
            .into_iter()
            .map(|tag| {
                bounded_text(tag.clone(), max_tag_chars).map_err(|bound| match bound {
                    TextBound::Empty => WishDomainError::EmptyTag,
                    TextBound::TooLong(_) => WishDomainError::TagTooLong {
                        tag,
                        max: max_tag_chars,
                    },
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if tags.len() > max_tags {
            return Err(WishDomainError::TooManyTags {
                max: max_tags,
                actual: tags.len(),
            });
        }
        Ok(Self(tags))
    }

    /// Returns the tags in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Finite, non-negative budget offered for a wish.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budget(f64);

impl Budget {
    /// Creates a validated budget.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::InvalidBudget`] when the value is negative
    /// or not finite.
    pub fn new(value: f64) -> Result<Self, WishDomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(WishDomainError::InvalidBudget(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric amount.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

enum TextBound {
    Empty,
    TooLong(usize),
}

/// Trims `raw` and checks it is non-empty and at most `max_chars` long.
fn bounded_text(raw: String, max_chars: usize) -> Result<String, TextBound> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TextBound::Empty);
    }
    let char_count = trimmed.chars().count();
    if char_count > max_chars {
        return Err(TextBound::TooLong(char_count));
    }
    Ok(trimmed.to_owned())
}

/// Trims `raw` and checks it is at most `max_chars` long, allowing empty text.
pub(super) fn optional_bounded_text(raw: &str, max_chars: usize) -> Result<String, usize> {
    let trimmed = raw.trim();
    let char_count = trimmed.chars().count();
    if char_count > max_chars {
        return Err(char_count);
    }
    Ok(trimmed.to_owned())
}
