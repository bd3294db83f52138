//! Reviews appended to completed wishes.

use super::{ActorId, WishDomainError, values::optional_bounded_text};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Creates a validated rating.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::InvalidRating`] outside `1..=5`.
    pub fn new(value: i32) -> Result<Self, WishDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|stars| (Self::MIN..=Self::MAX).contains(stars))
            .map(Self)
            .ok_or(WishDomainError::InvalidRating(value))
    }

    /// Returns the number of stars.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// An immutable review entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    rating: Rating,
    comment: String,
    reviewer: ActorId,
    created_at: DateTime<Utc>,
}

impl Review {
    /// Creates a review stamped with the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::CommentTooLong`] when the trimmed comment
    /// exceeds `max_comment_chars`.
    pub fn new(
        reviewer: ActorId,
        rating: Rating,
        comment: &str,
        max_comment_chars: usize,
        clock: &impl Clock,
    ) -> Result<Self, WishDomainError> {
        let trimmed = optional_bounded_text(comment, max_comment_chars).map_err(|actual| {
            WishDomainError::CommentTooLong {
                max: max_comment_chars,
                actual,
            }
        })?;
        Ok(Self {
            rating,
            comment: trimmed,
            reviewer,
            created_at: clock.utc(),
        })
    }

    /// Returns the rating.
    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    /// Returns the comment, possibly empty.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns who wrote the review.
    #[must_use]
    pub const fn reviewer(&self) -> ActorId {
        self.reviewer
    }

    /// Returns when the review was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
