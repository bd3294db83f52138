//! Wish categories.

use super::ParseWishCategoryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category a wish is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WishCategory {
    /// Charitable causes.
    Charity,
    /// Everyday life errands.
    Life,
    /// Skill sharing.
    Skill,
    /// Emotional support.
    Emotion,
    /// Tutoring and learning.
    Education,
    /// Health and care.
    Health,
    /// Travel companionship and guidance.
    Travel,
    /// Anything else.
    Other,
}

impl WishCategory {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Charity => "charity",
            Self::Life => "life",
            Self::Skill => "skill",
            Self::Emotion => "emotion",
            Self::Education => "education",
            Self::Health => "health",
            Self::Travel => "travel",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for WishCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WishCategory {
    type Error = ParseWishCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "charity" => Ok(Self::Charity),
            "life" => Ok(Self::Life),
            "skill" => Ok(Self::Skill),
            "emotion" => Ok(Self::Emotion),
            "education" => Ok(Self::Education),
            "health" => Ok(Self::Health),
            "travel" => Ok(Self::Travel),
            "other" => Ok(Self::Other),
            _ => Err(ParseWishCategoryError(value.to_owned())),
        }
    }
}
