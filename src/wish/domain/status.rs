//! Wish lifecycle status and the transition graph.

use super::ParseWishStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a wish.
///
/// ```text
/// draft ──▶ pending ──▶ in_progress ──▶ completed
///   │          │             │
///   └──────────┴─────────────┴──▶ cancelled
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WishStatus {
    /// Wish is being prepared by its creator and is not open to helpers.
    #[default]
    Draft,
    /// Wish is published and waiting for a helper.
    Pending,
    /// A helper has been accepted and is working on the wish.
    InProgress,
    /// The creator confirmed the wish as fulfilled.
    Completed,
    /// The creator withdrew the wish.
    Cancelled,
}

impl WishStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether transition to `target` is an edge of the lifecycle
    /// graph.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Pending)
                | (Self::Pending, Self::InProgress)
                | (Self::InProgress, Self::Completed)
                | (
                    Self::Draft | Self::Pending | Self::InProgress,
                    Self::Cancelled
                )
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns whether a wish in this status must have an accepted helper.
    #[must_use]
    pub const fn requires_helper(self) -> bool {
        matches!(self, Self::InProgress | Self::Completed)
    }

    /// Returns whether a wish may be created directly in this status.
    #[must_use]
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Draft | Self::Pending)
    }
}

impl fmt::Display for WishStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WishStatus {
    type Error = ParseWishStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseWishStatusError(value.to_owned())),
        }
    }
}
