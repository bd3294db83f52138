//! Error types for wish domain validation and parsing.

use super::{MediaId, WishId, WishStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating wish domain values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WishDomainError {
    /// The title is empty after trimming.
    #[error("wish title must not be empty")]
    EmptyTitle,

    /// The title exceeds the configured length.
    #[error("wish title exceeds {max} characters (got {actual})")]
    TitleTooLong {
        /// Configured maximum.
        max: usize,
        /// Observed length.
        actual: usize,
    },

    /// The description is empty after trimming.
    #[error("wish description must not be empty")]
    EmptyDescription,

    /// The description exceeds the configured length.
    #[error("wish description exceeds {max} characters (got {actual})")]
    DescriptionTooLong {
        /// Configured maximum.
        max: usize,
        /// Observed length.
        actual: usize,
    },

    /// The category value is not one of the supported categories.
    #[error(transparent)]
    InvalidCategory(#[from] ParseWishCategoryError),

    /// The status value is not a known lifecycle status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseWishStatusError),

    /// Wishes can only be created as drafts or already published.
    #[error("wishes cannot be created with status {0}")]
    InvalidInitialStatus(WishStatus),

    /// The budget is negative or not a finite number.
    #[error("budget must be a finite, non-negative number (got {0})")]
    InvalidBudget(f64),

    /// Longitude or latitude is outside its valid range.
    #[error("invalid coordinates: longitude {longitude}, latitude {latitude}")]
    InvalidCoordinates {
        /// Supplied longitude.
        longitude: f64,
        /// Supplied latitude.
        latitude: f64,
    },

    /// The location text is not a `longitude,latitude` pair.
    #[error("invalid location '{0}', expected 'longitude,latitude'")]
    InvalidLocation(String),

    /// The location address is empty after trimming.
    #[error("location address must not be empty")]
    EmptyAddress,

    /// The search radius is negative or not finite.
    #[error("search radius must be a finite, non-negative number of kilometres (got {0})")]
    InvalidRadius(f64),

    /// A nearby search was requested without both a location and a radius.
    #[error("nearby search requires both a location and a radius")]
    MissingProximity,

    /// A tag is empty after trimming.
    #[error("tags must not be empty")]
    EmptyTag,

    /// A tag exceeds the configured length.
    #[error("tag '{tag}' exceeds {max} characters")]
    TagTooLong {
        /// Offending tag.
        tag: String,
        /// Configured maximum.
        max: usize,
    },

    /// The wish carries more tags than allowed.
    #[error("a wish may carry at most {max} tags (got {actual})")]
    TooManyTags {
        /// Configured maximum.
        max: usize,
        /// Observed count.
        actual: usize,
    },

    /// The media kind is not image, video, or audio.
    #[error("unsupported media kind: {0}")]
    InvalidMediaKind(String),

    /// A media reference has an empty URL.
    #[error("media URL must not be empty")]
    EmptyMediaUrl,

    /// No media item with the given identifier is attached.
    #[error("media {0} is not attached to this wish")]
    UnknownMedia(MediaId),

    /// The rating is outside the 1 to 5 range.
    #[error("rating must be between 1 and 5 (got {0})")]
    InvalidRating(i32),

    /// The review comment exceeds the configured length.
    #[error("review comment exceeds {max} characters (got {actual})")]
    CommentTooLong {
        /// Configured maximum.
        max: usize,
        /// Observed length.
        actual: usize,
    },

    /// The deadline lies in the past while future deadlines are required.
    #[error("deadline {0} is not in the future")]
    DeadlineInPast(DateTime<Utc>),

    /// An extended deadline must be later than the current deadline.
    #[error("new deadline {requested} must be later than the current deadline {current}")]
    DeadlineNotExtended {
        /// Deadline currently stored.
        current: DateTime<Utc>,
        /// Deadline requested by the caller.
        requested: DateTime<Utc>,
    },

    /// Page numbers start at one.
    #[error("page must be at least 1 (got {0})")]
    InvalidPage(u32),

    /// Page sizes start at one.
    #[error("limit must be at least 1 (got {0})")]
    InvalidLimit(u32),

    /// The actor identifier is not a valid UUID.
    #[error("invalid actor identifier: {0}")]
    InvalidActorId(String),

    /// The creator tried to become the helper of their own wish.
    #[error("the creator cannot be the helper of their own wish")]
    HelperIsCreator(WishId),

    /// The creator tried to apply as a helper for their own wish.
    #[error("Cannot apply for your own wish")]
    OwnWishApplication(WishId),

    /// The requested status change is not an edge of the lifecycle graph.
    #[error("invalid wish lifecycle transition for {wish_id}: {from} -> {to}")]
    InvalidTransition {
        /// Wish identifier.
        wish_id: WishId,
        /// Current status.
        from: WishStatus,
        /// Requested status.
        to: WishStatus,
    },

    /// The wish is completed or cancelled and no longer accepts edits.
    #[error("wish {wish_id} is {status} and can no longer be changed")]
    WishClosed {
        /// Wish identifier.
        wish_id: WishId,
        /// Terminal status.
        status: WishStatus,
    },
}

impl WishDomainError {
    /// Returns whether the error stems from the wish's lifecycle state rather
    /// than from the supplied values.
    #[must_use]
    pub const fn is_state_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransition { .. } | Self::WishClosed { .. }
        )
    }
}

/// Error returned while parsing wish statuses from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown wish status: {0}")]
pub struct ParseWishStatusError(pub String);

/// Error returned while parsing wish categories from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown wish category: {0}")]
pub struct ParseWishCategoryError(pub String);

