//! Service-level error taxonomy for wish operations.

use std::fmt;

use thiserror::Error;
use tracing::warn;

use crate::wish::{
    domain::{ActorId, WishDomainError, WishId, WishStatus},
    ports::{ApplicationLedgerError, WishRepositoryError},
};

/// Operations exposed by the wish services, named in errors and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WishAction {
    /// Create a wish.
    Create,
    /// Read a wish or a listing.
    Read,
    /// Edit creator-controlled fields.
    Update,
    /// Remove a wish.
    Delete,
    /// Move a draft to pending.
    Publish,
    /// Accept a helper.
    AcceptHelper,
    /// Mark the wish fulfilled.
    Complete,
    /// Withdraw the wish.
    Cancel,
    /// Move the deadline later.
    ExtendDeadline,
    /// Attach a media reference.
    AttachMedia,
    /// Remove a media reference.
    DetachMedia,
    /// Apply as a helper.
    Apply,
    /// List helper applications.
    ListApplications,
    /// Append a review.
    Review,
}

impl WishAction {
    /// Returns a short verb phrase for messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Publish => "publish",
            Self::AcceptHelper => "accept a helper for",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::ExtendDeadline => "extend the deadline of",
            Self::AttachMedia => "attach media to",
            Self::DetachMedia => "remove media from",
            Self::Apply => "apply for",
            Self::ListApplications => "list applications for",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for WishAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Coarse classification used by the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WishErrorKind {
    /// The referenced wish does not exist.
    NotFound,
    /// The actor lacks rights for the operation.
    Forbidden,
    /// The operation is not valid in the wish's current status.
    InvalidState,
    /// The payload is malformed or carries disallowed fields.
    BadRequest,
    /// Storage or other infrastructure failure.
    Internal,
}

/// Errors returned by the wish services.
#[derive(Debug, Error)]
pub enum WishServiceError {
    /// The wish does not exist.
    #[error("Wish not found")]
    NotFound(WishId),

    /// The actor may not perform the operation.
    #[error("Not authorized to {action} this wish")]
    Forbidden {
        /// Acting identity.
        actor: ActorId,
        /// Attempted operation.
        action: WishAction,
    },

    /// The wish's status does not permit the operation.
    #[error("Cannot {action} a wish while it is {status}")]
    InvalidState {
        /// Wish identifier.
        wish_id: WishId,
        /// Status observed when the operation was rejected.
        status: WishStatus,
        /// Attempted operation.
        action: WishAction,
    },

    /// A payload value failed validation.
    #[error(transparent)]
    BadRequest(#[from] WishDomainError),

    /// The update payload named fields that only lifecycle operations set.
    #[error("cannot update protected fields: {}", .0.join(", "))]
    ProtectedFields(Vec<&'static str>),

    /// The wish store failed.
    #[error(transparent)]
    Repository(WishRepositoryError),

    /// The application ledger failed.
    #[error(transparent)]
    Ledger(#[from] ApplicationLedgerError),
}

impl WishServiceError {
    /// Classifies the error for the transport boundary.
    #[must_use]
    pub const fn kind(&self) -> WishErrorKind {
        match self {
            Self::NotFound(_) | Self::Repository(WishRepositoryError::NotFound(_)) => {
                WishErrorKind::NotFound
            }
            Self::Forbidden { .. } => WishErrorKind::Forbidden,
            Self::InvalidState { .. } => WishErrorKind::InvalidState,
            Self::BadRequest(_) | Self::ProtectedFields(_) => WishErrorKind::BadRequest,
            Self::Repository(_) | Self::Ledger(_) => WishErrorKind::Internal,
        }
    }

    /// Maps a domain rejection, treating state violations as
    /// [`WishServiceError::InvalidState`] and everything else as a bad
    /// request.
    #[must_use]
    pub fn domain_failure(err: WishDomainError, action: WishAction) -> Self {
        match err {
            WishDomainError::InvalidTransition { wish_id, from, .. } => Self::InvalidState {
                wish_id,
                status: from,
                action,
            },
            WishDomainError::WishClosed { wish_id, status } => Self::InvalidState {
                wish_id,
                status,
                action,
            },
            other => Self::BadRequest(other),
        }
    }

    /// Maps a store failure. A lost conditional write becomes
    /// [`WishServiceError::InvalidState`] carrying the status that won.
    #[must_use]
    pub fn repository_failure(err: WishRepositoryError, action: WishAction) -> Self {
        match err {
            WishRepositoryError::NotFound(wish_id) => Self::NotFound(wish_id),
            WishRepositoryError::StatusConflict {
                wish_id,
                expected,
                actual,
            } => {
                warn!(
                    wish_id = %wish_id,
                    action = %action,
                    expected = %expected,
                    actual = %actual,
                    "conditional write lost to a concurrent update"
                );
                Self::InvalidState {
                    wish_id,
                    status: actual,
                    action,
                }
            }
            other => Self::Repository(other),
        }
    }
}

/// Result type for wish service operations.
pub type WishServiceResult<T> = Result<T, WishServiceError>;
