//! Helper applications recorded alongside, not inside, the wish aggregate.

use super::{ActorId, WishId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A helper's expression of interest in a pending wish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelperApplication {
    wish_id: WishId,
    applicant: ActorId,
    applied_at: DateTime<Utc>,
}

impl HelperApplication {
    /// Creates an application stamped with the current clock time.
    #[must_use]
    pub fn new(wish_id: WishId, applicant: ActorId, clock: &impl Clock) -> Self {
        Self {
            wish_id,
            applicant,
            applied_at: clock.utc(),
        }
    }

    /// Reconstructs an application from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        wish_id: WishId,
        applicant: ActorId,
        applied_at: DateTime<Utc>,
    ) -> Self {
        Self {
            wish_id,
            applicant,
            applied_at,
        }
    }

    /// Returns the wish applied for.
    #[must_use]
    pub const fn wish_id(&self) -> WishId {
        self.wish_id
    }

    /// Returns the applying actor.
    #[must_use]
    pub const fn applicant(&self) -> ActorId {
        self.applicant
    }

    /// Returns when the application was first recorded.
    #[must_use]
    pub const fn applied_at(&self) -> DateTime<Utc> {
        self.applied_at
    }
}
