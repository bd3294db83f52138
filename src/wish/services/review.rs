//! Append-only review journal for completed wishes.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use super::{
    error::{WishAction, WishServiceError, WishServiceResult},
    requests::ReviewRequest,
};
use crate::wish::{
    config::WishConfig,
    domain::{ActorId, Rating, Review, Wish, WishId, WishStatus},
    ports::WishRepository,
};

/// Appends reviews to completed wishes.
///
/// Reviews are never deduplicated, edited or removed. The append is a single
/// store operation guarded on the wish still being completed, so concurrent
/// reviews are all kept.
#[derive(Clone)]
pub struct ReviewJournal<R, C>
where
    R: WishRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: WishConfig,
}

impl<R, C> ReviewJournal<R, C>
where
    R: WishRepository,
    C: Clock + Send + Sync,
{
    /// Creates a journal with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            config: WishConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: WishConfig) -> Self {
        self.config = config;
        self
    }

    /// Appends a review by `reviewer` and returns the updated wish.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::NotFound`] for unknown wishes,
    /// [`WishServiceError::Forbidden`] when participant-only reviews are
    /// enabled and `reviewer` took no part, [`WishServiceError::BadRequest`]
    /// for an out-of-range rating or an overlong comment, and
    /// [`WishServiceError::InvalidState`] unless the wish is completed.
    pub async fn append(
        &self,
        wish_id: WishId,
        reviewer: ActorId,
        request: ReviewRequest,
    ) -> WishServiceResult<Wish> {
        let wish = self
            .repository
            .find_by_id(wish_id)
            .await
            .map_err(|err| WishServiceError::repository_failure(err, WishAction::Review))?
            .ok_or(WishServiceError::NotFound(wish_id))?;

        if self.config.policy.restrict_reviews_to_participants && !wish.is_participant(reviewer) {
            return Err(WishServiceError::Forbidden {
                actor: reviewer,
                action: WishAction::Review,
            });
        }

        let rating = Rating::new(request.rating)?;
        let review = Review::new(
            reviewer,
            rating,
            request.comment.as_deref().unwrap_or_default(),
            self.config.limits.max_comment_chars,
            &*self.clock,
        )?;

        if wish.status() != WishStatus::Completed {
            return Err(WishServiceError::InvalidState {
                wish_id,
                status: wish.status(),
                action: WishAction::Review,
            });
        }

        let reviewed = self
            .repository
            .append_review(wish_id, &review)
            .await
            .map_err(|err| WishServiceError::repository_failure(err, WishAction::Review))?;
        info!(
            wish_id = %wish_id,
            reviewer = %reviewer,
            rating = rating.value(),
            reviews = reviewed.reviews().len(),
            "review appended"
        );
        Ok(reviewed)
    }
}
