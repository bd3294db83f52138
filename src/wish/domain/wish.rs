//! Wish aggregate root and its lifecycle operations.

use super::{
    ActorId, Budget, Location, MediaId, MediaItem, Review, Tags, WishCategory, WishDescription,
    WishDomainError, WishId, WishStatus, WishTitle,
};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated values for a wish that is about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWishParams {
    /// Title shown in listings.
    pub title: WishTitle,
    /// Longer explanation of what is needed.
    pub description: WishDescription,
    /// Category the wish is filed under.
    pub category: WishCategory,
    /// Actor posting the wish.
    pub creator: ActorId,
    /// Draft or pending.
    pub initial_status: WishStatus,
    /// Offered budget.
    pub budget: Budget,
    /// Where the wish takes place.
    pub location: Location,
    /// When the wish should be fulfilled.
    pub deadline: DateTime<Utc>,
    /// Whether the wish is publicly listed.
    pub is_public: bool,
    /// Free-form labels.
    pub tags: Tags,
    /// Media references.
    pub media: Vec<MediaItem>,
}

/// Optional replacements for the creator-editable fields of a wish.
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataChanges {
    /// Replacement title.
    pub title: Option<WishTitle>,
    /// Replacement description.
    pub description: Option<WishDescription>,
    /// Replacement category.
    pub category: Option<WishCategory>,
    /// Replacement budget.
    pub budget: Option<Budget>,
    /// Replacement location.
    pub location: Option<Location>,
    /// Replacement deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Replacement visibility.
    pub is_public: Option<bool>,
    /// Replacement tag list.
    pub tags: Option<Tags>,
}

/// Wish aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wish {
    id: WishId,
    title: WishTitle,
    description: WishDescription,
    category: WishCategory,
    creator: ActorId,
    helper: Option<ActorId>,
    status: WishStatus,
    budget: Budget,
    location: Location,
    deadline: DateTime<Utc>,
    is_public: bool,
    tags: Tags,
    media: Vec<MediaItem>,
    reviews: Vec<Review>,
    revision: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted wish aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedWishData {
    /// Persisted wish identifier.
    pub id: WishId,
    /// Persisted title.
    pub title: WishTitle,
    /// Persisted description.
    pub description: WishDescription,
    /// Persisted category.
    pub category: WishCategory,
    /// Persisted creator.
    pub creator: ActorId,
    /// Persisted helper, if any.
    pub helper: Option<ActorId>,
    /// Persisted lifecycle status.
    pub status: WishStatus,
    /// Persisted budget.
    pub budget: Budget,
    /// Persisted location.
    pub location: Location,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted visibility flag.
    pub is_public: bool,
    /// Persisted tags.
    pub tags: Tags,
    /// Persisted media references.
    pub media: Vec<MediaItem>,
    /// Persisted reviews, oldest first.
    pub reviews: Vec<Review>,
    /// Persisted write revision.
    pub revision: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Wish {
    /// Creates a new wish owned by `params.creator`.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::InvalidInitialStatus`] unless the initial
    /// status is draft or pending.
    pub fn create(params: NewWishParams, clock: &impl Clock) -> Result<Self, WishDomainError> {
        if !params.initial_status.is_initial() {
            return Err(WishDomainError::InvalidInitialStatus(params.initial_status));
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: WishId::new(),
            title: params.title,
            description: params.description,
            category: params.category,
            creator: params.creator,
            helper: None,
            status: params.initial_status,
            budget: params.budget,
            location: params.location,
            deadline: params.deadline,
            is_public: params.is_public,
            tags: params.tags,
            media: params.media,
            reviews: Vec::new(),
            revision: 0,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a wish from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWishData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            category: data.category,
            creator: data.creator,
            helper: data.helper,
            status: data.status,
            budget: data.budget,
            location: data.location,
            deadline: data.deadline,
            is_public: data.is_public,
            tags: data.tags,
            media: data.media,
            reviews: data.reviews,
            revision: data.revision,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the wish identifier.
    #[must_use]
    pub const fn id(&self) -> WishId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &WishTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &WishDescription {
        &self.description
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> WishCategory {
        self.category
    }

    /// Returns the creator.
    #[must_use]
    pub const fn creator(&self) -> ActorId {
        self.creator
    }

    /// Returns the accepted helper, if any.
    #[must_use]
    pub const fn helper(&self) -> Option<ActorId> {
        self.helper
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> WishStatus {
        self.status
    }

    /// Returns the budget.
    #[must_use]
    pub const fn budget(&self) -> Budget {
        self.budget
    }

    /// Returns the location.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns whether the wish is publicly listed.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.is_public
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Returns the attached media references.
    #[must_use]
    pub fn media(&self) -> &[MediaItem] {
        &self.media
    }

    /// Returns the reviews, oldest first.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Returns the write revision used for optimistic concurrency.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether `actor` created this wish.
    #[must_use]
    pub fn is_created_by(&self, actor: ActorId) -> bool {
        self.creator == actor
    }

    /// Returns whether `actor` is the creator or the accepted helper.
    #[must_use]
    pub fn is_participant(&self, actor: ActorId) -> bool {
        self.is_created_by(actor) || self.helper == Some(actor)
    }

    /// Returns the time left until the deadline; negative once it has
    /// passed.
    #[must_use]
    pub fn time_remaining(&self, clock: &impl Clock) -> Duration {
        self.deadline.signed_duration_since(clock.utc())
    }

    /// Publishes a draft so helpers can apply.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::InvalidTransition`] unless the wish is a
    /// draft.
    pub fn publish(&mut self, clock: &impl Clock) -> Result<(), WishDomainError> {
        self.transition_to(WishStatus::Pending, clock)
    }

    /// Accepts `helper` and starts work on a pending wish.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::HelperIsCreator`] when `helper` created the
    /// wish, or [`WishDomainError::InvalidTransition`] unless the wish is
    /// pending.
    pub fn accept_helper(
        &mut self,
        helper: ActorId,
        clock: &impl Clock,
    ) -> Result<(), WishDomainError> {
        if self.is_created_by(helper) {
            return Err(WishDomainError::HelperIsCreator(self.id));
        }
        self.ensure_transition(WishStatus::InProgress)?;
        self.helper = Some(helper);
        self.status = WishStatus::InProgress;
        self.touch(clock);
        Ok(())
    }

    /// Marks an in-progress wish as fulfilled.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::InvalidTransition`] unless the wish is in
    /// progress.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), WishDomainError> {
        self.transition_to(WishStatus::Completed, clock)
    }

    /// Withdraws a wish that has not reached a terminal status. An accepted
    /// helper stays recorded.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::InvalidTransition`] when the wish is
    /// already completed or cancelled.
    pub fn cancel(&mut self, clock: &impl Clock) -> Result<(), WishDomainError> {
        self.transition_to(WishStatus::Cancelled, clock)
    }

    /// Applies creator edits to the non-lifecycle fields.
    pub fn apply_metadata(&mut self, changes: MetadataChanges, clock: &impl Clock) {
        let MetadataChanges {
            title,
            description,
            category,
            budget,
            location,
            deadline,
            is_public,
            tags,
        } = changes;

        replace_if_some(&mut self.title, title);
        replace_if_some(&mut self.description, description);
        replace_if_some(&mut self.category, category);
        replace_if_some(&mut self.budget, budget);
        replace_if_some(&mut self.location, location);
        replace_if_some(&mut self.deadline, deadline);
        replace_if_some(&mut self.is_public, is_public);
        replace_if_some(&mut self.tags, tags);
        self.touch(clock);
    }

    /// Moves the deadline later.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::WishClosed`] for completed or cancelled
    /// wishes and [`WishDomainError::DeadlineNotExtended`] when `deadline`
    /// is not after the current deadline.
    pub fn extend_deadline(
        &mut self,
        deadline: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Result<(), WishDomainError> {
        self.ensure_open()?;
        if deadline <= self.deadline {
            return Err(WishDomainError::DeadlineNotExtended {
                current: self.deadline,
                requested: deadline,
            });
        }
        self.deadline = deadline;
        self.touch(clock);
        Ok(())
    }

    /// Attaches a media reference.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::WishClosed`] for completed or cancelled
    /// wishes.
    pub fn attach_media(
        &mut self,
        item: MediaItem,
        clock: &impl Clock,
    ) -> Result<(), WishDomainError> {
        self.ensure_open()?;
        self.media.push(item);
        self.touch(clock);
        Ok(())
    }

    /// Removes the media reference with `media_id`.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::WishClosed`] for completed or cancelled
    /// wishes and [`WishDomainError::UnknownMedia`] when nothing matches.
    pub fn detach_media(
        &mut self,
        media_id: MediaId,
        clock: &impl Clock,
    ) -> Result<MediaItem, WishDomainError> {
        self.ensure_open()?;
        let position = self
            .media
            .iter()
            .position(|item| item.id() == media_id)
            .ok_or(WishDomainError::UnknownMedia(media_id))?;
        let removed = self.media.remove(position);
        self.touch(clock);
        Ok(removed)
    }

    /// Appends a review without touching the write revision. Only stores
    /// call this, after checking the wish is completed under their own
    /// atomicity guarantees.
    pub(crate) fn push_review(&mut self, review: Review) {
        self.updated_at = review.created_at();
        self.reviews.push(review);
    }

    /// Replaces every creator-controlled field with those of `replacement`
    /// while keeping the stored reviews.
    pub(crate) fn replace_keeping_reviews(&mut self, replacement: &Self) {
        let reviews = std::mem::take(&mut self.reviews);
        *self = replacement.clone();
        self.reviews = reviews;
    }

    fn ensure_transition(&self, target: WishStatus) -> Result<(), WishDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(WishDomainError::InvalidTransition {
                wish_id: self.id,
                from: self.status,
                to: target,
            });
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), WishDomainError> {
        if self.status.is_terminal() {
            return Err(WishDomainError::WishClosed {
                wish_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    fn transition_to(
        &mut self,
        target: WishStatus,
        clock: &impl Clock,
    ) -> Result<(), WishDomainError> {
        self.ensure_transition(target)?;
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Records a guarded write: bumps the revision and the update timestamp.
    fn touch(&mut self, clock: &impl Clock) {
        self.revision = self.revision.saturating_add(1);
        self.updated_at = clock.utc();
    }
}

fn replace_if_some<T>(field: &mut T, value: Option<T>) {
    if let Some(new_value) = value {
        *field = new_value;
    }
}
