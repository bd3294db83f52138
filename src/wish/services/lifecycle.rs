//! Lifecycle orchestration for wishes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{debug, info, warn};

use super::{
    error::{WishAction, WishServiceError, WishServiceResult},
    requests::{CreateWishRequest, MediaInput, UpdateWishRequest},
};
use crate::wish::{
    config::WishConfig,
    domain::{
        ActorId, HelperApplication, MediaId, NewWishParams, Wish, WishDomainError, WishId,
        WishStatus,
    },
    ports::{CompletionHook, HelperApplicationRepository, WishRepository, WriteCondition},
};

/// Wish lifecycle orchestration service.
///
/// Every mutating operation reads the wish, checks the actor and payload,
/// applies the change to the aggregate, and persists it with one
/// conditional write guarded on the status and revision that were read.
/// A write that loses a race surfaces as
/// [`WishServiceError::InvalidState`]; nothing is retried.
#[derive(Clone)]
pub struct WishLifecycleService<R, A, C>
where
    R: WishRepository,
    A: HelperApplicationRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    applications: Arc<A>,
    clock: Arc<C>,
    config: WishConfig,
    completion_hook: Option<Arc<dyn CompletionHook>>,
}

impl<R, A, C> WishLifecycleService<R, A, C>
where
    R: WishRepository,
    A: HelperApplicationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default configuration and no completion
    /// hook.
    #[must_use]
    pub fn new(repository: Arc<R>, applications: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            repository,
            applications,
            clock,
            config: WishConfig::default(),
            completion_hook: None,
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: WishConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers the hook run after each successful completion.
    #[must_use]
    pub fn with_completion_hook(mut self, hook: Arc<dyn CompletionHook>) -> Self {
        self.completion_hook = Some(hook);
        self
    }

    /// Creates a wish owned by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::BadRequest`] when a field fails
    /// validation or the requested initial status is neither draft nor
    /// pending, and [`WishServiceError::Repository`] when storage fails.
    pub async fn create(
        &self,
        actor: ActorId,
        request: CreateWishRequest,
    ) -> WishServiceResult<Wish> {
        let validated = request.validate(&self.config.limits)?;
        let initial_status = validated
            .status
            .as_deref()
            .map_or(Ok(WishStatus::Draft), WishStatus::try_from)
            .map_err(WishDomainError::from)?;
        self.ensure_deadline_allowed(validated.deadline)?;

        let params = NewWishParams {
            title: validated.title,
            description: validated.description,
            category: validated.category,
            creator: actor,
            initial_status,
            budget: validated.budget,
            location: validated.location,
            deadline: validated.deadline,
            is_public: validated.is_public,
            tags: validated.tags,
            media: validated.media,
        };
        let wish = Wish::create(params, &*self.clock)?;
        self.repository
            .store(&wish)
            .await
            .map_err(|err| WishServiceError::repository_failure(err, WishAction::Create))?;

        info!(
            wish_id = %wish.id(),
            actor = %actor,
            status = %wish.status(),
            "wish created"
        );
        Ok(wish)
    }

    /// Retrieves a wish by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::NotFound`] when the wish does not exist.
    pub async fn get(&self, wish_id: WishId) -> WishServiceResult<Wish> {
        let found = self
            .repository
            .find_by_id(wish_id)
            .await
            .map_err(|err| WishServiceError::repository_failure(err, WishAction::Read))?;
        debug!(wish_id = %wish_id, found = found.is_some(), "wish lookup");
        found.ok_or(WishServiceError::NotFound(wish_id))
    }

    /// Applies creator edits to the non-lifecycle fields.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::ProtectedFields`] when the payload sets
    /// `status`, `creator` or `helper`, and [`WishServiceError::BadRequest`]
    /// when a supplied field fails validation. Nothing is written in either
    /// case.
    pub async fn update_metadata(
        &self,
        wish_id: WishId,
        actor: ActorId,
        request: UpdateWishRequest,
    ) -> WishServiceResult<Wish> {
        let mut wish = self.load_owned(wish_id, actor, WishAction::Update).await?;

        let protected = request.protected_fields();
        if !protected.is_empty() {
            return Err(WishServiceError::ProtectedFields(protected));
        }
        let changes = request.validate(&self.config.limits)?;
        if let Some(deadline) = changes.deadline {
            self.ensure_deadline_allowed(deadline)?;
        }

        let expected = WriteCondition::observed(&wish);
        wish.apply_metadata(changes, &*self.clock);
        self.persist(expected, &wish, WishAction::Update).await?;
        info!(
            wish_id = %wish_id,
            actor = %actor,
            revision = wish.revision(),
            "wish metadata updated"
        );
        Ok(wish)
    }

    /// Permanently removes a wish along with its helper applications.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::InvalidState`] when the wish changed
    /// between the read and the delete.
    pub async fn delete(&self, wish_id: WishId, actor: ActorId) -> WishServiceResult<()> {
        let wish = self.load_owned(wish_id, actor, WishAction::Delete).await?;
        self.repository
            .delete(WriteCondition::observed(&wish))
            .await
            .map_err(|err| WishServiceError::repository_failure(err, WishAction::Delete))?;
        match self.applications.forget_wish(wish_id).await {
            Ok(dropped) => info!(
                wish_id = %wish_id,
                actor = %actor,
                applications = dropped,
                "wish deleted"
            ),
            Err(err) => warn!(
                wish_id = %wish_id,
                error = %err,
                "wish deleted but its applications could not be dropped"
            ),
        }
        Ok(())
    }

    /// Moves a draft to pending so helpers can apply.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::InvalidState`] unless the wish is a draft.
    pub async fn publish(&self, wish_id: WishId, actor: ActorId) -> WishServiceResult<Wish> {
        self.transition(wish_id, actor, WishAction::Publish, |wish, clock| {
            wish.publish(clock)
        })
        .await
    }

    /// Accepts `helper` for a pending wish and moves it to in progress.
    ///
    /// Of several concurrent calls on the same pending wish exactly one
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::BadRequest`] when `helper` is the creator
    /// and [`WishServiceError::InvalidState`] unless the wish is pending.
    pub async fn accept_helper(
        &self,
        wish_id: WishId,
        actor: ActorId,
        helper: ActorId,
    ) -> WishServiceResult<Wish> {
        self.transition(wish_id, actor, WishAction::AcceptHelper, move |wish, clock| {
            wish.accept_helper(helper, clock)
        })
        .await
    }

    /// Marks an in-progress wish completed, then runs the completion hook.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::InvalidState`] unless the wish is in
    /// progress.
    pub async fn complete(&self, wish_id: WishId, actor: ActorId) -> WishServiceResult<Wish> {
        let wish = self
            .transition(wish_id, actor, WishAction::Complete, |wish, clock| {
                wish.complete(clock)
            })
            .await?;
        if let Some(hook) = &self.completion_hook {
            hook.on_completed(&wish);
        }
        Ok(wish)
    }

    /// Withdraws a wish that is not yet completed or cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::InvalidState`] for terminal wishes.
    pub async fn cancel(&self, wish_id: WishId, actor: ActorId) -> WishServiceResult<Wish> {
        self.transition(wish_id, actor, WishAction::Cancel, |wish, clock| {
            wish.cancel(clock)
        })
        .await
    }

    /// Moves the deadline later.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::BadRequest`] when `deadline` is not after
    /// the current deadline (or is in the past under the strict policy) and
    /// [`WishServiceError::InvalidState`] for terminal wishes.
    pub async fn extend_deadline(
        &self,
        wish_id: WishId,
        actor: ActorId,
        deadline: DateTime<Utc>,
    ) -> WishServiceResult<Wish> {
        let require_future = self.config.policy.require_future_deadline;
        self.transition(wish_id, actor, WishAction::ExtendDeadline, move |wish, clock| {
            if require_future && deadline <= clock.utc() {
                return Err(WishDomainError::DeadlineInPast(deadline));
            }
            wish.extend_deadline(deadline, clock)
        })
        .await
    }

    /// Attaches a media reference.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::BadRequest`] for an unknown media kind or
    /// blank URL and [`WishServiceError::InvalidState`] for terminal wishes.
    pub async fn attach_media(
        &self,
        wish_id: WishId,
        actor: ActorId,
        media: MediaInput,
    ) -> WishServiceResult<Wish> {
        self.transition(wish_id, actor, WishAction::AttachMedia, move |wish, clock| {
            let item = media.validate()?;
            wish.attach_media(item, clock)
        })
        .await
    }

    /// Removes the media reference with `media_id`.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::BadRequest`] when no media matches and
    /// [`WishServiceError::InvalidState`] for terminal wishes.
    pub async fn detach_media(
        &self,
        wish_id: WishId,
        actor: ActorId,
        media_id: MediaId,
    ) -> WishServiceResult<Wish> {
        self.transition(wish_id, actor, WishAction::DetachMedia, move |wish, clock| {
            wish.detach_media(media_id, clock).map(|_| ())
        })
        .await
    }

    /// Records `actor`'s interest in helping with a pending wish.
    ///
    /// The wish itself is not modified. Repeated applications by the same
    /// actor keep the first record.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::BadRequest`] when `actor` created the wish
    /// and [`WishServiceError::InvalidState`] unless it is pending.
    pub async fn apply(
        &self,
        wish_id: WishId,
        actor: ActorId,
    ) -> WishServiceResult<HelperApplication> {
        let wish = self.get(wish_id).await?;
        if wish.is_created_by(actor) {
            return Err(WishDomainError::OwnWishApplication(wish_id).into());
        }
        if wish.status() != WishStatus::Pending {
            return Err(WishServiceError::InvalidState {
                wish_id,
                status: wish.status(),
                action: WishAction::Apply,
            });
        }

        let application = HelperApplication::new(wish_id, actor, &*self.clock);
        let recorded = self.applications.record(&application).await?;
        info!(
            wish_id = %wish_id,
            actor = %actor,
            first = recorded,
            "helper application recorded"
        );
        Ok(application)
    }

    /// Lists recorded applications for the creator.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::Forbidden`] for anyone but the creator.
    pub async fn list_applications(
        &self,
        wish_id: WishId,
        actor: ActorId,
    ) -> WishServiceResult<Vec<HelperApplication>> {
        self.load_owned(wish_id, actor, WishAction::ListApplications)
            .await?;
        Ok(self.applications.list_for_wish(wish_id).await?)
    }

    async fn load_owned(
        &self,
        wish_id: WishId,
        actor: ActorId,
        action: WishAction,
    ) -> WishServiceResult<Wish> {
        let wish = self.get(wish_id).await?;
        if !wish.is_created_by(actor) {
            return Err(WishServiceError::Forbidden { actor, action });
        }
        Ok(wish)
    }

    async fn transition<F>(
        &self,
        wish_id: WishId,
        actor: ActorId,
        action: WishAction,
        change: F,
    ) -> WishServiceResult<Wish>
    where
        F: FnOnce(&mut Wish, &C) -> Result<(), WishDomainError> + Send,
    {
        let mut wish = self.load_owned(wish_id, actor, action).await?;
        let expected = WriteCondition::observed(&wish);

        change(&mut wish, &*self.clock)
            .map_err(|err| WishServiceError::domain_failure(err, action))?;
        self.persist(expected, &wish, action).await?;

        info!(
            wish_id = %wish_id,
            actor = %actor,
            action = %action,
            from = %expected.status,
            to = %wish.status(),
            "wish transition applied"
        );
        Ok(wish)
    }

    async fn persist(
        &self,
        expected: WriteCondition,
        wish: &Wish,
        action: WishAction,
    ) -> WishServiceResult<()> {
        self.repository
            .compare_and_swap(expected, wish)
            .await
            .map_err(|err| WishServiceError::repository_failure(err, action))
    }

    fn ensure_deadline_allowed(&self, deadline: DateTime<Utc>) -> Result<(), WishDomainError> {
        if self.config.policy.require_future_deadline && deadline <= self.clock.utc() {
            return Err(WishDomainError::DeadlineInPast(deadline));
        }
        Ok(())
    }
}
