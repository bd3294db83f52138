//! Repository port for wish persistence, conditional writes, and search.

use crate::wish::domain::{Review, Wish, WishId, WishPage, WishQuery, WishStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for wish repository operations.
pub type WishRepositoryResult<T> = Result<T, WishRepositoryError>;

/// State a stored wish must still be in for a conditional write to apply.
///
/// Services capture the condition when they read a wish and hand it back
/// with the write, so two writers racing on the same observation cannot
/// both succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteCondition {
    /// Wish being written.
    pub wish_id: WishId,
    /// Status observed at read time.
    pub status: WishStatus,
    /// Revision observed at read time.
    pub revision: u64,
}

impl WriteCondition {
    /// Captures the condition from a freshly read wish.
    #[must_use]
    pub const fn observed(wish: &Wish) -> Self {
        Self {
            wish_id: wish.id(),
            status: wish.status(),
            revision: wish.revision(),
        }
    }
}

/// Wish persistence contract.
///
/// Stores provide the atomicity; the lifecycle rules live in the services
/// and the domain.
#[async_trait]
pub trait WishRepository: Send + Sync {
    /// Stores a new wish.
    ///
    /// # Errors
    ///
    /// Returns [`WishRepositoryError::DuplicateWish`] when the identifier is
    /// already in use.
    async fn store(&self, wish: &Wish) -> WishRepositoryResult<()>;

    /// Finds a wish by identifier.
    ///
    /// Returns `None` when the wish does not exist.
    async fn find_by_id(&self, id: WishId) -> WishRepositoryResult<Option<Wish>>;

    /// Atomically replaces the stored wish with `replacement` if it still
    /// matches `expected`. The stored review list is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`WishRepositoryError::NotFound`] when the wish is gone and
    /// [`WishRepositoryError::StatusConflict`] when its status or revision
    /// moved since `expected` was observed.
    async fn compare_and_swap(
        &self,
        expected: WriteCondition,
        replacement: &Wish,
    ) -> WishRepositoryResult<()>;

    /// Atomically appends `review` if the wish is completed and returns the
    /// wish as stored after the append.
    ///
    /// # Errors
    ///
    /// Returns [`WishRepositoryError::NotFound`] when the wish is gone and
    /// [`WishRepositoryError::StatusConflict`] when it is not completed.
    async fn append_review(&self, id: WishId, review: &Review) -> WishRepositoryResult<Wish>;

    /// Deletes the wish if it still matches `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`WishRepositoryError::NotFound`] or
    /// [`WishRepositoryError::StatusConflict`] as for
    /// [`WishRepository::compare_and_swap`].
    async fn delete(&self, expected: WriteCondition) -> WishRepositoryResult<()>;

    /// Returns one page of wishes matching `query` and the total match count.
    ///
    /// With a proximity filter the results are ordered nearest-first,
    /// otherwise newest-first.
    async fn search(&self, query: &WishQuery) -> WishRepositoryResult<WishPage>;
}

/// Errors returned by wish repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WishRepositoryError {
    /// A wish with the same identifier already exists.
    #[error("duplicate wish identifier: {0}")]
    DuplicateWish(WishId),

    /// The wish was not found.
    #[error("wish not found: {0}")]
    NotFound(WishId),

    /// The stored wish no longer matches the state the write was based on.
    #[error("wish {wish_id} changed concurrently: expected {expected}, found {actual}")]
    StatusConflict {
        /// Wish identifier.
        wish_id: WishId,
        /// Status the writer expected.
        expected: WishStatus,
        /// Status currently stored.
        actual: WishStatus,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WishRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
