//! Repository wrapper that lines up concurrent readers for race scenarios.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Barrier;
use wishboard::wish::{
    adapters::memory::InMemoryWishRepository,
    domain::{Review, Wish, WishId, WishPage, WishQuery},
    ports::{WishRepository, WishRepositoryError, WishRepositoryResult, WriteCondition},
};

/// In-memory repository whose reads can be held at a barrier.
///
/// While armed, each `find_by_id` waits until `parties` reads have happened,
/// so racing writers all observe the same stored wish before any of them
/// writes.
#[derive(Default)]
pub struct RaceGateRepository {
    inner: InMemoryWishRepository,
    gate: Mutex<Option<Arc<Barrier>>>,
}

impl RaceGateRepository {
    /// Holds the next reads until `parties` of them have arrived.
    ///
    /// # Errors
    ///
    /// Returns an error if the gate lock is poisoned.
    pub fn arm(&self, parties: usize) -> Result<(), eyre::Report> {
        *self.lock_gate()? = Some(Arc::new(Barrier::new(parties)));
        Ok(())
    }

    /// Lets reads through without waiting.
    ///
    /// # Errors
    ///
    /// Returns an error if the gate lock is poisoned.
    pub fn disarm(&self) -> Result<(), eyre::Report> {
        *self.lock_gate()? = None;
        Ok(())
    }

    fn lock_gate(&self) -> Result<std::sync::MutexGuard<'_, Option<Arc<Barrier>>>, eyre::Report> {
        self.gate
            .lock()
            .map_err(|err| eyre::eyre!("race gate poisoned: {err}"))
    }

    fn current_gate(&self) -> WishRepositoryResult<Option<Arc<Barrier>>> {
        self.gate.lock().map(|gate| gate.clone()).map_err(|err| {
            WishRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl WishRepository for RaceGateRepository {
    async fn store(&self, wish: &Wish) -> WishRepositoryResult<()> {
        self.inner.store(wish).await
    }

    async fn find_by_id(&self, id: WishId) -> WishRepositoryResult<Option<Wish>> {
        let found = self.inner.find_by_id(id).await?;
        if let Some(barrier) = self.current_gate()? {
            barrier.wait().await;
        }
        Ok(found)
    }

    async fn compare_and_swap(
        &self,
        expected: WriteCondition,
        replacement: &Wish,
    ) -> WishRepositoryResult<()> {
        self.inner.compare_and_swap(expected, replacement).await
    }

    async fn append_review(&self, id: WishId, review: &Review) -> WishRepositoryResult<Wish> {
        self.inner.append_review(id, review).await
    }

    async fn delete(&self, expected: WriteCondition) -> WishRepositoryResult<()> {
        self.inner.delete(expected).await
    }

    async fn search(&self, query: &WishQuery) -> WishRepositoryResult<WishPage> {
        self.inner.search(query).await
    }
}
