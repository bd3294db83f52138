//! In-memory repository for wishes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::GridProximityIndex;
use crate::wish::{
    adapters::ranking::{compare_nearest, compare_newest, page_of, total_of},
    domain::{
        ProximityFilter, Review, Wish, WishFilter, WishId, WishPage, WishQuery, WishStatus,
    },
    ports::{
        ProximityIndex, WishRepository, WishRepositoryError, WishRepositoryResult, WriteCondition,
    },
};

/// Thread-safe in-memory wish repository.
///
/// Every write takes the single state lock, which makes each conditional
/// write atomic with respect to every other operation on the repository.
#[derive(Debug)]
pub struct InMemoryWishRepository<I = GridProximityIndex> {
    state: Arc<RwLock<InMemoryWishState<I>>>,
}

#[derive(Debug)]
struct InMemoryWishState<I> {
    wishes: HashMap<WishId, Wish>,
    index: I,
}

impl InMemoryWishRepository {
    /// Creates an empty repository backed by a [`GridProximityIndex`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_index(GridProximityIndex::new())
    }
}

impl Default for InMemoryWishRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Clone for InMemoryWishRepository<I> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<I: ProximityIndex> InMemoryWishRepository<I> {
    /// Creates an empty repository using `index` for radius searches.
    #[must_use]
    pub fn with_index(index: I) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryWishState {
                wishes: HashMap::new(),
                index,
            })),
        }
    }

    fn read_state(&self) -> WishRepositoryResult<RwLockReadGuard<'_, InMemoryWishState<I>>> {
        self.state.read().map_err(|err| {
            WishRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> WishRepositoryResult<RwLockWriteGuard<'_, InMemoryWishState<I>>> {
        self.state.write().map_err(|err| {
            WishRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl<I: ProximityIndex> InMemoryWishState<I> {
    fn newest_matching(&self, filter: &WishFilter) -> Vec<Wish> {
        let mut matching: Vec<&Wish> = self
            .wishes
            .values()
            .filter(|wish| filter.matches_attributes(wish))
            .collect();
        matching.sort_by(|left, right| compare_newest(left, right));
        matching.into_iter().cloned().collect()
    }

    fn nearest_matching(&self, filter: &WishFilter, proximity: ProximityFilter) -> Vec<Wish> {
        let mut ranked: Vec<_> = self
            .index
            .within(proximity.center, proximity.radius)
            .into_iter()
            .filter_map(|hit| self.wishes.get(&hit.wish_id).map(|wish| (hit.distance, wish)))
            .filter(|(_, wish)| filter.matches_attributes(wish))
            .collect();
        ranked.sort_by(|left, right| compare_nearest(*left, *right));
        ranked.into_iter().map(|(_, wish)| wish.clone()).collect()
    }
}

/// Checks that `stored` still matches the observation a writer based its
/// write on.
fn ensure_unchanged(stored: &Wish, expected: WriteCondition) -> WishRepositoryResult<()> {
    if stored.status() != expected.status || stored.revision() != expected.revision {
        return Err(WishRepositoryError::StatusConflict {
            wish_id: expected.wish_id,
            expected: expected.status,
            actual: stored.status(),
        });
    }
    Ok(())
}

#[async_trait]
impl<I: ProximityIndex> WishRepository for InMemoryWishRepository<I> {
    async fn store(&self, wish: &Wish) -> WishRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.wishes.contains_key(&wish.id()) {
            return Err(WishRepositoryError::DuplicateWish(wish.id()));
        }
        state.index.upsert(wish.id(), wish.location().point());
        state.wishes.insert(wish.id(), wish.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: WishId) -> WishRepositoryResult<Option<Wish>> {
        let state = self.read_state()?;
        Ok(state.wishes.get(&id).cloned())
    }

    async fn compare_and_swap(
        &self,
        expected: WriteCondition,
        replacement: &Wish,
    ) -> WishRepositoryResult<()> {
        if replacement.id() != expected.wish_id {
            return Err(WishRepositoryError::persistence(std::io::Error::other(
                format!(
                    "replacement wish {} does not match write target {}",
                    replacement.id(),
                    expected.wish_id
                ),
            )));
        }

        let mut guard = self.write_state()?;
        let InMemoryWishState { wishes, index } = &mut *guard;
        let stored = wishes
            .get_mut(&expected.wish_id)
            .ok_or(WishRepositoryError::NotFound(expected.wish_id))?;
        ensure_unchanged(stored, expected)?;

        stored.replace_keeping_reviews(replacement);
        index.upsert(expected.wish_id, stored.location().point());
        Ok(())
    }

    async fn append_review(&self, id: WishId, review: &Review) -> WishRepositoryResult<Wish> {
        let mut state = self.write_state()?;
        let stored = state
            .wishes
            .get_mut(&id)
            .ok_or(WishRepositoryError::NotFound(id))?;
        if stored.status() != WishStatus::Completed {
            return Err(WishRepositoryError::StatusConflict {
                wish_id: id,
                expected: WishStatus::Completed,
                actual: stored.status(),
            });
        }
        stored.push_review(review.clone());
        Ok(stored.clone())
    }

    async fn delete(&self, expected: WriteCondition) -> WishRepositoryResult<()> {
        let mut state = self.write_state()?;
        let stored = state
            .wishes
            .get(&expected.wish_id)
            .ok_or(WishRepositoryError::NotFound(expected.wish_id))?;
        ensure_unchanged(stored, expected)?;

        state.wishes.remove(&expected.wish_id);
        state.index.remove(expected.wish_id);
        Ok(())
    }

    async fn search(&self, query: &WishQuery) -> WishRepositoryResult<WishPage> {
        let state = self.read_state()?;
        let filter = &query.filter;

        let ordered = filter.proximity.map_or_else(
            || state.newest_matching(filter),
            |proximity| state.nearest_matching(filter, proximity),
        );

        let total = total_of(ordered.len());
        Ok(WishPage {
            wishes: page_of(ordered, query.page),
            total,
        })
    }
}
