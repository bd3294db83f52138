//! Shared world state for wish lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use wishboard::wish::{
    adapters::memory::InMemoryApplicationLedger,
    domain::{ActorId, Wish, WishId},
    services::{ReviewJournal, WishLifecycleService, WishServiceError},
};

use super::race::RaceGateRepository;

/// Lifecycle service type used by the BDD world.
pub type TestLifecycle =
    WishLifecycleService<RaceGateRepository, InMemoryApplicationLedger, DefaultClock>;

/// Scenario world for wish lifecycle behaviour tests.
pub struct WishLifecycleWorld {
    pub repository: Arc<RaceGateRepository>,
    pub lifecycle: TestLifecycle,
    pub reviews: ReviewJournal<RaceGateRepository, DefaultClock>,
    pub creator: ActorId,
    pub reviewer: ActorId,
    pub wish_id: Option<WishId>,
    pub accept_results: Vec<(ActorId, Result<Wish, WishServiceError>)>,
    pub last_result: Option<Result<Wish, WishServiceError>>,
}

impl WishLifecycleWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(RaceGateRepository::default());
        let clock = Arc::new(DefaultClock);
        Self {
            lifecycle: WishLifecycleService::new(
                Arc::clone(&repository),
                Arc::new(InMemoryApplicationLedger::new()),
                Arc::clone(&clock),
            ),
            reviews: ReviewJournal::new(Arc::clone(&repository), clock),
            repository,
            creator: ActorId::new(),
            reviewer: ActorId::new(),
            wish_id: None,
            accept_results: Vec::new(),
            last_result: None,
        }
    }

    /// Returns the wish under test.
    ///
    /// # Errors
    ///
    /// Returns an error if no wish has been created yet.
    pub fn wish_id(&self) -> Result<WishId, eyre::Report> {
        self.wish_id
            .ok_or_else(|| eyre::eyre!("missing wish in scenario world"))
    }

    /// Records the outcome of a single-wish operation.
    pub fn record(&mut self, result: Result<Wish, WishServiceError>) {
        self.last_result = Some(result);
    }
}

impl Default for WishLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> WishLifecycleWorld {
    WishLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
