//! Shared fixtures for wish unit tests.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

use crate::wish::{
    adapters::memory::{InMemoryApplicationLedger, InMemoryWishRepository},
    domain::{ActorId, Wish},
    services::{
        CreateWishRequest, LocationInput, ReviewJournal, WishLifecycleService, WishQueryService,
    },
};

/// Clock frozen at a chosen instant that tests move forward explicitly.
#[derive(Debug, Clone)]
pub(super) struct FixedClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    pub(super) fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    pub(super) fn advance(&self, by: Duration) {
        let mut now = self.now.write().expect("clock lock should not be poisoned");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock should not be poisoned")
    }
}

pub(super) fn start_of_test() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) type TestLifecycle =
    WishLifecycleService<InMemoryWishRepository, InMemoryApplicationLedger, FixedClock>;

pub(super) struct Harness {
    pub(super) repository: Arc<InMemoryWishRepository>,
    pub(super) applications: Arc<InMemoryApplicationLedger>,
    pub(super) clock: Arc<FixedClock>,
    pub(super) lifecycle: TestLifecycle,
    pub(super) reviews: ReviewJournal<InMemoryWishRepository, FixedClock>,
    pub(super) queries: WishQueryService<InMemoryWishRepository>,
}

#[fixture]
pub(super) fn harness() -> Harness {
    let repository = Arc::new(InMemoryWishRepository::new());
    let applications = Arc::new(InMemoryApplicationLedger::new());
    let clock = Arc::new(FixedClock::at(start_of_test()));
    Harness {
        lifecycle: WishLifecycleService::new(
            Arc::clone(&repository),
            Arc::clone(&applications),
            Arc::clone(&clock),
        ),
        reviews: ReviewJournal::new(Arc::clone(&repository), Arc::clone(&clock)),
        queries: WishQueryService::new(Arc::clone(&repository)),
        repository,
        applications,
        clock,
    }
}

#[fixture]
pub(super) fn creator() -> ActorId {
    ActorId::new()
}

/// A valid request for a wish in central Shanghai.
pub(super) fn create_request(budget: f64) -> CreateWishRequest {
    CreateWishRequest::new(
        "Walk my dog",
        "Thirty minutes around the park, lead provided",
        "life",
        budget,
        LocationInput::new(121.4737, 31.2304, "People's Square, Shanghai"),
        start_of_test() + Duration::days(3),
    )
}

pub(super) fn located_request(budget: f64, longitude: f64, latitude: f64) -> CreateWishRequest {
    CreateWishRequest::new(
        "Carry groceries",
        "Two bags up to the fourth floor",
        "life",
        budget,
        LocationInput::new(longitude, latitude, "Somewhere nearby"),
        start_of_test() + Duration::days(3),
    )
    .with_status("pending")
}

/// Creates and publishes a wish for `creator`.
pub(super) async fn pending_wish(harness: &Harness, creator: ActorId) -> Wish {
    let draft = harness
        .lifecycle
        .create(creator, create_request(200.0))
        .await
        .expect("wish creation should succeed");
    harness
        .lifecycle
        .publish(draft.id(), creator)
        .await
        .expect("publish should succeed")
}

/// Drives a fresh wish through to completion with `helper` accepted.
pub(super) async fn completed_wish(harness: &Harness, creator: ActorId, helper: ActorId) -> Wish {
    let pending = pending_wish(harness, creator).await;
    harness
        .lifecycle
        .accept_helper(pending.id(), creator, helper)
        .await
        .expect("accept should succeed");
    harness
        .lifecycle
        .complete(pending.id(), creator)
        .await
        .expect("complete should succeed")
}
