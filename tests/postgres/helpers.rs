//! Shared test helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, SubsecRound, Utc};
use mockable::Clock;
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;
use wishboard::wish::{
    adapters::postgres::{PostgresApplicationLedger, PostgresWishRepository},
    domain::{ActorId, Wish},
    services::{
        CreateWishRequest, LocationInput, ReviewJournal, WishLifecycleService, WishQueryService,
    },
};

use super::database::TestDatabase;

/// Wall clock truncated to the microsecond precision `PostgreSQL` stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrosecondClock;

impl Clock for MicrosecondClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }
}

/// Services wired to one temporary database.
pub struct PgServices {
    pub repository: Arc<PostgresWishRepository>,
    pub lifecycle:
        WishLifecycleService<PostgresWishRepository, PostgresApplicationLedger, MicrosecondClock>,
    pub reviews: ReviewJournal<PostgresWishRepository, MicrosecondClock>,
    pub queries: WishQueryService<PostgresWishRepository>,
    pub database: TestDatabase,
}

/// Creates a multi-threaded runtime for driving async services in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> Result<Runtime, eyre::Report> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()?)
}

/// Builds services over a fresh database on the shared cluster.
///
/// # Errors
///
/// Returns an error if the database cannot be prepared.
pub fn pg_services(cluster: &'static TestCluster) -> Result<PgServices, eyre::Report> {
    let database = TestDatabase::create(cluster)?;
    let repository = Arc::new(PostgresWishRepository::new(database.pool()?));
    let clock = Arc::new(MicrosecondClock);
    Ok(PgServices {
        lifecycle: WishLifecycleService::new(
            Arc::clone(&repository),
            Arc::new(PostgresApplicationLedger::new(database.pool()?)),
            Arc::clone(&clock),
        ),
        reviews: ReviewJournal::new(Arc::clone(&repository), clock),
        queries: WishQueryService::new(Arc::clone(&repository)),
        repository,
        database,
    })
}

/// Builds a creation request at the given coordinates.
pub fn wish_at(budget: f64, longitude: f64, latitude: f64) -> CreateWishRequest {
    CreateWishRequest::new(
        "Fetch a parcel",
        "From the locker on the corner",
        "life",
        budget,
        LocationInput::new(longitude, latitude, "Test address"),
        MicrosecondClock.utc() + Duration::days(2),
    )
    .with_tags(vec!["parcel".to_owned()])
}

/// Creates and publishes a wish.
///
/// # Errors
///
/// Returns an error if either step fails.
pub async fn publish_new(
    services: &PgServices,
    creator: ActorId,
    request: CreateWishRequest,
) -> Result<Wish, eyre::Report> {
    let draft = services.lifecycle.create(creator, request).await?;
    Ok(services.lifecycle.publish(draft.id(), creator).await?)
}
