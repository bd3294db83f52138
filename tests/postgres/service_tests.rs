//! Lifecycle services running over `PostgreSQL`.

use std::sync::Arc;

use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use wishboard::wish::{
    adapters::postgres::PostgresApplicationLedger,
    domain::ActorId,
    ports::HelperApplicationRepository,
    services::WishErrorKind,
};

use super::helpers::{pg_services, publish_new, test_runtime, wish_at};

#[rstest]
fn concurrent_accepts_have_exactly_one_winner(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), eyre::Report> {
    let services = pg_services(shared_test_cluster)?;
    test_runtime()?.block_on(async {
        let creator = ActorId::new();
        let pending = publish_new(&services, creator, wish_at(10.0, 121.47, 31.23)).await?;
        let lifecycle = Arc::new(services.lifecycle.clone());

        let handles: Vec<_> = (0..6)
            .map(|_| {
                let service = Arc::clone(&lifecycle);
                let helper = ActorId::new();
                let wish_id = pending.id();
                tokio::spawn(async move {
                    (helper, service.accept_helper(wish_id, creator, helper).await)
                })
            })
            .collect();

        let mut winners = Vec::new();
        for handle in handles {
            let (helper, result) = handle.await?;
            match result {
                Ok(_) => winners.push(helper),
                Err(err) => eyre::ensure!(
                    err.kind() == WishErrorKind::InvalidState,
                    "loser must see InvalidState, got {err}"
                ),
            }
        }

        eyre::ensure!(winners.len() == 1, "expected one winner, got {}", winners.len());
        let stored = services.lifecycle.get(pending.id()).await?;
        eyre::ensure!(stored.helper() == winners.first().copied(), "winner persisted");
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn applications_are_unique_and_removed_with_the_wish(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), eyre::Report> {
    let services = pg_services(shared_test_cluster)?;
    test_runtime()?.block_on(async {
        let creator = ActorId::new();
        let volunteer = ActorId::new();
        let pending = publish_new(&services, creator, wish_at(10.0, 121.47, 31.23)).await?;

        services.lifecycle.apply(pending.id(), volunteer).await?;
        services.lifecycle.apply(pending.id(), volunteer).await?;
        let applications = services
            .lifecycle
            .list_applications(pending.id(), creator)
            .await?;
        eyre::ensure!(applications.len() == 1, "repeat application recorded once");

        services.lifecycle.delete(pending.id(), creator).await?;
        let err = services
            .lifecycle
            .get(pending.id())
            .await
            .err()
            .ok_or_else(|| eyre::eyre!("wish should be gone"))?;
        eyre::ensure!(err.kind() == WishErrorKind::NotFound, "deleted wish not found");

        let ledger = PostgresApplicationLedger::new(services.database.pool()?);
        let left = ledger.list_for_wish(pending.id()).await?;
        eyre::ensure!(left.is_empty(), "applications outlived their wish: {left:?}");
        Ok::<(), eyre::Report>(())
    })
}
