//! Then steps for wish lifecycle BDD scenarios.

use rstest_bdd_macros::then;
use wishboard::wish::{
    domain::WishStatus,
    services::WishServiceError,
};

use super::world::{WishLifecycleWorld, run_async};

#[then(r#"the wish status is "{status}""#)]
fn wish_status_is(world: &WishLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = WishStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let stored = run_async(world.lifecycle.get(world.wish_id()?))?;
    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("exactly one acceptance succeeds")]
fn exactly_one_acceptance(world: &WishLifecycleWorld) -> Result<(), eyre::Report> {
    let winners = world
        .accept_results
        .iter()
        .filter(|(_, result)| result.is_ok())
        .count();
    eyre::ensure!(winners == 1, "expected one winner, found {winners}");

    let loser_states = world
        .accept_results
        .iter()
        .filter_map(|(_, result)| result.as_ref().err())
        .all(|err| {
            matches!(
                err,
                WishServiceError::InvalidState {
                    status: WishStatus::InProgress,
                    ..
                }
            )
        });
    eyre::ensure!(
        loser_states,
        "losing acceptances must fail with InvalidState while in_progress"
    );
    Ok(())
}

#[then("the stored helper is the winning helper")]
fn stored_helper_is_winner(world: &WishLifecycleWorld) -> Result<(), eyre::Report> {
    let winner = world
        .accept_results
        .iter()
        .find(|(_, result)| result.is_ok())
        .map(|(helper, _)| *helper)
        .ok_or_else(|| eyre::eyre!("no acceptance succeeded"))?;
    let stored = run_async(world.lifecycle.get(world.wish_id()?))?;
    eyre::ensure!(
        stored.helper() == Some(winner),
        "stored helper {:?} is not the winner {winner}",
        stored.helper()
    );
    Ok(())
}

#[then("the wish has {count:usize} reviews")]
fn wish_has_reviews(world: &WishLifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = run_async(world.lifecycle.get(world.wish_id()?))?;
    let actual = stored.reviews().len();
    eyre::ensure!(actual == count, "expected {count} reviews, found {actual}");
    Ok(())
}

#[then(r#"the last operation fails with "{kind}""#)]
fn last_operation_fails(world: &WishLifecycleWorld, kind: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;
    let Err(err) = result else {
        return Err(eyre::eyre!("expected {kind} failure, operation succeeded"));
    };
    let actual = format!("{:?}", err.kind());
    eyre::ensure!(actual == kind, "expected {kind} failure, got {actual}: {err}");
    Ok(())
}
