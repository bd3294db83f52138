//! When steps for wish lifecycle BDD scenarios.

use rstest_bdd_macros::when;
use serde_json::json;
use wishboard::wish::{
    domain::ActorId,
    services::{ReviewRequest, UpdateWishRequest},
};

use super::world::{WishLifecycleWorld, run_async};

#[when("the creator publishes the wish")]
fn creator_publishes(world: &mut WishLifecycleWorld) -> Result<(), eyre::Report> {
    let wish_id = world.wish_id()?;
    let result = run_async(world.lifecycle.publish(wish_id, world.creator));
    world.record(result);
    Ok(())
}

#[when("two helpers accept the wish concurrently")]
fn helpers_race(world: &mut WishLifecycleWorld) -> Result<(), eyre::Report> {
    let wish_id = world.wish_id()?;
    let first = ActorId::new();
    let second = ActorId::new();
    world.repository.arm(2)?;
    let (first_result, second_result) = run_async(async {
        tokio::join!(
            world.lifecycle.accept_helper(wish_id, world.creator, first),
            world.lifecycle.accept_helper(wish_id, world.creator, second),
        )
    });
    world.repository.disarm()?;
    world.accept_results = vec![(first, first_result), (second, second_result)];
    Ok(())
}

#[when("the creator completes the wish")]
fn creator_completes(world: &mut WishLifecycleWorld) -> Result<(), eyre::Report> {
    let wish_id = world.wish_id()?;
    let result = run_async(world.lifecycle.complete(wish_id, world.creator));
    world.record(result);
    Ok(())
}

#[when(r#"the creator sets the wish status to "{status}" through an update"#)]
fn creator_smuggles_status(
    world: &mut WishLifecycleWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let wish_id = world.wish_id()?;
    let request = UpdateWishRequest {
        title: Some("Assemble two bookshelves".to_owned()),
        status: Some(json!(status)),
        ..UpdateWishRequest::default()
    };
    let result = run_async(world.lifecycle.update_metadata(wish_id, world.creator, request));
    world.record(result);
    Ok(())
}

#[when("a reviewer rates the wish {rating:i32}")]
fn reviewer_rates(world: &mut WishLifecycleWorld, rating: i32) -> Result<(), eyre::Report> {
    rate(world, rating)
}

#[when("the same reviewer rates the wish {rating:i32}")]
fn same_reviewer_rates(world: &mut WishLifecycleWorld, rating: i32) -> Result<(), eyre::Report> {
    rate(world, rating)
}

fn rate(world: &mut WishLifecycleWorld, rating: i32) -> Result<(), eyre::Report> {
    let wish_id = world.wish_id()?;
    let result = run_async(world.reviews.append(
        wish_id,
        world.reviewer,
        ReviewRequest::new(rating, "Rated from a scenario"),
    ));
    world.record(result);
    Ok(())
}
