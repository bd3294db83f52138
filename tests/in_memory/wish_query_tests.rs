//! In-memory integration tests for wish listings.

use rstest::rstest;
use wishboard::wish::{
    domain::{ActorId, WishId},
    services::{ListWishesRequest, WishErrorKind},
};

use super::helpers::{Services, creator, publish_new, services, wish_at};

fn around_lujiazui(radius_km: f64) -> ListWishesRequest {
    ListWishesRequest {
        location: Some("121.5055,31.2397".to_owned()),
        radius: Some(radius_km),
        ..ListWishesRequest::default()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn proximity_and_budget_filters_combine(
    services: Services,
    creator: ActorId,
) -> Result<(), eyre::Report> {
    let cheap_near = publish_new(
        &services,
        creator,
        wish_at("Near and cheap", 50.0, 121.5010, 31.2410),
    )
    .await?
    .id();
    let pricey_near = publish_new(
        &services,
        creator,
        wish_at("Near and pricey", 900.0, 121.5100, 31.2380),
    )
    .await?
    .id();
    publish_new(&services, creator, wish_at("Far away", 50.0, 116.4074, 39.9042)).await?;

    let all_near = services.queries.list(&around_lujiazui(5.0)).await?;
    let mut near_ids: Vec<WishId> = all_near.wishes.iter().map(|wish| wish.id()).collect();
    near_ids.sort();
    let mut expected = vec![cheap_near, pricey_near];
    expected.sort();
    eyre::ensure!(near_ids == expected, "only nearby wishes are listed");

    let affordable = services
        .queries
        .list(&ListWishesRequest {
            max_budget: Some(100.0),
            ..around_lujiazui(5.0)
        })
        .await?;
    let ids: Vec<WishId> = affordable.wishes.iter().map(|wish| wish.id()).collect();
    eyre::ensure!(ids == vec![cheap_near], "budget filter applies inside the radius");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nearby_results_are_nearest_first_and_within_radius(
    services: Services,
    creator: ActorId,
) -> Result<(), eyre::Report> {
    for longitude in [121.5655, 121.5155, 121.5455, 121.5255, 121.5555, 121.5355] {
        publish_new(&services, creator, wish_at("Ring", 10.0, longitude, 31.2397)).await?;
    }

    let listing = services.queries.nearby(&around_lujiazui(3.0)).await?;

    let longitudes: Vec<f64> = listing
        .wishes
        .iter()
        .map(|wish| wish.location().point().longitude())
        .collect();
    eyre::ensure!(
        longitudes == vec![121.5155, 121.5255, 121.5355],
        "expected the three wishes within three kilometres nearest first, got {longitudes:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn explicit_limit_controls_page_size(services: Services, creator: ActorId) {
    for index in 0..7 {
        publish_new(
            &services,
            creator,
            wish_at(&format!("Errand {index}"), 10.0, 121.47, 31.23),
        )
        .await
        .expect("setup should succeed");
    }

    let second_page = services
        .queries
        .list(&ListWishesRequest {
            page: Some(2),
            limit: Some(5),
            ..ListWishesRequest::default()
        })
        .await
        .expect("listing should succeed");

    assert_eq!(second_page.wishes.len(), 2);
    assert_eq!(second_page.pagination.pages, 2);
    assert_eq!(second_page.pagination.total, 7);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nearby_without_radius_is_bad_request(services: Services) {
    let err = services
        .queries
        .nearby(&ListWishesRequest {
            location: Some("121.5,31.2".to_owned()),
            ..ListWishesRequest::default()
        })
        .await
        .expect_err("radius is required");

    assert_eq!(err.kind(), WishErrorKind::BadRequest);
}
