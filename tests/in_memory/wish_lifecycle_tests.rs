//! In-memory integration tests for wish lifecycle operations.

use chrono::Duration;
use rstest::rstest;
use serde_json::json;
use wishboard::wish::{
    domain::{ActorId, Budget, WishStatus},
    services::{MediaInput, UpdateWishRequest, WishErrorKind, WishServiceError},
};

use super::helpers::{Services, complete_new, creator, publish_new, services, wish_at};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_keeps_helper_invariant(
    services: Services,
    creator: ActorId,
) -> Result<(), eyre::Report> {
    let draft = services
        .lifecycle
        .create(creator, wish_at("Paint a fence", 120.0, 121.47, 31.23))
        .await?;
    eyre::ensure!(draft.helper().is_none(), "draft must not have a helper");

    let pending = services.lifecycle.publish(draft.id(), creator).await?;
    eyre::ensure!(pending.status() == WishStatus::Pending, "publish moves to pending");
    eyre::ensure!(pending.helper().is_none(), "pending must not have a helper");

    let helper = ActorId::new();
    let accepted = services
        .lifecycle
        .accept_helper(draft.id(), creator, helper)
        .await?;
    eyre::ensure!(accepted.status() == WishStatus::InProgress, "accept moves to in progress");
    eyre::ensure!(accepted.helper() == Some(helper), "helper recorded");

    let completed = services.lifecycle.complete(draft.id(), creator).await?;
    eyre::ensure!(completed.status() == WishStatus::Completed, "complete moves to completed");
    eyre::ensure!(completed.helper() == Some(helper), "helper kept after completion");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn draft_cannot_jump_to_completed(services: Services, creator: ActorId) {
    let draft = services
        .lifecycle
        .create(creator, wish_at("Paint a fence", 120.0, 121.47, 31.23))
        .await
        .expect("creation should succeed");

    let err = services
        .lifecycle
        .complete(draft.id(), creator)
        .await
        .expect_err("draft cannot complete");

    assert_eq!(err.kind(), WishErrorKind::InvalidState);
    let stored = services
        .lifecycle
        .get(draft.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(stored.status(), WishStatus::Draft);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_status_and_leaves_wish_unchanged(services: Services, creator: ActorId) {
    let pending = publish_new(&services, creator, wish_at("Move a sofa", 90.0, 121.47, 31.23))
        .await
        .expect("setup should succeed");

    let err = services
        .lifecycle
        .update_metadata(
            pending.id(),
            creator,
            UpdateWishRequest {
                title: Some("Move two sofas".to_owned()),
                status: Some(json!("completed")),
                ..UpdateWishRequest::default()
            },
        )
        .await
        .expect_err("status is protected");

    assert!(matches!(err, WishServiceError::ProtectedFields(ref fields) if fields == &["status"]));
    assert_eq!(err.kind(), WishErrorKind::BadRequest);
    let stored = services
        .lifecycle
        .get(pending.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(stored, pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creator_edits_metadata_without_touching_status(services: Services, creator: ActorId) {
    let pending = publish_new(&services, creator, wish_at("Move a sofa", 90.0, 121.47, 31.23))
        .await
        .expect("setup should succeed");

    let updated = services
        .lifecycle
        .update_metadata(
            pending.id(),
            creator,
            UpdateWishRequest {
                budget: Some(150.0),
                tags: Some(vec!["heavy".to_owned(), "weekend".to_owned()]),
                ..UpdateWishRequest::default()
            },
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.status(), WishStatus::Pending);
    assert_eq!(updated.budget(), Budget::new(150.0).expect("valid budget"));
    assert_eq!(updated.tags().as_slice(), ["heavy", "weekend"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strangers_are_forbidden_from_creator_operations(services: Services, creator: ActorId) {
    let pending = publish_new(&services, creator, wish_at("Water plants", 30.0, 121.47, 31.23))
        .await
        .expect("setup should succeed");
    let stranger = ActorId::new();

    let attempts = [
        services
            .lifecycle
            .accept_helper(pending.id(), stranger, ActorId::new())
            .await
            .map(|_| ()),
        services
            .lifecycle
            .cancel(pending.id(), stranger)
            .await
            .map(|_| ()),
        services
            .lifecycle
            .extend_deadline(
                pending.id(),
                stranger,
                pending.deadline() + Duration::days(1),
            )
            .await
            .map(|_| ()),
        services.lifecycle.delete(pending.id(), stranger).await,
    ];

    for attempt in attempts {
        let err = attempt.expect_err("stranger must be rejected");
        assert_eq!(err.kind(), WishErrorKind::Forbidden);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancel_then_further_transitions_fail(services: Services, creator: ActorId) {
    let pending = publish_new(&services, creator, wish_at("Water plants", 30.0, 121.47, 31.23))
        .await
        .expect("setup should succeed");

    let cancelled = services
        .lifecycle
        .cancel(pending.id(), creator)
        .await
        .expect("cancel should succeed");
    assert_eq!(cancelled.status(), WishStatus::Cancelled);

    let again = services
        .lifecycle
        .cancel(pending.id(), creator)
        .await
        .expect_err("terminal wishes cannot be cancelled");
    assert_eq!(again.kind(), WishErrorKind::InvalidState);

    let accept = services
        .lifecycle
        .accept_helper(pending.id(), creator, ActorId::new())
        .await
        .expect_err("cancelled wishes cannot be accepted");
    assert_eq!(accept.kind(), WishErrorKind::InvalidState);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deadline_extension_must_move_forward(services: Services, creator: ActorId) {
    let pending = publish_new(&services, creator, wish_at("Water plants", 30.0, 121.47, 31.23))
        .await
        .expect("setup should succeed");

    let extended = services
        .lifecycle
        .extend_deadline(pending.id(), creator, pending.deadline() + Duration::days(5))
        .await
        .expect("later deadline should be accepted");
    assert_eq!(extended.deadline(), pending.deadline() + Duration::days(5));

    let err = services
        .lifecycle
        .extend_deadline(pending.id(), creator, pending.deadline())
        .await
        .expect_err("earlier deadline should be rejected");
    assert_eq!(err.kind(), WishErrorKind::BadRequest);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn media_can_be_attached_and_removed(services: Services, creator: ActorId) {
    let pending = publish_new(&services, creator, wish_at("Hang a picture", 25.0, 121.47, 31.23))
        .await
        .expect("setup should succeed");

    let with_media = services
        .lifecycle
        .attach_media(
            pending.id(),
            creator,
            MediaInput::new("image", "https://cdn.example.com/wall.jpg")
                .with_thumbnail("https://cdn.example.com/wall-small.jpg"),
        )
        .await
        .expect("attach should succeed");
    let media_id = with_media
        .media()
        .first()
        .map(|item| item.id())
        .expect("one media item");

    let without_media = services
        .lifecycle
        .detach_media(pending.id(), creator, media_id)
        .await
        .expect("detach should succeed");
    assert!(without_media.media().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn applications_are_recorded_once_per_helper(services: Services, creator: ActorId) {
    let pending = publish_new(&services, creator, wish_at("Walk a dog", 40.0, 121.47, 31.23))
        .await
        .expect("setup should succeed");
    let volunteer = ActorId::new();

    services
        .lifecycle
        .apply(pending.id(), volunteer)
        .await
        .expect("first application should succeed");
    services
        .lifecycle
        .apply(pending.id(), volunteer)
        .await
        .expect("repeat application is accepted");
    services
        .lifecycle
        .apply(pending.id(), ActorId::new())
        .await
        .expect("second volunteer should succeed");

    let applications = services
        .lifecycle
        .list_applications(pending.id(), creator)
        .await
        .expect("creator may list applications");
    assert_eq!(applications.len(), 2);

    let own = services
        .lifecycle
        .apply(pending.id(), creator)
        .await
        .expect_err("creator cannot apply");
    assert_eq!(own.kind(), WishErrorKind::BadRequest);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn applying_after_acceptance_is_invalid_state(services: Services, creator: ActorId) {
    let completed = complete_new(&services, creator, ActorId::new())
        .await
        .expect("setup should succeed");

    let err = services
        .lifecycle
        .apply(completed.id(), ActorId::new())
        .await
        .expect_err("only pending wishes take applications");

    assert_eq!(err.kind(), WishErrorKind::InvalidState);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_wish_is_gone(services: Services, creator: ActorId) {
    let pending = publish_new(&services, creator, wish_at("Walk a dog", 40.0, 121.47, 31.23))
        .await
        .expect("setup should succeed");

    services
        .lifecycle
        .delete(pending.id(), creator)
        .await
        .expect("delete should succeed");

    let err = services
        .lifecycle
        .get(pending.id())
        .await
        .expect_err("wish was deleted");
    assert_eq!(err.kind(), WishErrorKind::NotFound);
}
