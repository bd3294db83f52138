//! Conversion between wish rows and domain types.

use super::models::{NewWishRow, WishChangeset, WishRow};
use crate::wish::{
    domain::{
        ActorId, Budget, GeoPoint, Location, MediaItem, PersistedWishData, Review, Tags, Wish,
        WishCategory, WishDescription, WishId, WishStatus, WishTitle,
    },
    ports::{WishRepositoryError, WishRepositoryResult},
};

/// Column list matching [`WishRow`] for raw SQL statements.
pub(super) const WISH_COLUMNS: &str = concat!(
    "id, title, description, category, creator_id, helper_id, status, budget, ",
    "longitude, latitude, address, deadline, is_public, tags, media, reviews, ",
    "revision, created_at, updated_at",
);

pub(super) fn to_db_revision(revision: u64) -> WishRepositoryResult<i64> {
    i64::try_from(revision).map_err(WishRepositoryError::persistence)
}

pub(super) fn to_new_row(wish: &Wish) -> WishRepositoryResult<NewWishRow> {
    let point = wish.location().point();
    Ok(NewWishRow {
        id: wish.id().into_inner(),
        title: wish.title().as_str().to_owned(),
        description: wish.description().as_str().to_owned(),
        category: wish.category().as_str().to_owned(),
        creator_id: wish.creator().into_inner(),
        helper_id: wish.helper().map(ActorId::into_inner),
        status: wish.status().as_str().to_owned(),
        budget: wish.budget().value(),
        longitude: point.longitude(),
        latitude: point.latitude(),
        address: wish.location().address().to_owned(),
        deadline: wish.deadline(),
        is_public: wish.is_public(),
        tags: serde_json::to_value(wish.tags()).map_err(WishRepositoryError::persistence)?,
        media: serde_json::to_value(wish.media()).map_err(WishRepositoryError::persistence)?,
        reviews: serde_json::to_value(wish.reviews()).map_err(WishRepositoryError::persistence)?,
        revision: to_db_revision(wish.revision())?,
        created_at: wish.created_at(),
        updated_at: wish.updated_at(),
    })
}

pub(super) fn to_changeset(wish: &Wish) -> WishRepositoryResult<WishChangeset> {
    let NewWishRow {
        title,
        description,
        category,
        helper_id,
        status,
        budget,
        longitude,
        latitude,
        address,
        deadline,
        is_public,
        tags,
        media,
        revision,
        updated_at,
        ..
    } = to_new_row(wish)?;
    Ok(WishChangeset {
        title,
        description,
        category,
        helper_id,
        status,
        budget,
        longitude,
        latitude,
        address,
        deadline,
        is_public,
        tags,
        media,
        revision,
        updated_at,
    })
}

/// Rebuilds a wish from its row.
///
/// Length limits are not re-applied: rows were validated against the limits
/// in force when they were written.
pub(super) fn row_to_wish(row: WishRow) -> WishRepositoryResult<Wish> {
    let WishRow {
        id,
        title,
        description,
        category,
        creator_id,
        helper_id,
        status,
        budget,
        longitude,
        latitude,
        address,
        deadline,
        is_public,
        tags,
        media,
        reviews,
        revision,
        created_at,
        updated_at,
    } = row;

    let point = GeoPoint::new(longitude, latitude).map_err(WishRepositoryError::persistence)?;
    let data = PersistedWishData {
        id: WishId::from_uuid(id),
        title: WishTitle::new(title, usize::MAX).map_err(WishRepositoryError::persistence)?,
        description: WishDescription::new(description, usize::MAX)
            .map_err(WishRepositoryError::persistence)?,
        category: WishCategory::try_from(category.as_str())
            .map_err(WishRepositoryError::persistence)?,
        creator: ActorId::from_uuid(creator_id),
        helper: helper_id.map(ActorId::from_uuid),
        status: WishStatus::try_from(status.as_str()).map_err(WishRepositoryError::persistence)?,
        budget: Budget::new(budget).map_err(WishRepositoryError::persistence)?,
        location: Location::new(point, address).map_err(WishRepositoryError::persistence)?,
        deadline,
        is_public,
        tags: serde_json::from_value::<Tags>(tags).map_err(WishRepositoryError::persistence)?,
        media: serde_json::from_value::<Vec<MediaItem>>(media)
            .map_err(WishRepositoryError::persistence)?,
        reviews: serde_json::from_value::<Vec<Review>>(reviews)
            .map_err(WishRepositoryError::persistence)?,
        revision: u64::try_from(revision).map_err(WishRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Wish::from_persisted(data))
}
