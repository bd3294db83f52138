//! Domain model for wishes.
//!
//! The wish domain models the posting, publication, helper acceptance,
//! completion, and review of wishes, plus the filters used to list them.
//! Infrastructure concerns stay outside this boundary.

mod application;
mod category;
mod error;
mod geo;
mod ids;
mod media;
mod query;
mod review;
mod status;
mod values;
mod wish;

pub use application::HelperApplication;
pub use category::WishCategory;
pub use error::{ParseWishCategoryError, ParseWishStatusError, WishDomainError};
pub use geo::{BoundingBox, Distance, EARTH_RADIUS_METERS, GeoPoint, Location};
pub use ids::{ActorId, MediaId, WishId};
pub use media::{MediaItem, MediaKind};
pub use query::{BudgetRange, PageRequest, Pagination, ProximityFilter, WishFilter, WishPage, WishQuery};
pub use review::{Rating, Review};
pub use status::WishStatus;
pub use values::{Budget, Tags, WishDescription, WishTitle};
pub use wish::{MetadataChanges, NewWishParams, PersistedWishData, Wish};
