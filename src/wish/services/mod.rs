//! Application services for wish lifecycle, reviews and listings.

mod error;
mod lifecycle;
mod query;
mod requests;
mod review;

pub use error::{WishAction, WishErrorKind, WishServiceError, WishServiceResult};
pub use lifecycle::WishLifecycleService;
pub use query::{WishListing, WishQueryBuilder, WishQueryService};
pub use requests::{
    CreateWishRequest, ListWishesRequest, LocationInput, MediaInput, ReviewRequest,
    UpdateWishRequest,
};
pub use review::ReviewJournal;
