//! In-memory adapters for wish storage, proximity search, and applications.

mod application;
mod grid_index;
mod wish;

pub use application::InMemoryApplicationLedger;
pub use grid_index::GridProximityIndex;
pub use wish::InMemoryWishRepository;
