//! `PostgreSQL` adapters for wish persistence.

mod application;
mod conversion;
mod models;
mod repository;
mod schema;

pub use application::PostgresApplicationLedger;
pub use repository::{PostgresWishRepository, WishPgPool};
