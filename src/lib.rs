//! Wishboard: a community wish board.
//!
//! People post wishes (small favours with a budget, location and
//! deadline), helpers volunteer, and the creator accepts one helper and
//! confirms completion. Anyone may review a completed wish. Listings filter
//! by attributes and distance.
//!
//! # Architecture
//!
//! Wishboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`wish`]: Wish lifecycle, reviews, helper applications and listings

pub mod wish;
