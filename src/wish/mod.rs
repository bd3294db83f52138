//! Wish lifecycle management and listings.
//!
//! A creator posts a wish, publishes it, accepts a helper, and marks it
//! completed; anyone may then review it. Listings filter by category,
//! status, participants, budget and distance. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - HTTP status and envelope mapping in [`boundary`]

pub mod adapters;
pub mod boundary;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
