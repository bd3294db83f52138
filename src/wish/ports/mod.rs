//! Port contracts for wish management.
//!
//! Ports define infrastructure-agnostic interfaces used by wish services.

pub mod application;
pub mod hooks;
pub mod proximity;
pub mod repository;

pub use application::{
    ApplicationLedgerError, ApplicationLedgerResult, HelperApplicationRepository,
};
pub use hooks::{CompletionHook, LoggingCompletionHook};
pub use proximity::{ProximityHit, ProximityIndex};
pub use repository::{WishRepository, WishRepositoryError, WishRepositoryResult, WriteCondition};
