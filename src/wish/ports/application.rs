//! Ledger port for helper applications.

use crate::wish::domain::{HelperApplication, WishId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for application ledger operations.
pub type ApplicationLedgerResult<T> = Result<T, ApplicationLedgerError>;

/// Records which helpers applied for which wishes.
#[async_trait]
pub trait HelperApplicationRepository: Send + Sync {
    /// Records `application` unless the applicant already applied for the
    /// same wish. Returns `true` when a new entry was written.
    async fn record(&self, application: &HelperApplication) -> ApplicationLedgerResult<bool>;

    /// Returns the applications for `wish_id`, oldest first.
    async fn list_for_wish(
        &self,
        wish_id: WishId,
    ) -> ApplicationLedgerResult<Vec<HelperApplication>>;

    /// Drops every application for `wish_id`. Returns how many were removed.
    async fn forget_wish(&self, wish_id: WishId) -> ApplicationLedgerResult<usize>;
}

/// Errors returned by application ledger implementations.
#[derive(Debug, Clone, Error)]
pub enum ApplicationLedgerError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ApplicationLedgerError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
