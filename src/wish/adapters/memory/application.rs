//! In-memory ledger for helper applications.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::wish::{
    domain::{HelperApplication, WishId},
    ports::{ApplicationLedgerError, ApplicationLedgerResult, HelperApplicationRepository},
};

/// Thread-safe in-memory application ledger.
///
/// Entries live until [`HelperApplicationRepository::forget_wish`] drops them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApplicationLedger {
    state: Arc<RwLock<HashMap<WishId, Vec<HelperApplication>>>>,
}

impl InMemoryApplicationLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HelperApplicationRepository for InMemoryApplicationLedger {
    async fn record(&self, application: &HelperApplication) -> ApplicationLedgerResult<bool> {
        let mut state = self.state.write().map_err(|err| {
            ApplicationLedgerError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let applications = state.entry(application.wish_id()).or_default();
        if applications
            .iter()
            .any(|existing| existing.applicant() == application.applicant())
        {
            return Ok(false);
        }
        applications.push(application.clone());
        Ok(true)
    }

    async fn list_for_wish(
        &self,
        wish_id: WishId,
    ) -> ApplicationLedgerResult<Vec<HelperApplication>> {
        let state = self.state.read().map_err(|err| {
            ApplicationLedgerError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&wish_id).cloned().unwrap_or_default())
    }

    async fn forget_wish(&self, wish_id: WishId) -> ApplicationLedgerResult<usize> {
        let mut state = self.state.write().map_err(|err| {
            ApplicationLedgerError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.remove(&wish_id).map_or(0, |applications| applications.len()))
    }
}
