//! `PostgreSQL` ledger for helper applications.

use super::{models::ApplicationRow, repository::WishPgPool, schema::helper_applications};
use crate::wish::{
    domain::{ActorId, HelperApplication, WishId},
    ports::{ApplicationLedgerError, ApplicationLedgerResult, HelperApplicationRepository},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed application ledger.
///
/// The composite primary key makes repeated applications by the same actor
/// a no-op.
#[derive(Debug, Clone)]
pub struct PostgresApplicationLedger {
    pool: WishPgPool,
}

impl PostgresApplicationLedger {
    /// Creates a new ledger from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WishPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ApplicationLedgerResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ApplicationLedgerResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ApplicationLedgerError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ApplicationLedgerError::persistence)?
    }
}

#[async_trait]
impl HelperApplicationRepository for PostgresApplicationLedger {
    async fn record(&self, application: &HelperApplication) -> ApplicationLedgerResult<bool> {
        let row = ApplicationRow {
            wish_id: application.wish_id().into_inner(),
            applicant_id: application.applicant().into_inner(),
            applied_at: application.applied_at(),
        };
        self.run_blocking(move |connection| {
            let inserted = diesel::insert_into(helper_applications::table)
                .values(&row)
                .on_conflict_do_nothing()
                .execute(connection)
                .map_err(ApplicationLedgerError::persistence)?;
            Ok(inserted == 1)
        })
        .await
    }

    async fn list_for_wish(
        &self,
        wish_id: WishId,
    ) -> ApplicationLedgerResult<Vec<HelperApplication>> {
        self.run_blocking(move |connection| {
            let rows = helper_applications::table
                .filter(helper_applications::wish_id.eq(wish_id.into_inner()))
                .order(helper_applications::applied_at.asc())
                .select(ApplicationRow::as_select())
                .load::<ApplicationRow>(connection)
                .map_err(ApplicationLedgerError::persistence)?;
            Ok(rows
                .into_iter()
                .map(|row| {
                    HelperApplication::from_persisted(
                        WishId::from_uuid(row.wish_id),
                        ActorId::from_uuid(row.applicant_id),
                        row.applied_at,
                    )
                })
                .collect())
        })
        .await
    }

    async fn forget_wish(&self, wish_id: WishId) -> ApplicationLedgerResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(
                helper_applications::table
                    .filter(helper_applications::wish_id.eq(wish_id.into_inner())),
            )
            .execute(connection)
            .map_err(ApplicationLedgerError::persistence)
        })
        .await
    }
}
