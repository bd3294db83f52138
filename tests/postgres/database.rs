//! Per-test databases cloned from a migrated template on the shared cluster.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;
use wishboard::wish::adapters::postgres::WishPgPool;

/// Schema applied to the template database.
pub const CREATE_WISHES_SQL: &str =
    include_str!("../../migrations/2026-10-16-000000_create_wishes/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "wishboard_test_template";

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if the template cannot be created or migrated.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), eyre::Report> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut connection =
                PgConnection::establish(&url).map_err(|err| eyre::eyre!("{err}"))?;
            connection
                .batch_execute(CREATE_WISHES_SQL)
                .map_err(|err| eyre::eyre!("schema migration failed: {err}"))?;
            Ok(())
        })
        .map_err(|err| eyre::eyre!("template setup failed: {err}"))
}

/// A database cloned from the template, dropped together with the guard.
pub struct TestDatabase {
    cluster: &'static TestCluster,
    name: String,
    pool: Option<WishPgPool>,
}

impl TestDatabase {
    /// Clones the template into a uniquely named database.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or the clone cannot be prepared.
    pub fn create(cluster: &'static TestCluster) -> Result<Self, eyre::Report> {
        ensure_template(cluster)?;
        let name = format!("wishboard_test_{}", Uuid::new_v4().simple());
        cluster
            .create_database_from_template(&*name, TEMPLATE_DB)
            .map_err(|err| eyre::eyre!("failed to create {name}: {err}"))?;

        let url = cluster.connection().database_url(&name);
        let pool = Pool::builder()
            .max_size(4)
            .build(ConnectionManager::<PgConnection>::new(url))?;
        Ok(Self {
            cluster,
            name,
            pool: Some(pool),
        })
    }

    /// Returns a handle to the connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error once the database has been released.
    pub fn pool(&self) -> Result<WishPgPool, eyre::Report> {
        self.pool
            .clone()
            .ok_or_else(|| eyre::eyre!("database {} already released", self.name))
    }
}

impl Drop for TestDatabase {
    #[expect(
        clippy::print_stderr,
        reason = "cleanup failures are reported without failing the test"
    )]
    fn drop(&mut self) {
        drop(self.pool.take());
        if let Err(err) = self.cluster.drop_database(&*self.name) {
            eprintln!("Warning: failed to drop test database {}: {err}", self.name);
        }
    }
}
