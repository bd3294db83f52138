//! `PostgreSQL` repository implementation for wish storage.

use super::{
    conversion::{WISH_COLUMNS, row_to_wish, to_changeset, to_db_revision, to_new_row},
    models::WishRow,
    schema::wishes,
};
use crate::wish::{
    adapters::ranking::{compare_nearest, page_of, total_of},
    domain::{Review, Wish, WishFilter, WishId, WishPage, WishQuery, WishStatus},
    ports::{WishRepository, WishRepositoryError, WishRepositoryResult, WriteCondition},
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// `PostgreSQL` connection pool type used by wish adapters.
pub type WishPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed wish repository.
///
/// Conditional writes are single `UPDATE`/`DELETE` statements whose `WHERE`
/// clause carries the expected status and revision, so the database row lock
/// decides which of two racing writers wins.
#[derive(Debug, Clone)]
pub struct PostgresWishRepository {
    pool: WishPgPool,
}

impl PostgresWishRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WishPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WishRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WishRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WishRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WishRepositoryError::persistence)?
    }
}

#[async_trait]
impl WishRepository for PostgresWishRepository {
    async fn store(&self, wish: &Wish) -> WishRepositoryResult<()> {
        let wish_id = wish.id();
        let new_row = to_new_row(wish)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(wishes::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WishRepositoryError::DuplicateWish(wish_id)
                    }
                    _ => WishRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: WishId) -> WishRepositoryResult<Option<Wish>> {
        self.run_blocking(move |connection| {
            let row = wishes::table
                .filter(wishes::id.eq(id.into_inner()))
                .select(WishRow::as_select())
                .first::<WishRow>(connection)
                .optional()
                .map_err(WishRepositoryError::persistence)?;
            row.map(row_to_wish).transpose()
        })
        .await
    }

    async fn compare_and_swap(
        &self,
        expected: WriteCondition,
        replacement: &Wish,
    ) -> WishRepositoryResult<()> {
        if replacement.id() != expected.wish_id {
            return Err(WishRepositoryError::persistence(std::io::Error::other(
                format!(
                    "replacement wish {} does not match write target {}",
                    replacement.id(),
                    expected.wish_id
                ),
            )));
        }
        let changeset = to_changeset(replacement)?;
        let expected_revision = to_db_revision(expected.revision)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                wishes::table
                    .filter(wishes::id.eq(expected.wish_id.into_inner()))
                    .filter(wishes::status.eq(expected.status.as_str()))
                    .filter(wishes::revision.eq(expected_revision)),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(WishRepositoryError::persistence)?;

            if updated == 1 {
                return Ok(());
            }
            Err(explain_missed_write(
                connection,
                expected.wish_id,
                expected.status,
            )?)
        })
        .await
    }

    async fn append_review(&self, id: WishId, review: &Review) -> WishRepositoryResult<Wish> {
        let entry =
            serde_json::to_value([review]).map_err(WishRepositoryError::persistence)?;
        let reviewed_at = review.created_at();

        self.run_blocking(move |connection| {
            let statement = format!(
                "UPDATE wishes SET reviews = reviews || $1, updated_at = $2 \
                 WHERE id = $3 AND status = $4 RETURNING {WISH_COLUMNS}"
            );
            let row = diesel::sql_query(statement)
                .bind::<diesel::sql_types::Jsonb, _>(entry)
                .bind::<diesel::sql_types::Timestamptz, _>(reviewed_at)
                .bind::<diesel::sql_types::Uuid, _>(id.into_inner())
                .bind::<diesel::sql_types::Text, _>(WishStatus::Completed.as_str())
                .get_result::<WishRow>(connection)
                .optional()
                .map_err(WishRepositoryError::persistence)?;

            let Some(updated) = row else {
                return Err(explain_missed_write(
                    connection,
                    id,
                    WishStatus::Completed,
                )?);
            };
            row_to_wish(updated)
        })
        .await
    }

    async fn delete(&self, expected: WriteCondition) -> WishRepositoryResult<()> {
        let expected_revision = to_db_revision(expected.revision)?;

        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                wishes::table
                    .filter(wishes::id.eq(expected.wish_id.into_inner()))
                    .filter(wishes::status.eq(expected.status.as_str()))
                    .filter(wishes::revision.eq(expected_revision)),
            )
            .execute(connection)
            .map_err(WishRepositoryError::persistence)?;

            if deleted == 1 {
                return Ok(());
            }
            Err(explain_missed_write(
                connection,
                expected.wish_id,
                expected.status,
            )?)
        })
        .await
    }

    async fn search(&self, query: &WishQuery) -> WishRepositoryResult<WishPage> {
        let owned_query = query.clone();

        self.run_blocking(move |connection| {
            if owned_query.filter.proximity.is_some() {
                search_by_distance(connection, &owned_query)
            } else {
                search_by_recency(connection, &owned_query)
            }
        })
        .await
    }
}

/// Builds the attribute filters plus, for radius searches, a bounding-box
/// prefilter on the coordinate columns.
fn filtered(filter: &WishFilter) -> wishes::BoxedQuery<'static, Pg> {
    let mut query = wishes::table.into_boxed();
    if let Some(category) = filter.category {
        query = query.filter(wishes::category.eq(category.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(wishes::status.eq(status.as_str()));
    }
    if let Some(creator) = filter.creator {
        query = query.filter(wishes::creator_id.eq(creator.into_inner()));
    }
    if let Some(helper) = filter.helper {
        query = query.filter(wishes::helper_id.eq(helper.into_inner()));
    }
    if let Some(min) = filter.budget.min {
        query = query.filter(wishes::budget.ge(min));
    }
    if let Some(max) = filter.budget.max {
        query = query.filter(wishes::budget.le(max));
    }
    if let Some(proximity) = filter.proximity {
        let bounds = proximity.center.bounding_box(proximity.radius);
        query = query.filter(
            wishes::latitude.between(bounds.min_latitude, bounds.max_latitude),
        );
        if let Some((min_longitude, max_longitude)) = bounds.longitude_range {
            query = query.filter(wishes::longitude.between(min_longitude, max_longitude));
        }
    }
    query
}

fn search_by_recency(
    connection: &mut PgConnection,
    query: &WishQuery,
) -> WishRepositoryResult<WishPage> {
    let total = filtered(&query.filter)
        .count()
        .get_result::<i64>(connection)
        .map_err(WishRepositoryError::persistence)?;
    let offset = i64::try_from(query.page.offset()).map_err(WishRepositoryError::persistence)?;
    let limit = i64::from(query.page.limit());

    let rows = filtered(&query.filter)
        .order((wishes::created_at.desc(), wishes::id.asc()))
        .offset(offset)
        .limit(limit)
        .select(WishRow::as_select())
        .load::<WishRow>(connection)
        .map_err(WishRepositoryError::persistence)?;

    Ok(WishPage {
        wishes: rows
            .into_iter()
            .map(row_to_wish)
            .collect::<WishRepositoryResult<_>>()?,
        total: u64::try_from(total).map_err(WishRepositoryError::persistence)?,
    })
}

/// Loads bounding-box candidates, then applies the exact great-circle
/// radius and nearest-first ordering in process.
fn search_by_distance(
    connection: &mut PgConnection,
    query: &WishQuery,
) -> WishRepositoryResult<WishPage> {
    let Some(proximity) = query.filter.proximity else {
        return search_by_recency(connection, query);
    };
    let candidates = filtered(&query.filter)
        .select(WishRow::as_select())
        .load::<WishRow>(connection)
        .map_err(WishRepositoryError::persistence)?;
    let candidate_count = candidates.len();

    let wishes = candidates
        .into_iter()
        .map(row_to_wish)
        .collect::<WishRepositoryResult<Vec<_>>>()?;
    let mut ranked: Vec<_> = wishes
        .iter()
        .filter_map(|wish| {
            let distance = proximity.distance_within(wish.location().point())?;
            Some((distance, wish))
        })
        .collect();
    ranked.sort_by(|left, right| compare_nearest(*left, *right));
    debug!(
        candidates = candidate_count,
        matched = ranked.len(),
        "radius search filtered bounding-box candidates"
    );

    let total = total_of(ranked.len());
    let ordered: Vec<Wish> = ranked.into_iter().map(|(_, wish)| wish.clone()).collect();
    Ok(WishPage {
        wishes: page_of(ordered, query.page),
        total,
    })
}

/// Classifies a conditional write that matched no row.
fn explain_missed_write(
    connection: &mut PgConnection,
    wish_id: WishId,
    expected: WishStatus,
) -> WishRepositoryResult<WishRepositoryError> {
    let current = wishes::table
        .filter(wishes::id.eq(wish_id.into_inner()))
        .select(wishes::status)
        .first::<String>(connection)
        .optional()
        .map_err(WishRepositoryError::persistence)?;

    let Some(status) = current else {
        return Ok(WishRepositoryError::NotFound(wish_id));
    };
    let actual = WishStatus::try_from(status.as_str()).map_err(WishRepositoryError::persistence)?;
    Ok(WishRepositoryError::StatusConflict {
        wish_id,
        expected,
        actual,
    })
}
