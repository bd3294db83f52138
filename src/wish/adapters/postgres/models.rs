//! Diesel row models for wish persistence.

use super::schema::{helper_applications, wishes};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for wish records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = wishes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WishRow {
    /// Wish identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Title.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub title: String,
    /// Description.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub description: String,
    /// Category tag.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub category: String,
    /// Creator identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub creator_id: uuid::Uuid,
    /// Helper identifier.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub helper_id: Option<uuid::Uuid>,
    /// Lifecycle status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Budget.
    #[diesel(sql_type = diesel::sql_types::Float8)]
    pub budget: f64,
    /// Longitude.
    #[diesel(sql_type = diesel::sql_types::Float8)]
    pub longitude: f64,
    /// Latitude.
    #[diesel(sql_type = diesel::sql_types::Float8)]
    pub latitude: f64,
    /// Address.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub address: String,
    /// Deadline.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub deadline: DateTime<Utc>,
    /// Visibility flag.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub is_public: bool,
    /// Tags as a JSON array of strings.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub tags: Value,
    /// Media references as a JSON array.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub media: Value,
    /// Reviews as a JSON array, oldest first.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub reviews: Value,
    /// Write revision.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub revision: i64,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for wish records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = wishes)]
pub struct NewWishRow {
    /// Wish identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Category tag.
    pub category: String,
    /// Creator identifier.
    pub creator_id: uuid::Uuid,
    /// Helper identifier.
    pub helper_id: Option<uuid::Uuid>,
    /// Lifecycle status.
    pub status: String,
    /// Budget.
    pub budget: f64,
    /// Longitude.
    pub longitude: f64,
    /// Latitude.
    pub latitude: f64,
    /// Address.
    pub address: String,
    /// Deadline.
    pub deadline: DateTime<Utc>,
    /// Visibility flag.
    pub is_public: bool,
    /// Tags.
    pub tags: Value,
    /// Media references.
    pub media: Value,
    /// Reviews.
    pub reviews: Value,
    /// Write revision.
    pub revision: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model for conditional writes.
///
/// Omits the identifier, creator, reviews, and creation time: those columns
/// never change through a replacement write.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = wishes)]
#[diesel(treat_none_as_null = true)]
pub struct WishChangeset {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Category tag.
    pub category: String,
    /// Helper identifier.
    pub helper_id: Option<uuid::Uuid>,
    /// Lifecycle status.
    pub status: String,
    /// Budget.
    pub budget: f64,
    /// Longitude.
    pub longitude: f64,
    /// Latitude.
    pub latitude: f64,
    /// Address.
    pub address: String,
    /// Deadline.
    pub deadline: DateTime<Utc>,
    /// Visibility flag.
    pub is_public: bool,
    /// Tags.
    pub tags: Value,
    /// Media references.
    pub media: Value,
    /// Write revision.
    pub revision: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row model for helper applications, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = helper_applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ApplicationRow {
    /// Wish applied to.
    pub wish_id: uuid::Uuid,
    /// Applying account.
    pub applicant_id: uuid::Uuid,
    /// Application timestamp.
    pub applied_at: DateTime<Utc>,
}
