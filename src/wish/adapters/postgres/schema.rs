//! Diesel schema for wish persistence.

diesel::table! {
    /// Wish records with lifecycle state, location, and embedded documents.
    wishes (id) {
        /// Wish identifier.
        id -> Uuid,
        /// Trimmed title.
        title -> Text,
        /// Trimmed description.
        description -> Text,
        /// Category tag.
        #[max_length = 32]
        category -> Varchar,
        /// Creator account identifier.
        creator_id -> Uuid,
        /// Accepted helper, set once the wish is in progress.
        helper_id -> Nullable<Uuid>,
        /// Lifecycle status.
        #[max_length = 32]
        status -> Varchar,
        /// Offered budget.
        budget -> Float8,
        /// Longitude in degrees.
        longitude -> Float8,
        /// Latitude in degrees.
        latitude -> Float8,
        /// Human-readable address.
        address -> Text,
        /// Deadline.
        deadline -> Timestamptz,
        /// Visibility flag.
        is_public -> Bool,
        /// Tag array.
        tags -> Jsonb,
        /// Attached media references.
        media -> Jsonb,
        /// Append-only review journal.
        reviews -> Jsonb,
        /// Write revision used for conditional updates.
        revision -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Helper applications, one per applicant and wish.
    helper_applications (wish_id, applicant_id) {
        /// Wish applied to.
        wish_id -> Uuid,
        /// Applying account.
        applicant_id -> Uuid,
        /// Application timestamp.
        applied_at -> Timestamptz,
    }
}
