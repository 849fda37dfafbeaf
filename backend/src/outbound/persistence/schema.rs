//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Early-access signups. `email` carries a unique index and holds the
    /// normalized address.
    early_access_users (id) {
        id -> Uuid,
        #[max_length = 100]
        full_name -> Varchar,
        #[max_length = 100]
        country -> Varchar,
        #[max_length = 254]
        email -> Varchar,
        #[max_length = 16]
        user_type -> Varchar,
        /// Set only for idea owners.
        #[max_length = 100]
        idea_category -> Nullable<Varchar>,
        #[max_length = 500]
        message -> Varchar,
        created_at -> Timestamptz,
    }
}
