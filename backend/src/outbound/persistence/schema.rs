//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. Every user can act as a provider.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        name -> Varchar,
        /// Lower-cased address; unique.
        email -> Varchar,
        /// Argon2 PHC string.
        password -> Varchar,
        /// Stored avatar filename inside the uploads directory.
        avatar -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Booked appointments. `(provider_id, date)` is unique.
    appointments (id) {
        id -> Uuid,
        provider_id -> Uuid,
        user_id -> Uuid,
        /// Start of the booked hour, UTC.
        date -> Timestamptz,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Messages addressed to providers.
    notifications (id) {
        id -> Uuid,
        recipient_id -> Uuid,
        content -> Text,
        read -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Single-use password reset tokens.
    user_tokens (id) {
        id -> Uuid,
        /// Opaque value mailed to the user.
        token -> Uuid,
        user_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(appointments -> users (provider_id));
diesel::joinable!(notifications -> users (recipient_id));
diesel::joinable!(user_tokens -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(appointments, notifications, user_tokens, users);
