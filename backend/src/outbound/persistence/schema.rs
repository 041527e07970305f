//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// User accounts.
    ///
    /// `username` and `email` carry unique constraints named
    /// `users_username_key` and `users_email_key`; the repository relies on
    /// those names to classify duplicate-key violations.
    users (id) {
        /// Primary key: UUID v4, assigned by the application.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Unique email address.
        email -> Varchar,
        /// Argon2id PHC hash of the password.
        password_hash -> Text,
        /// Account role: `Admin` or `User`.
        role -> Varchar,
        /// First name.
        first_name -> Varchar,
        /// Last name.
        last_name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Inventory items.
    items (id) {
        /// Primary key: UUID v4, assigned by the application.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Non-negative stock count.
        quantity -> Int8,
        /// Non-negative fixed-point price, NUMERIC(10, 2).
        price -> Numeric,
        /// Record creation timestamp, set once.
        created_at -> Timestamptz,
        /// Last-mutation timestamp, refreshed on every update.
        updated_at -> Timestamptz,
    }
}
