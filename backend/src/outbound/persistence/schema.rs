//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int8,
        /// Unique login name (`users_username_key`).
        username -> Varchar,
        /// Unique contact address (`users_email_key`).
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Stored calculations. Operands and result are `NUMERIC(10, 2)`.
    calculations (id) {
        id -> Int8,
        a -> Numeric,
        b -> Numeric,
        /// Operation tag, constrained by `calculations_type_check`.
        #[sql_name = "type"]
        operation_type -> Varchar,
        result -> Numeric,
        created_at -> Timestamptz,
        user_id -> Nullable<Int8>,
    }
}

diesel::joinable!(calculations -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(calculations, users);
