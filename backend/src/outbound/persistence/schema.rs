//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; regenerate with
//! `diesel print-schema` after changing them.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Primary key.
        id -> Int4,
        /// Unique login address.
        email -> Varchar,
        /// Hex-encoded SHA-256 digest of the password.
        password_digest -> Varchar,
        /// Unique campus identifier.
        institutional_id -> Varchar,
        /// Display name.
        name -> Varchar,
        /// Authorization role: `student` or `admin`.
        role -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Rateable faculty members, managed by the admin tooling.
    faculties (id) {
        /// Primary key.
        id -> Int4,
        /// Display name.
        name -> Varchar,
        /// Department.
        department -> Varchar,
        /// Contact address.
        email -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Student feedback; unique per (user_id, faculty_id).
    feedbacks (id) {
        /// Primary key.
        id -> Int4,
        /// Submitting student.
        user_id -> Int4,
        /// Rated faculty member.
        faculty_id -> Int4,
        /// Star rating, constrained to 1..=5.
        rating -> Int2,
        /// Free-text comments, possibly empty.
        comments -> Text,
        /// Submission timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Issued bearer sessions, stored by token digest only.
    auth_sessions (token_digest) {
        /// Hex-encoded SHA-256 digest of the bearer token.
        token_digest -> Varchar,
        /// Owning account.
        user_id -> Int4,
        /// Expiry instant; the session is dead afterwards.
        expires_at -> Timestamptz,
        /// Issue timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(feedbacks -> faculties (faculty_id));
diesel::joinable!(feedbacks -> users (user_id));
diesel::joinable!(auth_sessions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, faculties, feedbacks, auth_sessions);
