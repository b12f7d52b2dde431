//! Diesel row types and changesets.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::outbound::persistence::schema::{auth_sessions, faculties, feedbacks, users};

/// Queryable row for faculty records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = faculties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FacultyRow {
    pub id: i32,
    pub name: String,
    pub department: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Queryable row for user accounts, including the password digest.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub email: String,
    pub password_digest: String,
    pub institutional_id: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable user account; `created_at` comes from the column default.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_digest: &'a str,
    pub institutional_id: &'a str,
    pub name: &'a str,
    pub role: &'a str,
}

/// Insertable feedback row; `created_at` comes from the column default.
#[derive(Debug, Insertable)]
#[diesel(table_name = feedbacks)]
pub(crate) struct NewFeedbackRow<'a> {
    pub user_id: i32,
    pub faculty_id: i32,
    pub rating: i16,
    pub comments: &'a str,
}

/// Changeset for the owner-scoped feedback update.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = feedbacks)]
pub(crate) struct FeedbackChangeset<'a> {
    pub rating: i16,
    pub comments: &'a str,
}

/// Insertable bearer session.
#[derive(Debug, Insertable)]
#[diesel(table_name = auth_sessions)]
pub(crate) struct NewSessionRow<'a> {
    pub token_digest: &'a str,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
}
