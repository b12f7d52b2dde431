//! PostgreSQL-backed `FeedbackRepository` using Diesel.
//!
//! Duplicate prevention is the `UNIQUE (user_id, faculty_id)` constraint:
//! the insert and the duplicate check are one atomic statement, so two
//! concurrent submissions for the same pair cannot both succeed. Updates and
//! deletes bind row id and owner in a single predicate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::feedback::{Comments, Rating};
use crate::domain::ports::{
    AnonymizedFeedback, FacultyFeedbackStatus, FeedbackRepository, FeedbackRepositoryError,
    NewFeedback, StudentFeedbackEntry,
};
use crate::domain::principal::UserId;

use super::error_map::{classify_diesel_error, classify_pool_error, StorageErrorKind};
use super::models::{FeedbackChangeset, NewFeedbackRow};
use super::pool::DbPool;
use super::schema::{faculties, feedbacks};

/// Diesel implementation of the `FeedbackRepository` port.
#[derive(Clone)]
pub struct DieselFeedbackRepository {
    pool: DbPool,
}

impl DieselFeedbackRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(kind: StorageErrorKind) -> FeedbackRepositoryError {
    match kind {
        StorageErrorKind::Connection(message) => FeedbackRepositoryError::connection(message),
        StorageErrorKind::Query(message) => FeedbackRepositoryError::query(message),
        unique @ StorageErrorKind::UniqueViolation { .. } => {
            if unique.constraint_contains("user_id_faculty_id") {
                FeedbackRepositoryError::duplicate_submission()
            } else {
                FeedbackRepositoryError::query("unexpected uniqueness violation")
            }
        }
        fk @ StorageErrorKind::ForeignKeyViolation { .. } => {
            if fk.constraint_contains("faculty_id") {
                FeedbackRepositoryError::faculty_missing()
            } else {
                FeedbackRepositoryError::query("foreign key violation")
            }
        }
    }
}

fn map_pool(error: super::pool::PoolError) -> FeedbackRepositoryError {
    map_error(classify_pool_error(error))
}

fn map_diesel(error: diesel::result::Error) -> FeedbackRepositoryError {
    map_error(classify_diesel_error(error))
}

#[async_trait]
impl FeedbackRepository for DieselFeedbackRepository {
    async fn insert(&self, feedback: &NewFeedback) -> Result<i32, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = NewFeedbackRow {
            user_id: feedback.user_id.get(),
            faculty_id: feedback.faculty_id,
            rating: feedback.rating.get(),
            comments: feedback.comments.as_str(),
        };
        diesel::insert_into(feedbacks::table)
            .values(&row)
            .returning(feedbacks::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)
    }

    async fn update_owned(
        &self,
        feedback_id: i32,
        owner: UserId,
        rating: Rating,
        comments: &Comments,
    ) -> Result<bool, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let updated = diesel::update(
            feedbacks::table.filter(
                feedbacks::id
                    .eq(feedback_id)
                    .and(feedbacks::user_id.eq(owner.get())),
            ),
        )
        .set(&FeedbackChangeset {
            rating: rating.get(),
            comments: comments.as_str(),
        })
        .execute(&mut conn)
        .await
        .map_err(map_diesel)?;

        Ok(updated > 0)
    }

    async fn delete_owned(
        &self,
        feedback_id: i32,
        owner: UserId,
    ) -> Result<bool, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(
            feedbacks::table.filter(
                feedbacks::id
                    .eq(feedback_id)
                    .and(feedbacks::user_id.eq(owner.get())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel)?;

        Ok(deleted > 0)
    }

    async fn list_for_student(
        &self,
        student: UserId,
    ) -> Result<Vec<StudentFeedbackEntry>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<(i32, i32, String, i16, DateTime<Utc>)> = feedbacks::table
            .inner_join(faculties::table)
            .filter(feedbacks::user_id.eq(student.get()))
            .select((
                feedbacks::id,
                feedbacks::faculty_id,
                faculties::name,
                feedbacks::rating,
                feedbacks::created_at,
            ))
            .order_by(feedbacks::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows
            .into_iter()
            .map(
                |(id, faculty_id, faculty_name, rating, created_at)| StudentFeedbackEntry {
                    id,
                    faculty_id,
                    faculty_name,
                    rating,
                    created_at,
                },
            )
            .collect())
    }

    async fn status_for_student(
        &self,
        student: UserId,
    ) -> Result<Vec<FacultyFeedbackStatus>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Left join restricted to this student's rows, so every faculty
        // appears exactly once regardless of submission state.
        let rows: Vec<(i32, String, String, Option<i32>, Option<i16>, Option<DateTime<Utc>>)> =
            faculties::table
                .left_join(
                    feedbacks::table.on(feedbacks::faculty_id
                        .eq(faculties::id)
                        .and(feedbacks::user_id.eq(student.get()))),
                )
                .select((
                    faculties::id,
                    faculties::name,
                    faculties::department,
                    feedbacks::id.nullable(),
                    feedbacks::rating.nullable(),
                    feedbacks::created_at.nullable(),
                ))
                .order_by(faculties::name.asc())
                .load(&mut conn)
                .await
                .map_err(map_diesel)?;

        Ok(rows
            .into_iter()
            .map(
                |(faculty_id, faculty_name, department, feedback_id, rating, feedback_date)| {
                    FacultyFeedbackStatus {
                        faculty_id,
                        faculty_name,
                        department,
                        has_feedback: feedback_id.is_some(),
                        feedback_id,
                        rating,
                        feedback_date,
                    }
                },
            )
            .collect())
    }

    async fn list_anonymized(
        &self,
        faculty_id: Option<i32>,
    ) -> Result<Vec<AnonymizedFeedback>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Neither select lists user_id.
        match faculty_id {
            Some(faculty_id) => {
                let rows: Vec<(i32, i32, i16, String, DateTime<Utc>)> = feedbacks::table
                    .filter(feedbacks::faculty_id.eq(faculty_id))
                    .select((
                        feedbacks::id,
                        feedbacks::faculty_id,
                        feedbacks::rating,
                        feedbacks::comments,
                        feedbacks::created_at,
                    ))
                    .order_by(feedbacks::created_at.desc())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel)?;

                Ok(rows
                    .into_iter()
                    .map(|(id, faculty_id, rating, comments, created_at)| AnonymizedFeedback {
                        id,
                        faculty_id,
                        faculty_name: None,
                        department: None,
                        rating,
                        comments,
                        created_at,
                    })
                    .collect())
            }
            None => {
                let rows: Vec<(i32, i32, String, String, i16, String, DateTime<Utc>)> =
                    feedbacks::table
                        .inner_join(faculties::table)
                        .select((
                            feedbacks::id,
                            feedbacks::faculty_id,
                            faculties::name,
                            faculties::department,
                            feedbacks::rating,
                            feedbacks::comments,
                            feedbacks::created_at,
                        ))
                        .order_by(feedbacks::created_at.desc())
                        .load(&mut conn)
                        .await
                        .map_err(map_diesel)?;

                Ok(rows
                    .into_iter()
                    .map(
                        |(id, faculty_id, name, department, rating, comments, created_at)| {
                            AnonymizedFeedback {
                                id,
                                faculty_id,
                                faculty_name: Some(name),
                                department: Some(department),
                                rating,
                                comments,
                                created_at,
                            }
                        },
                    )
                    .collect())
            }
        }
    }
}
