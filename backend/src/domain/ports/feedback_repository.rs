//! Driven port for feedback row storage.
//!
//! Adapters provide durable storage for feedback with three guarantees the
//! ledger relies on:
//!
//! - the one-submission-per-(student, faculty) invariant is enforced at the
//!   storage layer, so a duplicate insert fails atomically even under
//!   concurrent submissions;
//! - updates and deletes bind both the row id and the owning student in one
//!   predicate, so "not found" and "not yours" are indistinguishable;
//! - admin-facing projections never carry the submitting student's id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::feedback::{Comments, Rating};
use crate::domain::principal::UserId;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by feedback repository adapters.
    pub enum FeedbackRepositoryError {
        /// Storage connection could not be established.
        Connection { message: String } =>
            "feedback store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "feedback store query failed: {message}",
        /// A feedback row already exists for this (student, faculty) pair.
        DuplicateSubmission =>
            "feedback already submitted for this faculty",
        /// The referenced faculty does not exist.
        FacultyMissing =>
            "referenced faculty does not exist",
    }
}

/// Fields required to insert a feedback row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    /// Submitting student.
    pub user_id: UserId,
    /// Rated faculty member.
    pub faculty_id: i32,
    /// Validated star rating.
    pub rating: Rating,
    /// Validated comments, possibly empty.
    pub comments: Comments,
}

/// One row of a student's own submission history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFeedbackEntry {
    /// Feedback row id.
    pub id: i32,
    /// Rated faculty member.
    pub faculty_id: i32,
    /// Faculty display name, joined for convenience.
    pub faculty_name: String,
    /// Star rating.
    pub rating: i16,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

/// Per-faculty submission status for one student (left-join projection:
/// every faculty appears exactly once regardless of submission state).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyFeedbackStatus {
    /// Faculty id.
    pub faculty_id: i32,
    /// Faculty display name.
    pub faculty_name: String,
    /// Faculty department.
    pub department: String,
    /// Whether this student has already submitted for this faculty.
    pub has_feedback: bool,
    /// The student's feedback row id, when present.
    pub feedback_id: Option<i32>,
    /// The student's rating, when present.
    pub rating: Option<i16>,
    /// The student's submission timestamp, when present.
    pub feedback_date: Option<DateTime<Utc>>,
}

/// Admin-facing feedback projection. Carries no student-identifying field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymizedFeedback {
    /// Feedback row id.
    pub id: i32,
    /// Rated faculty member.
    pub faculty_id: i32,
    /// Faculty name; only populated on the unfiltered listing.
    pub faculty_name: Option<String>,
    /// Faculty department; only populated on the unfiltered listing.
    pub department: Option<String>,
    /// Star rating.
    pub rating: i16,
    /// Free-text comments.
    pub comments: String,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

/// Port for feedback row storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Insert a new feedback row and return its id.
    ///
    /// The duplicate check is the storage-level uniqueness constraint on
    /// `(user_id, faculty_id)`; its violation surfaces as
    /// [`FeedbackRepositoryError::DuplicateSubmission`]. A missing faculty
    /// surfaces as [`FeedbackRepositoryError::FacultyMissing`].
    async fn insert(&self, feedback: &NewFeedback) -> Result<i32, FeedbackRepositoryError>;

    /// Update rating and comments of the row matching
    /// `(id = feedback_id AND user_id = owner)`.
    ///
    /// Returns `Ok(false)` when no row matched; callers must not
    /// disambiguate missing from not-owned.
    async fn update_owned(
        &self,
        feedback_id: i32,
        owner: UserId,
        rating: Rating,
        comments: &Comments,
    ) -> Result<bool, FeedbackRepositoryError>;

    /// Delete the row matching `(id = feedback_id AND user_id = owner)`.
    ///
    /// Returns `Ok(false)` when no row matched.
    async fn delete_owned(
        &self,
        feedback_id: i32,
        owner: UserId,
    ) -> Result<bool, FeedbackRepositoryError>;

    /// The student's own submissions, newest first.
    async fn list_for_student(
        &self,
        student: UserId,
    ) -> Result<Vec<StudentFeedbackEntry>, FeedbackRepositoryError>;

    /// Submission status across every faculty for one student, ordered by
    /// faculty name.
    async fn status_for_student(
        &self,
        student: UserId,
    ) -> Result<Vec<FacultyFeedbackStatus>, FeedbackRepositoryError>;

    /// Anonymized feedback rows, newest first; optionally filtered to one
    /// faculty. Never includes `user_id`.
    async fn list_anonymized(
        &self,
        faculty_id: Option<i32>,
    ) -> Result<Vec<AnonymizedFeedback>, FeedbackRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Lookups return empty results; mutations succeed without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeedbackRepository;

#[async_trait]
impl FeedbackRepository for FixtureFeedbackRepository {
    async fn insert(&self, _feedback: &NewFeedback) -> Result<i32, FeedbackRepositoryError> {
        Ok(1)
    }

    async fn update_owned(
        &self,
        _feedback_id: i32,
        _owner: UserId,
        _rating: Rating,
        _comments: &Comments,
    ) -> Result<bool, FeedbackRepositoryError> {
        Ok(false)
    }

    async fn delete_owned(
        &self,
        _feedback_id: i32,
        _owner: UserId,
    ) -> Result<bool, FeedbackRepositoryError> {
        Ok(false)
    }

    async fn list_for_student(
        &self,
        _student: UserId,
    ) -> Result<Vec<StudentFeedbackEntry>, FeedbackRepositoryError> {
        Ok(Vec::new())
    }

    async fn status_for_student(
        &self,
        _student: UserId,
    ) -> Result<Vec<FacultyFeedbackStatus>, FeedbackRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_anonymized(
        &self,
        _faculty_id: Option<i32>,
    ) -> Result<Vec<AnonymizedFeedback>, FeedbackRepositoryError> {
        Ok(Vec::new())
    }
}
