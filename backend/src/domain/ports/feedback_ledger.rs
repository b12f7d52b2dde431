//! Driving port for the feedback ledger.
//!
//! Inbound adapters call these use-cases to submit, amend, and read a
//! student's feedback, plus the anonymized admin listing, without depending
//! on service or repository details.

use async_trait::async_trait;

use crate::domain::principal::UserId;
use crate::domain::Error;

use super::feedback_repository::{AnonymizedFeedback, FacultyFeedbackStatus, StudentFeedbackEntry};

/// Request to submit feedback. `faculty_id` and `rating` arrive as optional
/// raw values because their absence is a validation failure the ledger owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFeedbackRequest {
    /// Authenticated student.
    pub student: UserId,
    /// Faculty being rated.
    pub faculty_id: Option<i32>,
    /// Raw star rating.
    pub rating: Option<i16>,
    /// Optional free-text comments.
    pub comments: Option<String>,
}

/// Request to update an existing submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFeedbackRequest {
    /// Feedback row to amend.
    pub feedback_id: i32,
    /// Authenticated student; must own the row.
    pub student: UserId,
    /// Raw star rating.
    pub rating: Option<i16>,
    /// Optional free-text comments.
    pub comments: Option<String>,
}

/// Port for a student's feedback lifecycle and the anonymized read paths.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackLedger: Send + Sync {
    /// Submit feedback; returns the new row id.
    ///
    /// Fails with `invalid_request` for missing/out-of-range fields,
    /// `not_found` for an unknown faculty, and `conflict` for a duplicate
    /// (student, faculty) submission; the latter holds under concurrent
    /// invocation.
    async fn submit(&self, request: SubmitFeedbackRequest) -> Result<i32, Error>;

    /// Amend rating/comments of an owned submission.
    ///
    /// A row that does not exist and a row owned by someone else both fail
    /// with the same `not_found`.
    async fn update(&self, request: UpdateFeedbackRequest) -> Result<(), Error>;

    /// Delete an owned submission; same collapsed `not_found` semantics as
    /// [`FeedbackLedger::update`].
    async fn delete(&self, feedback_id: i32, student: UserId) -> Result<(), Error>;

    /// The student's submissions, newest first.
    async fn list_for_student(&self, student: UserId)
        -> Result<Vec<StudentFeedbackEntry>, Error>;

    /// Submission status across every faculty for this student.
    async fn status_for_student(
        &self,
        student: UserId,
    ) -> Result<Vec<FacultyFeedbackStatus>, Error>;

    /// Anonymized rows for admins, newest first, optionally filtered by
    /// faculty.
    async fn list_anonymized(
        &self,
        faculty_id: Option<i32>,
    ) -> Result<Vec<AnonymizedFeedback>, Error>;
}

/// Fixture ledger for handler tests that do not exercise feedback logic.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeedbackLedger;

#[async_trait]
impl FeedbackLedger for FixtureFeedbackLedger {
    async fn submit(&self, _request: SubmitFeedbackRequest) -> Result<i32, Error> {
        Ok(1)
    }

    async fn update(&self, request: UpdateFeedbackRequest) -> Result<(), Error> {
        Err(Error::not_found(format!(
            "feedback {} not found",
            request.feedback_id
        )))
    }

    async fn delete(&self, feedback_id: i32, _student: UserId) -> Result<(), Error> {
        Err(Error::not_found(format!("feedback {feedback_id} not found")))
    }

    async fn list_for_student(
        &self,
        _student: UserId,
    ) -> Result<Vec<StudentFeedbackEntry>, Error> {
        Ok(Vec::new())
    }

    async fn status_for_student(
        &self,
        _student: UserId,
    ) -> Result<Vec<FacultyFeedbackStatus>, Error> {
        Ok(Vec::new())
    }

    async fn list_anonymized(
        &self,
        _faculty_id: Option<i32>,
    ) -> Result<Vec<AnonymizedFeedback>, Error> {
        Ok(Vec::new())
    }
}
