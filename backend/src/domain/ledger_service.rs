//! Feedback ledger service.
//!
//! Owns the submission lifecycle: field validation, the duplicate-submission
//! conflict, and the collapsed not-found/not-owner semantics on update and
//! delete. Duplicate prevention rides on the storage-level uniqueness
//! constraint surfaced by [`FeedbackRepository::insert`], not a
//! check-then-insert sequence, so concurrent submissions cannot both
//! succeed.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::feedback::{Comments, Rating};
use crate::domain::ports::{
    AnonymizedFeedback, FacultyDirectory, FacultyDirectoryError, FacultyFeedbackStatus,
    FeedbackLedger, FeedbackRepository, FeedbackRepositoryError, NewFeedback,
    StudentFeedbackEntry, SubmitFeedbackRequest, UpdateFeedbackRequest,
};
use crate::domain::principal::UserId;
use crate::domain::Error;

fn map_repository_error(error: FeedbackRepositoryError) -> Error {
    match error {
        FeedbackRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("feedback store unavailable: {message}"))
        }
        FeedbackRepositoryError::Query { message } => {
            Error::internal(format!("feedback store error: {message}"))
        }
        FeedbackRepositoryError::DuplicateSubmission => {
            Error::conflict("You have already submitted feedback for this faculty")
        }
        FeedbackRepositoryError::FacultyMissing => Error::not_found("Faculty not found"),
    }
}

fn map_directory_error(error: FacultyDirectoryError) -> Error {
    match error {
        FacultyDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("faculty directory unavailable: {message}"))
        }
        FacultyDirectoryError::Query { message } => {
            Error::internal(format!("faculty directory error: {message}"))
        }
    }
}

fn parse_rating(raw: i16) -> Result<Rating, Error> {
    Rating::try_new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "rating",
            "value": raw,
            "code": "rating_out_of_range",
        }))
    })
}

fn parse_comments(raw: Option<String>) -> Result<Comments, Error> {
    Comments::try_new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "comments",
            "code": "comments_too_long",
        }))
    })
}

/// Ledger use-cases over a feedback repository and the faculty directory.
#[derive(Clone)]
pub struct LedgerService<R, D> {
    feedback_repo: Arc<R>,
    faculty_directory: Arc<D>,
}

impl<R, D> LedgerService<R, D> {
    /// Create a new ledger service.
    pub fn new(feedback_repo: Arc<R>, faculty_directory: Arc<D>) -> Self {
        Self {
            feedback_repo,
            faculty_directory,
        }
    }
}

#[async_trait]
impl<R, D> FeedbackLedger for LedgerService<R, D>
where
    R: FeedbackRepository,
    D: FacultyDirectory,
{
    async fn submit(&self, request: SubmitFeedbackRequest) -> Result<i32, Error> {
        let (Some(faculty_id), Some(raw_rating)) = (request.faculty_id, request.rating) else {
            return Err(
                Error::invalid_request("Faculty ID and rating are required").with_details(json!({
                    "code": "missing_field",
                })),
            );
        };
        let rating = parse_rating(raw_rating)?;
        let comments = parse_comments(request.comments)?;

        // The explicit lookup gives unknown faculties a 404 before any write;
        // a faculty deleted between this check and the insert still surfaces
        // as FacultyMissing from the FK constraint.
        self.faculty_directory
            .find_by_id(faculty_id)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| Error::not_found("Faculty not found"))?;

        let feedback = NewFeedback {
            user_id: request.student,
            faculty_id,
            rating,
            comments,
        };
        self.feedback_repo
            .insert(&feedback)
            .await
            .map_err(map_repository_error)
    }

    async fn update(&self, request: UpdateFeedbackRequest) -> Result<(), Error> {
        let raw_rating = request.rating.ok_or_else(|| {
            Error::invalid_request("Rating is required").with_details(json!({
                "field": "rating",
                "code": "missing_field",
            }))
        })?;
        let rating = parse_rating(raw_rating)?;
        let comments = parse_comments(request.comments)?;

        let updated = self
            .feedback_repo
            .update_owned(request.feedback_id, request.student, rating, &comments)
            .await
            .map_err(map_repository_error)?;
        if updated {
            Ok(())
        } else {
            Err(Error::not_found("Feedback not found"))
        }
    }

    async fn delete(&self, feedback_id: i32, student: UserId) -> Result<(), Error> {
        let deleted = self
            .feedback_repo
            .delete_owned(feedback_id, student)
            .await
            .map_err(map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found("Feedback not found"))
        }
    }

    async fn list_for_student(
        &self,
        student: UserId,
    ) -> Result<Vec<StudentFeedbackEntry>, Error> {
        self.feedback_repo
            .list_for_student(student)
            .await
            .map_err(map_repository_error)
    }

    async fn status_for_student(
        &self,
        student: UserId,
    ) -> Result<Vec<FacultyFeedbackStatus>, Error> {
        self.feedback_repo
            .status_for_student(student)
            .await
            .map_err(map_repository_error)
    }

    async fn list_anonymized(
        &self,
        faculty_id: Option<i32>,
    ) -> Result<Vec<AnonymizedFeedback>, Error> {
        self.feedback_repo
            .list_anonymized(faculty_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "ledger_service_tests.rs"]
mod tests;
