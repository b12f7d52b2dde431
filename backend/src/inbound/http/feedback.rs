//! Student feedback HTTP handlers.
//!
//! ```text
//! GET    /api/feedback/faculties
//! GET    /api/feedback/status
//! GET    /api/feedback/my-feedbacks
//! POST   /api/feedback/submit
//! PUT    /api/feedback/update/{id}
//! DELETE /api/feedback/delete/{id}
//! ```
//!
//! Every endpoint requires a student bearer token. Bodies use the snake_case
//! field names the frontend already consumes.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::faculty::Faculty;
use crate::domain::ports::{
    FacultyFeedbackStatus, StudentFeedbackEntry, SubmitFeedbackRequest, UpdateFeedbackRequest,
};
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{map_directory_error, ApiResult};

/// Faculty record as listed to clients (creation timestamp omitted).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacultyBody {
    /// Faculty id.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Department.
    pub department: String,
    /// Contact address.
    pub email: String,
}

impl From<Faculty> for FacultyBody {
    fn from(value: Faculty) -> Self {
        Self {
            id: value.id,
            name: value.name,
            department: value.department,
            email: value.email,
        }
    }
}

/// Response for the faculty listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FacultiesBody {
    /// Always `true` on success.
    pub success: bool,
    /// Every faculty, ordered by name.
    pub faculties: Vec<FacultyBody>,
}

/// One faculty's submission status for the authenticated student.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusEntryBody {
    /// Faculty id.
    pub id: i32,
    /// Faculty name.
    pub name: String,
    /// Faculty department.
    pub department: String,
    /// Whether the student already submitted for this faculty.
    pub has_feedback: bool,
    /// The student's feedback id, when submitted.
    pub feedback_id: Option<i32>,
    /// The student's rating, when submitted.
    pub rating: Option<i16>,
    /// Submission timestamp, when submitted.
    pub feedback_date: Option<DateTime<Utc>>,
}

impl From<FacultyFeedbackStatus> for StatusEntryBody {
    fn from(value: FacultyFeedbackStatus) -> Self {
        Self {
            id: value.faculty_id,
            name: value.faculty_name,
            department: value.department,
            has_feedback: value.has_feedback,
            feedback_id: value.feedback_id,
            rating: value.rating,
            feedback_date: value.feedback_date,
        }
    }
}

/// Response for the per-faculty status listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusBody {
    /// Always `true` on success.
    pub success: bool,
    /// One entry per faculty, ordered by name.
    pub status: Vec<StatusEntryBody>,
}

/// One of the student's own submissions.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MyFeedbackBody {
    /// Feedback id.
    pub id: i32,
    /// Rated faculty.
    pub faculty_id: i32,
    /// Faculty name.
    pub faculty_name: String,
    /// Star rating.
    pub rating: i16,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<StudentFeedbackEntry> for MyFeedbackBody {
    fn from(value: StudentFeedbackEntry) -> Self {
        Self {
            id: value.id,
            faculty_id: value.faculty_id,
            faculty_name: value.faculty_name,
            rating: value.rating,
            created_at: value.created_at,
        }
    }
}

/// Response for the student's own submissions, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MyFeedbacksBody {
    /// Always `true` on success.
    pub success: bool,
    /// The student's submissions.
    pub feedbacks: Vec<MyFeedbackBody>,
}

/// Request body for submitting feedback. Fields are optional so the ledger
/// can report missing ones with the expected message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitFeedbackBody {
    /// Faculty to rate.
    pub faculty_id: Option<i32>,
    /// Star rating in 1..=5.
    pub rating: Option<i16>,
    /// Optional comments, at most 1000 characters.
    pub comments: Option<String>,
}

/// Response for a successful submission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmittedBody {
    /// Always `true` on success.
    pub success: bool,
    /// Confirmation message.
    pub message: String,
    /// Id of the new feedback row.
    pub feedback_id: i32,
}

/// Request body for amending an existing submission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AmendFeedbackBody {
    /// Replacement rating in 1..=5.
    pub rating: Option<i16>,
    /// Replacement comments.
    pub comments: Option<String>,
}

/// Plain confirmation envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    /// Always `true` on success.
    pub success: bool,
    /// Confirmation message.
    pub message: String,
}

/// List every faculty a student can rate.
#[utoipa::path(
    get,
    path = "/api/feedback/faculties",
    responses(
        (status = 200, description = "Faculties", body = FacultiesBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Students only", body = ErrorSchema)
    ),
    tags = ["feedback"],
    security(("BearerAuth" = []))
)]
#[get("/faculties")]
pub async fn list_faculties(
    state: web::Data<HttpState>,
    auth: AuthenticatedUser,
) -> ApiResult<web::Json<FacultiesBody>> {
    auth.require_student()?;
    let faculties = state
        .faculties
        .list_all()
        .await
        .map_err(map_directory_error)?;
    Ok(web::Json(FacultiesBody {
        success: true,
        faculties: faculties.into_iter().map(Into::into).collect(),
    }))
}

/// Per-faculty submission status for the authenticated student.
#[utoipa::path(
    get,
    path = "/api/feedback/status",
    responses(
        (status = 200, description = "Submission status", body = StatusBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Students only", body = ErrorSchema)
    ),
    tags = ["feedback"],
    security(("BearerAuth" = []))
)]
#[get("/status")]
pub async fn feedback_status(
    state: web::Data<HttpState>,
    auth: AuthenticatedUser,
) -> ApiResult<web::Json<StatusBody>> {
    let student = auth.require_student()?;
    let status = state.ledger.status_for_student(student).await?;
    Ok(web::Json(StatusBody {
        success: true,
        status: status.into_iter().map(Into::into).collect(),
    }))
}

/// The authenticated student's submissions, newest first.
#[utoipa::path(
    get,
    path = "/api/feedback/my-feedbacks",
    responses(
        (status = 200, description = "Own submissions", body = MyFeedbacksBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Students only", body = ErrorSchema)
    ),
    tags = ["feedback"],
    security(("BearerAuth" = []))
)]
#[get("/my-feedbacks")]
pub async fn my_feedbacks(
    state: web::Data<HttpState>,
    auth: AuthenticatedUser,
) -> ApiResult<web::Json<MyFeedbacksBody>> {
    let student = auth.require_student()?;
    let feedbacks = state.ledger.list_for_student(student).await?;
    Ok(web::Json(MyFeedbacksBody {
        success: true,
        feedbacks: feedbacks.into_iter().map(Into::into).collect(),
    }))
}

/// Submit feedback for a faculty (one submission per student per faculty).
#[utoipa::path(
    post,
    path = "/api/feedback/submit",
    request_body = SubmitFeedbackBody,
    responses(
        (status = 201, description = "Feedback created", body = SubmittedBody),
        (status = 400, description = "Invalid rating or comments", body = ErrorSchema),
        (status = 404, description = "Faculty not found", body = ErrorSchema),
        (status = 409, description = "Already submitted", body = ErrorSchema)
    ),
    tags = ["feedback"],
    security(("BearerAuth" = []))
)]
#[post("/submit")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    auth: AuthenticatedUser,
    payload: web::Json<SubmitFeedbackBody>,
) -> ApiResult<HttpResponse> {
    let student = auth.require_student()?;
    let payload = payload.into_inner();

    let feedback_id = state
        .ledger
        .submit(SubmitFeedbackRequest {
            student,
            faculty_id: payload.faculty_id,
            rating: payload.rating,
            comments: payload.comments,
        })
        .await?;

    Ok(HttpResponse::Created().json(SubmittedBody {
        success: true,
        message: "Feedback submitted successfully".to_owned(),
        feedback_id,
    }))
}

/// Amend an owned submission's rating or comments.
#[utoipa::path(
    put,
    path = "/api/feedback/update/{id}",
    request_body = AmendFeedbackBody,
    responses(
        (status = 200, description = "Feedback updated", body = MessageBody),
        (status = 400, description = "Invalid rating", body = ErrorSchema),
        (status = 404, description = "Not found or not owned", body = ErrorSchema)
    ),
    tags = ["feedback"],
    security(("BearerAuth" = []))
)]
#[put("/update/{id}")]
pub async fn update_feedback(
    state: web::Data<HttpState>,
    auth: AuthenticatedUser,
    path: web::Path<i32>,
    payload: web::Json<AmendFeedbackBody>,
) -> ApiResult<web::Json<MessageBody>> {
    let student = auth.require_student()?;
    let payload = payload.into_inner();

    state
        .ledger
        .update(UpdateFeedbackRequest {
            feedback_id: path.into_inner(),
            student,
            rating: payload.rating,
            comments: payload.comments,
        })
        .await?;

    Ok(web::Json(MessageBody {
        success: true,
        message: "Feedback updated successfully".to_owned(),
    }))
}

/// Delete an owned submission.
#[utoipa::path(
    delete,
    path = "/api/feedback/delete/{id}",
    responses(
        (status = 200, description = "Feedback deleted", body = MessageBody),
        (status = 404, description = "Not found or not owned", body = ErrorSchema)
    ),
    tags = ["feedback"],
    security(("BearerAuth" = []))
)]
#[delete("/delete/{id}")]
pub async fn delete_feedback(
    state: web::Data<HttpState>,
    auth: AuthenticatedUser,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageBody>> {
    let student = auth.require_student()?;
    state.ledger.delete(path.into_inner(), student).await?;
    Ok(web::Json(MessageBody {
        success: true,
        message: "Feedback deleted successfully".to_owned(),
    }))
}

#[cfg(test)]
#[path = "feedback_tests.rs"]
mod tests;
