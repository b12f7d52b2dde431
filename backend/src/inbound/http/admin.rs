//! Admin HTTP handlers: anonymized feedback views and analytics.
//!
//! ```text
//! GET /api/admin/feedback
//! GET /api/admin/feedback/faculty/{faculty_id}
//! GET /api/admin/statistics/faculty/{faculty_id}
//! GET /api/admin/analytics/top-bottom-faculty
//! GET /api/admin/analytics/rating-distribution
//! GET /api/admin/faculties
//! ```
//!
//! Every response here is an anonymized projection: no body ever carries a
//! `user_id` or any other student-identifying field.

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::faculty::Faculty;
use crate::domain::ports::{
    AnonymizedFeedback, FacultyStatistics, RankedFaculty, RatingDistribution,
};
use crate::domain::Error;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::feedback::{FacultiesBody, FacultyBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{map_directory_error, ApiResult};

/// Number of entries in each of the top/bottom ranking lists.
const RANKING_SIZE: usize = 3;

/// One anonymized feedback row. Faculty name and department appear only on
/// the unfiltered listing, as on the faculty-scoped view they would repeat
/// the enclosing `faculty` object.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminFeedbackBody {
    /// Feedback id.
    pub id: i32,
    /// Rated faculty.
    pub faculty_id: i32,
    /// Faculty name (unfiltered listing only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_name: Option<String>,
    /// Faculty department (unfiltered listing only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Star rating.
    pub rating: i16,
    /// Free-text comments, possibly empty.
    pub comments: String,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<AnonymizedFeedback> for AdminFeedbackBody {
    fn from(value: AnonymizedFeedback) -> Self {
        Self {
            id: value.id,
            faculty_id: value.faculty_id,
            faculty_name: value.faculty_name,
            department: value.department,
            rating: value.rating,
            comments: value.comments,
            created_at: value.created_at,
        }
    }
}

/// Response for the unfiltered anonymized listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminFeedbacksBody {
    /// Always `true` on success.
    pub success: bool,
    /// Anonymized feedback rows, newest first.
    pub feedbacks: Vec<AdminFeedbackBody>,
}

/// Response for the faculty-scoped anonymized listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FacultyFeedbacksBody {
    /// Always `true` on success.
    pub success: bool,
    /// The faculty the rows belong to.
    pub faculty: FacultyBody,
    /// Anonymized feedback rows, newest first.
    pub feedbacks: Vec<AdminFeedbackBody>,
}

/// Faculty reference embedded in the statistics response (no email).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FacultySummaryBody {
    /// Faculty id.
    pub id: i32,
    /// Faculty name.
    pub name: String,
    /// Faculty department.
    pub department: String,
}

/// Statistics payload with the zero-default policy applied.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatisticsBody {
    /// Number of feedback rows.
    pub total_feedbacks: i64,
    /// Mean rating rounded to two decimals; `0` with no feedback.
    pub average_rating: f64,
    /// Lowest rating; `0` with no feedback.
    pub min_rating: i16,
    /// Highest rating; `0` with no feedback.
    pub max_rating: i16,
}

impl From<FacultyStatistics> for StatisticsBody {
    fn from(value: FacultyStatistics) -> Self {
        Self {
            total_feedbacks: value.total_feedbacks,
            average_rating: value.average_rating,
            min_rating: value.min_rating,
            max_rating: value.max_rating,
        }
    }
}

/// Response for the per-faculty statistics view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FacultyStatisticsBody {
    /// Always `true` on success.
    pub success: bool,
    /// The faculty the statistics belong to.
    pub faculty: FacultySummaryBody,
    /// Aggregated statistics.
    pub statistics: StatisticsBody,
}

/// One ranking entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RankedFacultyBody {
    /// Faculty id.
    pub faculty_id: i32,
    /// Faculty name.
    pub faculty_name: String,
    /// Faculty department.
    pub department: String,
    /// Mean rating rounded to two decimals.
    pub average_rating: f64,
    /// Number of feedback rows behind the average.
    pub total_feedbacks: i64,
}

impl From<RankedFaculty> for RankedFacultyBody {
    fn from(value: RankedFaculty) -> Self {
        Self {
            faculty_id: value.faculty_id,
            faculty_name: value.faculty_name,
            department: value.department,
            average_rating: value.average_rating,
            total_feedbacks: value.total_feedbacks,
        }
    }
}

/// Response for the top/bottom ranking.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopBottomBody {
    /// Always `true` on success.
    pub success: bool,
    /// Best performers, highest average first.
    pub top: Vec<RankedFacultyBody>,
    /// Worst performers, lowest average first.
    pub bottom: Vec<RankedFacultyBody>,
}

/// Response for the rating histogram.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DistributionBody {
    /// Always `true` on success.
    pub success: bool,
    /// Count per rating value; keys 1 through 5 are always present.
    #[schema(value_type = std::collections::BTreeMap<String, i64>)]
    pub distribution: RatingDistribution,
}

async fn require_faculty(state: &HttpState, faculty_id: i32) -> Result<Faculty, Error> {
    state
        .faculties
        .find_by_id(faculty_id)
        .await
        .map_err(map_directory_error)?
        .ok_or_else(|| Error::not_found("Faculty not found"))
}

/// All anonymized feedback, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/feedback",
    responses(
        (status = 200, description = "Anonymized feedback", body = AdminFeedbacksBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Admins only", body = ErrorSchema)
    ),
    tags = ["admin"],
    security(("BearerAuth" = []))
)]
#[get("/feedback")]
pub async fn all_feedback(
    state: web::Data<HttpState>,
    auth: AuthenticatedUser,
) -> ApiResult<web::Json<AdminFeedbacksBody>> {
    auth.require_admin()?;
    let feedbacks = state.ledger.list_anonymized(None).await?;
    Ok(web::Json(AdminFeedbacksBody {
        success: true,
        feedbacks: feedbacks.into_iter().map(Into::into).collect(),
    }))
}

/// Anonymized feedback for one faculty.
#[utoipa::path(
    get,
    path = "/api/admin/feedback/faculty/{faculty_id}",
    responses(
        (status = 200, description = "Anonymized feedback for the faculty", body = FacultyFeedbacksBody),
        (status = 404, description = "Faculty not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    security(("BearerAuth" = []))
)]
#[get("/feedback/faculty/{faculty_id}")]
pub async fn feedback_by_faculty(
    state: web::Data<HttpState>,
    auth: AuthenticatedUser,
    path: web::Path<i32>,
) -> ApiResult<web::Json<FacultyFeedbacksBody>> {
    auth.require_admin()?;
    let faculty_id = path.into_inner();
    let faculty = require_faculty(&state, faculty_id).await?;
    let feedbacks = state.ledger.list_anonymized(Some(faculty_id)).await?;
    Ok(web::Json(FacultyFeedbacksBody {
        success: true,
        faculty: faculty.into(),
        feedbacks: feedbacks.into_iter().map(Into::into).collect(),
    }))
}

/// Aggregated statistics for one faculty.
#[utoipa::path(
    get,
    path = "/api/admin/statistics/faculty/{faculty_id}",
    responses(
        (status = 200, description = "Faculty statistics", body = FacultyStatisticsBody),
        (status = 404, description = "Faculty not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    security(("BearerAuth" = []))
)]
#[get("/statistics/faculty/{faculty_id}")]
pub async fn statistics_by_faculty(
    state: web::Data<HttpState>,
    auth: AuthenticatedUser,
    path: web::Path<i32>,
) -> ApiResult<web::Json<FacultyStatisticsBody>> {
    auth.require_admin()?;
    let faculty_id = path.into_inner();
    let faculty = require_faculty(&state, faculty_id).await?;
    let statistics = state.analytics.statistics_for(faculty_id).await?;
    Ok(web::Json(FacultyStatisticsBody {
        success: true,
        faculty: FacultySummaryBody {
            id: faculty.id,
            name: faculty.name,
            department: faculty.department,
        },
        statistics: statistics.into(),
    }))
}

/// Top and bottom faculties by average rating.
#[utoipa::path(
    get,
    path = "/api/admin/analytics/top-bottom-faculty",
    responses(
        (status = 200, description = "Ranking", body = TopBottomBody),
        (status = 403, description = "Admins only", body = ErrorSchema)
    ),
    tags = ["admin"],
    security(("BearerAuth" = []))
)]
#[get("/analytics/top-bottom-faculty")]
pub async fn top_bottom_faculty(
    state: web::Data<HttpState>,
    auth: AuthenticatedUser,
) -> ApiResult<web::Json<TopBottomBody>> {
    auth.require_admin()?;
    let ranking = state.analytics.top_bottom(RANKING_SIZE).await?;
    Ok(web::Json(TopBottomBody {
        success: true,
        top: ranking.top.into_iter().map(Into::into).collect(),
        bottom: ranking.bottom.into_iter().map(Into::into).collect(),
    }))
}

/// System-wide rating histogram.
#[utoipa::path(
    get,
    path = "/api/admin/analytics/rating-distribution",
    responses(
        (status = 200, description = "Histogram", body = DistributionBody),
        (status = 403, description = "Admins only", body = ErrorSchema)
    ),
    tags = ["admin"],
    security(("BearerAuth" = []))
)]
#[get("/analytics/rating-distribution")]
pub async fn rating_distribution(
    state: web::Data<HttpState>,
    auth: AuthenticatedUser,
) -> ApiResult<web::Json<DistributionBody>> {
    auth.require_admin()?;
    let distribution = state.analytics.rating_distribution().await?;
    Ok(web::Json(DistributionBody {
        success: true,
        distribution,
    }))
}

/// Faculty listing for the admin dashboard (read-only).
#[utoipa::path(
    get,
    path = "/api/admin/faculties",
    responses(
        (status = 200, description = "Faculties", body = FacultiesBody),
        (status = 403, description = "Admins only", body = ErrorSchema)
    ),
    tags = ["admin"],
    security(("BearerAuth" = []))
)]
#[get("/faculties")]
pub async fn list_faculties(
    state: web::Data<HttpState>,
    auth: AuthenticatedUser,
) -> ApiResult<web::Json<FacultiesBody>> {
    auth.require_admin()?;
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

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
