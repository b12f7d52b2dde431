//! HTTP inbound adapter exposing the REST endpoints.

pub mod accounts;
pub mod admin;
pub mod bearer;
pub mod error;
pub mod feedback;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ApiResult;

use actix_web::{web, HttpResponse};

use crate::domain::ports::FacultyDirectoryError;
use crate::domain::Error;

/// Register every REST scope plus the liveness probe.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(accounts::register)
            .service(accounts::login)
            .service(accounts::profile),
    )
    .service(
        web::scope("/api/feedback")
            .service(feedback::list_faculties)
            .service(feedback::feedback_status)
            .service(feedback::my_feedbacks)
            .service(feedback::submit_feedback)
            .service(feedback::update_feedback)
            .service(feedback::delete_feedback),
    )
    .service(
        web::scope("/api/admin")
            .service(admin::all_feedback)
            .service(admin::feedback_by_faculty)
            .service(admin::statistics_by_faculty)
            .service(admin::top_bottom_faculty)
            .service(admin::rating_distribution)
            .service(admin::list_faculties),
    )
    .route(
        "/healthz",
        web::get().to(|| async { HttpResponse::Ok().body("ok") }),
    );
}

/// Map faculty directory failures for handlers that read the directory
/// without going through a domain service.
pub(crate) fn map_directory_error(error: FacultyDirectoryError) -> Error {
    match error {
        FacultyDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("faculty directory unavailable: {message}"))
        }
        FacultyDirectoryError::Query { message } => {
            Error::internal(format!("faculty directory error: {message}"))
        }
    }
}
