//! OpenAPI document for the REST surface, served by Swagger UI in debug
//! builds.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::{accounts, admin, feedback};

/// Registers the bearer-token security scheme referenced by the handlers.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI description of every REST endpoint.
#[derive(OpenApi)]
#[openapi(
    paths(
        accounts::register,
        accounts::login,
        accounts::profile,
        feedback::list_faculties,
        feedback::feedback_status,
        feedback::my_feedbacks,
        feedback::submit_feedback,
        feedback::update_feedback,
        feedback::delete_feedback,
        admin::all_feedback,
        admin::feedback_by_faculty,
        admin::statistics_by_faculty,
        admin::top_bottom_faculty,
        admin::rating_distribution,
        admin::list_faculties,
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "auth", description = "Registration, login, and profile"),
        (name = "feedback", description = "Student feedback lifecycle"),
        (name = "admin", description = "Anonymized feedback views and analytics")
    )
)]
pub struct ApiDoc;
