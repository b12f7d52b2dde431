//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting actix handlers
//! turn failures into the `{success: false, code, message}` envelope with
//! consistent status codes. Internal errors are redacted so storage detail
//! never reaches a client.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation detail to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{json, Value};

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("no token"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("students only"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("duplicate"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("pool"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_codes_match_error_codes(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[actix_web::test]
    async fn error_body_is_failed_envelope() {
        let error = Error::not_found("Feedback not found");
        let response = error.error_response();

        let bytes = to_bytes(response.into_body()).await.expect("body reads");
        let value: Value = serde_json::from_slice(&bytes).expect("body is JSON");
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["code"], json!("not_found"));
        assert_eq!(value["message"], json!("Feedback not found"));
    }

    #[actix_web::test]
    async fn internal_detail_is_redacted() {
        let error = Error::internal("connection to 10.0.0.3 refused")
            .with_details(json!({ "dsn": "postgres://secret" }));
        let response = error.error_response();

        let bytes = to_bytes(response.into_body()).await.expect("body reads");
        let value: Value = serde_json::from_slice(&bytes).expect("body is JSON");
        assert_eq!(value["message"], json!("Internal server error"));
        assert!(value.get("details").is_none());
    }

    #[actix_web::test]
    async fn trace_id_propagates_to_header() {
        let error = Error::internal("boom").with_trace_id("00000000-0000-0000-0000-000000000000");
        let response = error.error_response();

        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace header set")
            .to_str()
            .expect("header is ascii");
        assert_eq!(header, "00000000-0000-0000-0000-000000000000");
    }
}
