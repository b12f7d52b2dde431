//! Handler coverage for the student feedback endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use super::*;
use crate::domain::ports::{FeedbackLedger, FixtureFeedbackLedger};
use crate::domain::principal::UserId;
use crate::domain::Error;
use crate::inbound::http::test_utils::{
    auth_header, fixture_faculty, fixture_state, CannedDirectory, ADMIN_TOKEN, STUDENT_TOKEN,
};

/// Ledger stub returning canned responses.
struct CannedLedger {
    submit_response: Result<i32, Error>,
    update_response: Result<(), Error>,
    delete_response: Result<(), Error>,
    submissions: Vec<StudentFeedbackEntry>,
    status: Vec<FacultyFeedbackStatus>,
}

impl Default for CannedLedger {
    fn default() -> Self {
        Self {
            submit_response: Ok(1),
            update_response: Ok(()),
            delete_response: Ok(()),
            submissions: Vec::new(),
            status: Vec::new(),
        }
    }
}

#[async_trait]
impl FeedbackLedger for CannedLedger {
    async fn submit(&self, _request: SubmitFeedbackRequest) -> Result<i32, Error> {
        self.submit_response.clone()
    }

    async fn update(&self, _request: UpdateFeedbackRequest) -> Result<(), Error> {
        self.update_response.clone()
    }

    async fn delete(&self, _feedback_id: i32, _student: UserId) -> Result<(), Error> {
        self.delete_response.clone()
    }

    async fn list_for_student(
        &self,
        _student: UserId,
    ) -> Result<Vec<StudentFeedbackEntry>, Error> {
        Ok(self.submissions.clone())
    }

    async fn status_for_student(
        &self,
        _student: UserId,
    ) -> Result<Vec<FacultyFeedbackStatus>, Error> {
        Ok(self.status.clone())
    }

    async fn list_anonymized(
        &self,
        _faculty_id: Option<i32>,
    ) -> Result<Vec<crate::domain::ports::AnonymizedFeedback>, Error> {
        Ok(Vec::new())
    }
}

fn scope() -> actix_web::Scope {
    web::scope("/api/feedback")
        .service(list_faculties)
        .service(feedback_status)
        .service(my_feedbacks)
        .service(submit_feedback)
        .service(update_feedback)
        .service(delete_feedback)
}

async fn call(
    state: HttpState,
    request: test::TestRequest,
) -> actix_web::dev::ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(scope()),
    )
    .await;
    test::call_service(&app, request.to_request()).await
}

#[actix_web::test]
async fn faculties_require_a_token() {
    let res = call(
        fixture_state(),
        test::TestRequest::get().uri("/api/feedback/faculties"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn faculties_reject_admin_tokens() {
    let res = call(
        fixture_state(),
        test::TestRequest::get()
            .uri("/api/feedback/faculties")
            .insert_header(auth_header(ADMIN_TOKEN)),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Access denied. Students only."));
}

#[actix_web::test]
async fn faculties_list_the_directory() {
    let state = HttpState {
        faculties: Arc::new(CannedDirectory(vec![
            fixture_faculty(1, "Ada Lovelace"),
            fixture_faculty(2, "Grace Hopper"),
        ])),
        ..fixture_state()
    };

    let res = call(
        state,
        test::TestRequest::get()
            .uri("/api/feedback/faculties")
            .insert_header(auth_header(STUDENT_TOKEN)),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["faculties"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["faculties"][0]["name"], json!("Ada Lovelace"));
    assert!(body["faculties"][0].get("created_at").is_none());
}

#[actix_web::test]
async fn my_feedbacks_carry_the_envelope_shape() {
    let created_at = Utc
        .with_ymd_and_hms(2025, 3, 10, 12, 0, 0)
        .single()
        .expect("valid fixture date");
    let state = HttpState {
        ledger: Arc::new(CannedLedger {
            submissions: vec![StudentFeedbackEntry {
                id: 12,
                faculty_id: 2,
                faculty_name: "Grace Hopper".to_owned(),
                rating: 5,
                created_at,
            }],
            ..CannedLedger::default()
        }),
        ..fixture_state()
    };

    let res = call(
        state,
        test::TestRequest::get()
            .uri("/api/feedback/my-feedbacks")
            .insert_header(auth_header(STUDENT_TOKEN)),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], json!(true));
    let entry = &body["feedbacks"][0];
    assert_eq!(entry["id"], json!(12));
    assert_eq!(entry["faculty_name"], json!("Grace Hopper"));
    assert_eq!(entry["rating"], json!(5));
}

#[actix_web::test]
async fn status_covers_every_faculty() {
    let state = HttpState {
        ledger: Arc::new(CannedLedger {
            status: vec![
                FacultyFeedbackStatus {
                    faculty_id: 1,
                    faculty_name: "Ada Lovelace".to_owned(),
                    department: "Computing".to_owned(),
                    has_feedback: true,
                    feedback_id: Some(3),
                    rating: Some(4),
                    feedback_date: Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).single(),
                },
                FacultyFeedbackStatus {
                    faculty_id: 2,
                    faculty_name: "Grace Hopper".to_owned(),
                    department: "Computing".to_owned(),
                    has_feedback: false,
                    feedback_id: None,
                    rating: None,
                    feedback_date: None,
                },
            ],
            ..CannedLedger::default()
        }),
        ..fixture_state()
    };

    let res = call(
        state,
        test::TestRequest::get()
            .uri("/api/feedback/status")
            .insert_header(auth_header(STUDENT_TOKEN)),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["status"][0]["has_feedback"], json!(true));
    assert_eq!(body["status"][1]["has_feedback"], json!(false));
    assert_eq!(body["status"][1]["feedback_id"], Value::Null);
}

#[actix_web::test]
async fn submit_returns_created_with_id() {
    let state = HttpState {
        ledger: Arc::new(CannedLedger {
            submit_response: Ok(41),
            ..CannedLedger::default()
        }),
        ..fixture_state()
    };

    let res = call(
        state,
        test::TestRequest::post()
            .uri("/api/feedback/submit")
            .insert_header(auth_header(STUDENT_TOKEN))
            .set_json(json!({ "faculty_id": 2, "rating": 5, "comments": "Great lectures" })),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["feedback_id"], json!(41));
    assert_eq!(body["message"], json!("Feedback submitted successfully"));
}

#[actix_web::test]
async fn duplicate_submit_maps_to_conflict() {
    let state = HttpState {
        ledger: Arc::new(CannedLedger {
            submit_response: Err(Error::conflict(
                "You have already submitted feedback for this faculty",
            )),
            ..CannedLedger::default()
        }),
        ..fixture_state()
    };

    let res = call(
        state,
        test::TestRequest::post()
            .uri("/api/feedback/submit")
            .insert_header(auth_header(STUDENT_TOKEN))
            .set_json(json!({ "faculty_id": 2, "rating": 5 })),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!("conflict"));
}

#[actix_web::test]
async fn update_of_foreign_feedback_is_not_found() {
    let state = HttpState {
        ledger: Arc::new(CannedLedger {
            update_response: Err(Error::not_found("Feedback not found")),
            ..CannedLedger::default()
        }),
        ..fixture_state()
    };

    let res = call(
        state,
        test::TestRequest::put()
            .uri("/api/feedback/update/99")
            .insert_header(auth_header(STUDENT_TOKEN))
            .set_json(json!({ "rating": 2 })),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], json!("Feedback not found"));
}

#[actix_web::test]
async fn delete_confirms_with_message() {
    let res = call(
        HttpState {
            ledger: Arc::new(CannedLedger::default()),
            ..fixture_state()
        },
        test::TestRequest::delete()
            .uri("/api/feedback/delete/3")
            .insert_header(auth_header(STUDENT_TOKEN)),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], json!("Feedback deleted successfully"));
}

#[actix_web::test]
async fn fixture_ledger_smoke() {
    // The fixture ledger keeps handler wiring honest without canned data.
    let res = call(
        HttpState {
            ledger: Arc::new(FixtureFeedbackLedger),
            ..fixture_state()
        },
        test::TestRequest::get()
            .uri("/api/feedback/my-feedbacks")
            .insert_header(auth_header(STUDENT_TOKEN)),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}
