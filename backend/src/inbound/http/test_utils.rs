//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use actix_web::http::header;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::domain::faculty::Faculty;
use crate::domain::ports::{
    AuthSession, FacultyDirectory, FacultyDirectoryError, FixtureFacultyDirectory,
    FixtureFeedbackAnalytics, FixtureFeedbackLedger, IdentityService, LoginRequest,
    RegisterRequest,
};
use crate::domain::{Account, Error, Principal, Role, UserId};
use crate::inbound::http::state::HttpState;

pub(crate) const STUDENT_TOKEN: &str = "student-token";
pub(crate) const ADMIN_TOKEN: &str = "admin-token";
pub(crate) const STUDENT_ID: i32 = 7;
pub(crate) const ADMIN_ID: i32 = 1;

/// Identity stub resolving two fixed tokens, one per role.
pub(crate) struct RoleTokenIdentity;

#[async_trait]
impl IdentityService for RoleTokenIdentity {
    async fn register(&self, _request: RegisterRequest) -> Result<AuthSession, Error> {
        Err(Error::internal("registration not under test"))
    }

    async fn login(&self, _request: LoginRequest) -> Result<AuthSession, Error> {
        Err(Error::internal("login not under test"))
    }

    async fn profile(&self, _user_id: UserId) -> Result<Account, Error> {
        Err(Error::not_found("User not found"))
    }

    async fn verify_bearer(&self, token: &str) -> Result<Principal, Error> {
        match token {
            STUDENT_TOKEN => Ok(Principal {
                user_id: UserId::new(STUDENT_ID),
                role: Role::Student,
            }),
            ADMIN_TOKEN => Ok(Principal {
                user_id: UserId::new(ADMIN_ID),
                role: Role::Admin,
            }),
            _ => Err(Error::unauthorized("Invalid or expired token")),
        }
    }
}

/// Directory stub with a deterministic faculty list.
pub(crate) struct CannedDirectory(pub(crate) Vec<Faculty>);

#[async_trait]
impl FacultyDirectory for CannedDirectory {
    async fn find_by_id(&self, faculty_id: i32) -> Result<Option<Faculty>, FacultyDirectoryError> {
        Ok(self.0.iter().find(|f| f.id == faculty_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Faculty>, FacultyDirectoryError> {
        Ok(self.0.clone())
    }
}

pub(crate) fn fixture_faculty(id: i32, name: &str) -> Faculty {
    Faculty {
        id,
        name: name.to_owned(),
        department: "Computing".to_owned(),
        email: format!("{}@example.edu", name.to_lowercase().replace(' ', ".")),
        created_at: Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).single().expect("valid fixture date"),
    }
}

/// State with the role-token identity and fixture ports everywhere else.
pub(crate) fn fixture_state() -> HttpState {
    HttpState {
        identity: Arc::new(RoleTokenIdentity),
        ledger: Arc::new(FixtureFeedbackLedger),
        analytics: Arc::new(FixtureFeedbackAnalytics),
        faculties: Arc::new(FixtureFacultyDirectory),
    }
}

pub(crate) fn auth_header(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}
