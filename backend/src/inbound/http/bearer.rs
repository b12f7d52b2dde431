//! Bearer-token extraction and role gating.
//!
//! Wraps the `Authorization: Bearer <token>` header so handlers only deal
//! with a resolved [`Principal`]. Verification is delegated to the identity
//! port; the extractor never inspects token contents itself.

use actix_web::http::header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::principal::{Principal, Role, UserId};
use crate::domain::Error;
use crate::inbound::http::state::HttpState;

/// A request-scoped principal resolved from a verified bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(Principal);

impl AuthenticatedUser {
    /// The verified principal.
    pub const fn principal(&self) -> Principal {
        self.0
    }

    /// The authenticated account id.
    pub const fn user_id(&self) -> UserId {
        self.0.user_id
    }

    /// Require the student role, returning the student's id.
    pub fn require_student(&self) -> Result<UserId, Error> {
        match self.0.role {
            Role::Student => Ok(self.0.user_id),
            Role::Admin => Err(Error::forbidden("Access denied. Students only.")),
        }
    }

    /// Require the admin role, returning the admin's id.
    pub fn require_admin(&self) -> Result<UserId, Error> {
        match self.0.role {
            Role::Admin => Ok(self.0.user_id),
            Role::Student => Err(Error::forbidden("Access denied. Admins only.")),
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_owned())
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req);
        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("authentication state not configured"))?;
            let token = token.ok_or_else(|| Error::unauthorized("No token provided"))?;
            let principal = state.identity.verify_bearer(&token).await?;
            Ok(Self(principal))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, App, HttpResponse};
    use async_trait::async_trait;

    use crate::domain::ports::{
        AuthSession, FixtureFacultyDirectory, FixtureFeedbackAnalytics, FixtureFeedbackLedger,
        FixtureIdentityService, IdentityService, LoginRequest, RegisterRequest,
    };
    use crate::domain::Account;
    use crate::inbound::http::ApiResult;

    /// Identity stub accepting exactly one token for one principal.
    struct SingleTokenIdentity {
        token: &'static str,
        principal: Principal,
    }

    #[async_trait]
    impl IdentityService for SingleTokenIdentity {
        async fn register(&self, _request: RegisterRequest) -> Result<AuthSession, Error> {
            Err(Error::internal("not under test"))
        }

        async fn login(&self, _request: LoginRequest) -> Result<AuthSession, Error> {
            Err(Error::internal("not under test"))
        }

        async fn profile(&self, _user_id: UserId) -> Result<Account, Error> {
            Err(Error::internal("not under test"))
        }

        async fn verify_bearer(&self, token: &str) -> Result<Principal, Error> {
            if token == self.token {
                Ok(self.principal)
            } else {
                Err(Error::unauthorized("Invalid or expired token"))
            }
        }
    }

    fn state_with_identity(identity: Arc<dyn IdentityService>) -> HttpState {
        HttpState {
            identity,
            ledger: Arc::new(FixtureFeedbackLedger),
            analytics: Arc::new(FixtureFeedbackAnalytics),
            faculties: Arc::new(FixtureFacultyDirectory),
        }
    }

    async fn whoami(auth: AuthenticatedUser) -> ApiResult<HttpResponse> {
        Ok(HttpResponse::Ok().body(auth.user_id().to_string()))
    }

    fn student_identity() -> Arc<dyn IdentityService> {
        Arc::new(SingleTokenIdentity {
            token: "valid-token",
            principal: Principal {
                user_id: UserId::new(7),
                role: Role::Student,
            },
        })
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_identity(Arc::new(
                    FixtureIdentityService,
                ))))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn malformed_scheme_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_identity(student_identity())))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn unknown_token_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_identity(student_identity())))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .insert_header((header::AUTHORIZATION, "Bearer forged"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn valid_token_resolves_principal() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_identity(student_identity())))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .insert_header((header::AUTHORIZATION, "Bearer valid-token"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "7");
    }

    #[::core::prelude::v1::test]
    fn role_gates_collapse_to_forbidden() {
        let student = AuthenticatedUser(Principal {
            user_id: UserId::new(1),
            role: Role::Student,
        });
        let admin = AuthenticatedUser(Principal {
            user_id: UserId::new(2),
            role: Role::Admin,
        });

        assert!(student.require_student().is_ok());
        assert!(admin.require_admin().is_ok());

        let err = student.require_admin().expect_err("student gated off admin");
        assert_eq!(err.message(), "Access denied. Admins only.");
        let err = admin.require_student().expect_err("admin gated off student");
        assert_eq!(err.message(), "Access denied. Students only.");
    }
}
