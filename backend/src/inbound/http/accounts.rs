//! Account HTTP handlers: registration, login, profile.
//!
//! ```text
//! POST /api/auth/register
//! POST /api/auth/login
//! GET  /api/auth/profile
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{LoginRequest, RegisterRequest};
use crate::domain::Account;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Registration request body. Field validation lives in the identity
/// service so the error messages stay uniform.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterBody {
    /// Login address.
    pub email: Option<String>,
    /// Password, at least 6 characters.
    pub password: Option<String>,
    /// Campus identifier.
    pub institutional_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Requested role; defaults to student.
    pub role: Option<String>,
}

/// Login request body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginBody {
    /// Login address.
    pub email: Option<String>,
    /// Password.
    pub password: Option<String>,
}

/// Account as exposed to clients; carries no credential material.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserBody {
    /// Account id.
    pub id: i32,
    /// Login address.
    pub email: String,
    /// Campus identifier.
    pub institutional_id: String,
    /// Display name.
    pub name: String,
    /// Role string, `student` or `admin`.
    pub role: String,
}

impl From<Account> for UserBody {
    fn from(value: Account) -> Self {
        Self {
            id: value.id.get(),
            email: value.email,
            institutional_id: value.institutional_id,
            name: value.name,
            role: value.role.to_string(),
        }
    }
}

/// Response carrying a freshly issued bearer token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthSessionBody {
    /// Always `true` on success.
    pub success: bool,
    /// Confirmation message.
    pub message: String,
    /// Opaque bearer token; present this as `Authorization: Bearer <token>`.
    pub token: String,
    /// The authenticated account.
    pub user: UserBody,
}

/// Response for the profile view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileBody {
    /// Always `true` on success.
    pub success: bool,
    /// The authenticated account.
    pub user: UserBody,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterBody,
    responses(
        (status = 201, description = "Account created", body = AuthSessionBody),
        (status = 400, description = "Missing field or weak password", body = ErrorSchema),
        (status = 409, description = "Email or institutional id taken", body = ErrorSchema)
    ),
    tags = ["auth"],
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterBody>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let session = state
        .identity
        .register(RegisterRequest {
            email: payload.email,
            password: payload.password,
            institutional_id: payload.institutional_id,
            name: payload.name,
            role: payload.role,
        })
        .await?;

    Ok(HttpResponse::Created().json(AuthSessionBody {
        success: true,
        message: "User registered successfully".to_owned(),
        token: session.token,
        user: session.account.into(),
    }))
}

/// Authenticate and obtain a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = AuthSessionBody),
        (status = 400, description = "Missing field", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["auth"],
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<AuthSessionBody>> {
    let payload = payload.into_inner();
    let session = state
        .identity
        .login(LoginRequest {
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok(web::Json(AuthSessionBody {
        success: true,
        message: "Login successful".to_owned(),
        token: session.token,
        user: session.account.into(),
    }))
}

/// The authenticated account's own profile.
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Account removed", body = ErrorSchema)
    ),
    tags = ["auth"],
    security(("BearerAuth" = []))
)]
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    auth: AuthenticatedUser,
) -> ApiResult<web::Json<ProfileBody>> {
    let account = state.identity.profile(auth.user_id()).await?;
    Ok(web::Json(ProfileBody {
        success: true,
        user: account.into(),
    }))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
