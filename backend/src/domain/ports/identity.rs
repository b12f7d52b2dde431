//! Driving port for the identity collaborator.
//!
//! The feedback core never re-derives authorization data: it consumes the
//! [`Principal`] this port resolves from a bearer credential and trusts it.

use async_trait::async_trait;

use crate::domain::account::Account;
use crate::domain::principal::{Principal, UserId};
use crate::domain::Error;

/// Registration payload. All fields arrive raw; the identity service owns
/// their validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterRequest {
    /// Login address.
    pub email: Option<String>,
    /// Plain password (≥ 6 characters); digested before storage.
    pub password: Option<String>,
    /// Campus identifier.
    pub institutional_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Requested role; defaults to student.
    pub role: Option<String>,
}

/// Login payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginRequest {
    /// Login address.
    pub email: Option<String>,
    /// Plain password.
    pub password: Option<String>,
}

/// An issued bearer credential with the account it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Opaque bearer token; shown to the client exactly once.
    pub token: String,
    /// The authenticated account.
    pub account: Account,
}

/// Port for account registration, login, and bearer verification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Register a new account and issue a bearer token.
    async fn register(&self, request: RegisterRequest) -> Result<AuthSession, Error>;

    /// Authenticate by email and password; unknown email and wrong password
    /// fail identically.
    async fn login(&self, request: LoginRequest) -> Result<AuthSession, Error>;

    /// The authenticated account's own record.
    async fn profile(&self, user_id: UserId) -> Result<Account, Error>;

    /// Resolve the principal behind a presented bearer token.
    async fn verify_bearer(&self, token: &str) -> Result<Principal, Error>;
}

/// Fixture identity service that rejects every credential.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityService;

#[async_trait]
impl IdentityService for FixtureIdentityService {
    async fn register(&self, _request: RegisterRequest) -> Result<AuthSession, Error> {
        Err(Error::internal("identity fixture cannot register"))
    }

    async fn login(&self, _request: LoginRequest) -> Result<AuthSession, Error> {
        Err(Error::unauthorized("Invalid email or password"))
    }

    async fn profile(&self, _user_id: UserId) -> Result<Account, Error> {
        Err(Error::not_found("User not found"))
    }

    async fn verify_bearer(&self, _token: &str) -> Result<Principal, Error> {
        Err(Error::unauthorized("Invalid or expired token"))
    }
}
