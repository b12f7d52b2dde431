//! Identity service: registration, login, and bearer-token verification.
//!
//! Tokens are opaque 32-byte random values handed to the client once; only
//! their SHA-256 digest is stored, alongside the owning account and an
//! expiry. Passwords are likewise stored as digests. Login failures are
//! uniform: an unknown email and a wrong password produce the same error.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::domain::account::NewAccount;
use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, AuthSession, IdentityService, LoginRequest,
    RegisterRequest,
};
use crate::domain::principal::{Principal, Role, UserId};
use crate::domain::{Account, Error};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Number of random bytes backing a bearer token.
const TOKEN_BYTES: usize = 32;

/// Hex-encoded SHA-256 digest, used for both passwords and tokens at rest.
fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn map_repository_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account store unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account store error: {message}"))
        }
        AccountRepositoryError::DuplicateAccount => {
            Error::conflict("Email or Institutional ID already registered")
        }
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("Invalid email or password")
}

/// Identity use-cases over an account repository.
#[derive(Clone)]
pub struct AccountIdentityService<R> {
    account_repo: Arc<R>,
    token_ttl: Duration,
}

impl<R> AccountIdentityService<R> {
    /// Create a new identity service issuing tokens valid for `token_ttl`.
    pub fn new(account_repo: Arc<R>, token_ttl: Duration) -> Self {
        Self {
            account_repo,
            token_ttl,
        }
    }
}

impl<R> AccountIdentityService<R>
where
    R: AccountRepository,
{
    /// Mint a fresh token, record its digest, and return the plain value.
    async fn issue_token(&self, user_id: UserId) -> Result<String, Error> {
        let mut bytes = [0_u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        let expires_at = Utc::now() + self.token_ttl;
        self.account_repo
            .insert_session(&sha256_hex(token.as_bytes()), user_id, expires_at)
            .await
            .map_err(map_repository_error)?;
        Ok(token)
    }
}

fn parse_register_request(request: RegisterRequest) -> Result<NewAccount, Error> {
    let (Some(email), Some(password), Some(institutional_id), Some(name)) = (
        request.email,
        request.password,
        request.institutional_id,
        request.name,
    ) else {
        return Err(Error::invalid_request(
            "All fields are required (email, password, institutional_id, name)",
        ));
    };

    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(
            Error::invalid_request("Password must be at least 6 characters long").with_details(
                json!({ "field": "password", "code": "too_short" }),
            ),
        );
    }

    let role = match request.role {
        None => Role::Student,
        Some(raw) => raw.parse().map_err(|_| {
            Error::invalid_request("Role must be student or admin")
                .with_details(json!({ "field": "role", "value": raw }))
        })?,
    };

    Ok(NewAccount {
        email,
        password_digest: sha256_hex(password.as_bytes()),
        institutional_id,
        name,
        role,
    })
}

#[async_trait]
impl<R> IdentityService for AccountIdentityService<R>
where
    R: AccountRepository,
{
    async fn register(&self, request: RegisterRequest) -> Result<AuthSession, Error> {
        let new_account = parse_register_request(request)?;
        let account = self
            .account_repo
            .insert_account(&new_account)
            .await
            .map_err(map_repository_error)?;

        let token = self.issue_token(account.id).await?;
        Ok(AuthSession { token, account })
    }

    async fn login(&self, request: LoginRequest) -> Result<AuthSession, Error> {
        let (Some(email), Some(password)) = (request.email, request.password) else {
            return Err(Error::invalid_request("Email and password are required"));
        };

        let credentials = self
            .account_repo
            .find_by_email(&email)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(invalid_credentials)?;

        if sha256_hex(password.as_bytes()) != credentials.password_digest {
            return Err(invalid_credentials());
        }

        let token = self.issue_token(credentials.account.id).await?;
        Ok(AuthSession {
            token,
            account: credentials.account,
        })
    }

    async fn profile(&self, user_id: UserId) -> Result<Account, Error> {
        self.account_repo
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("User not found"))
    }

    async fn verify_bearer(&self, token: &str) -> Result<Principal, Error> {
        self.account_repo
            .find_principal_by_token_digest(&sha256_hex(token.as_bytes()), Utc::now())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized("Invalid or expired token"))
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
