//! Driven port for user accounts and bearer sessions.
//!
//! Credentials are stored as digests only: the password digest lives on the
//! account row, and sessions hold the SHA-256 digest of the issued token.
//! The token itself is never persisted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::account::{Account, NewAccount};
use crate::domain::principal::{Principal, UserId};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Storage connection could not be established.
        Connection { message: String } =>
            "account store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account store query failed: {message}",
        /// Email or institutional id already registered.
        DuplicateAccount =>
            "email or institutional id already registered",
    }
}

/// An account together with its stored password digest, for login checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCredentials {
    /// The account record.
    pub account: Account,
    /// Hex-encoded SHA-256 digest of the password.
    pub password_digest: String,
}

/// Port for account and session storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account and return the stored record.
    ///
    /// A uniqueness violation on email or institutional id surfaces as
    /// [`AccountRepositoryError::DuplicateAccount`].
    async fn insert_account(&self, account: &NewAccount)
        -> Result<Account, AccountRepositoryError>;

    /// Fetch an account with its password digest by login address.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountCredentials>, AccountRepositoryError>;

    /// Fetch an account by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Record an issued bearer session by token digest.
    async fn insert_session(
        &self,
        token_digest: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountRepositoryError>;

    /// Resolve the principal for an unexpired session with this token
    /// digest; `None` when the digest is unknown or the session has expired.
    async fn find_principal_by_token_digest(
        &self,
        token_digest: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Principal>, AccountRepositoryError>;
}

/// Fixture implementation with no accounts or sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountRepository;

#[async_trait]
impl AccountRepository for FixtureAccountRepository {
    async fn insert_account(
        &self,
        account: &NewAccount,
    ) -> Result<Account, AccountRepositoryError> {
        Ok(Account {
            id: UserId::new(1),
            email: account.email.clone(),
            institutional_id: account.institutional_id.clone(),
            name: account.name.clone(),
            role: account.role,
            created_at: Utc::now(),
        })
    }

    async fn find_by_email(
        &self,
        _email: &str,
    ) -> Result<Option<AccountCredentials>, AccountRepositoryError> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: UserId) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(None)
    }

    async fn insert_session(
        &self,
        _token_digest: &str,
        _user_id: UserId,
        _expires_at: DateTime<Utc>,
    ) -> Result<(), AccountRepositoryError> {
        Ok(())
    }

    async fn find_principal_by_token_digest(
        &self,
        _token_digest: &str,
        _now: DateTime<Utc>,
    ) -> Result<Option<Principal>, AccountRepositoryError> {
        Ok(None)
    }
}
