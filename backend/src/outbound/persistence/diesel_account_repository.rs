//! PostgreSQL-backed `AccountRepository` using Diesel.
//!
//! Accounts and bearer sessions share one adapter: session verification is a
//! single join from `auth_sessions` to `users`, so a presented token
//! resolves to `(id, role)` in one round trip.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::account::{Account, NewAccount};
use crate::domain::ports::{AccountCredentials, AccountRepository, AccountRepositoryError};
use crate::domain::principal::{Principal, Role, UserId};

use super::error_map::{classify_diesel_error, classify_pool_error, StorageErrorKind};
use super::models::{NewSessionRow, NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::{auth_sessions, users};

/// Diesel implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(kind: StorageErrorKind) -> AccountRepositoryError {
    match kind {
        StorageErrorKind::Connection(message) => AccountRepositoryError::connection(message),
        StorageErrorKind::Query(message) => AccountRepositoryError::query(message),
        StorageErrorKind::UniqueViolation { .. } => AccountRepositoryError::duplicate_account(),
        StorageErrorKind::ForeignKeyViolation { .. } => {
            AccountRepositoryError::query("foreign key violation")
        }
    }
}

fn map_pool(error: super::pool::PoolError) -> AccountRepositoryError {
    map_error(classify_pool_error(error))
}

fn map_diesel(error: diesel::result::Error) -> AccountRepositoryError {
    map_error(classify_diesel_error(error))
}

fn parse_role(raw: &str) -> Result<Role, AccountRepositoryError> {
    raw.parse()
        .map_err(|_| AccountRepositoryError::query(format!("unknown stored role: {raw}")))
}

fn row_to_account(row: UserRow) -> Result<Account, AccountRepositoryError> {
    Ok(Account {
        id: UserId::new(row.id),
        email: row.email,
        institutional_id: row.institutional_id,
        name: row.name,
        role: parse_role(&row.role)?,
        created_at: row.created_at,
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert_account(
        &self,
        account: &NewAccount,
    ) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = NewUserRow {
            email: &account.email,
            password_digest: &account.password_digest,
            institutional_id: &account.institutional_id,
            name: &account.name,
            role: account.role.as_str(),
        };
        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        row_to_account(stored)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountCredentials>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(|row| {
            let password_digest = row.password_digest.clone();
            row_to_account(row).map(|account| AccountCredentials {
                account,
                password_digest,
            })
        })
        .transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.get()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_account).transpose()
    }

    async fn insert_session(
        &self,
        token_digest: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = NewSessionRow {
            token_digest,
            user_id: user_id.get(),
            expires_at,
        };
        diesel::insert_into(auth_sessions::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn find_principal_by_token_digest(
        &self,
        token_digest: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Principal>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<(i32, String)> = auth_sessions::table
            .inner_join(users::table)
            .filter(
                auth_sessions::token_digest
                    .eq(token_digest)
                    .and(auth_sessions::expires_at.gt(now)),
            )
            .select((users::id, users::role))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(|(id, role)| {
            Ok(Principal {
                user_id: UserId::new(id),
                role: parse_role(&role)?,
            })
        })
        .transpose()
    }
}
