//! User account entity for the identity service.
//!
//! The feedback core never touches these records; it consumes only the
//! `(id, role)` principal the identity service resolves from a credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::principal::{Role, UserId};

/// A registered user account. The password digest never leaves the
/// persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Surrogate key.
    pub id: UserId,
    /// Unique login address.
    pub email: String,
    /// Unique campus identifier (student or staff number).
    pub institutional_id: String,
    /// Display name.
    pub name: String,
    /// Authorization role.
    pub role: Role,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields required to register an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Unique login address.
    pub email: String,
    /// Hex-encoded SHA-256 digest of the password.
    pub password_digest: String,
    /// Unique campus identifier.
    pub institutional_id: String,
    /// Display name.
    pub name: String,
    /// Authorization role; defaults to student at the service layer.
    pub role: Role,
}
