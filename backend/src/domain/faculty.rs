//! Faculty entity.
//!
//! Faculty records are admin-managed outside this service; the backend only
//! reads them, as rateable subjects referenced by feedback rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rateable faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    /// Surrogate key.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Department the faculty member belongs to.
    pub department: String,
    /// Contact address.
    pub email: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}
