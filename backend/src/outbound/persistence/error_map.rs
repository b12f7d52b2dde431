//! Classification of storage failures shared by the Diesel adapters.
//!
//! Each adapter owns a port-specific error enum; this module reduces Diesel
//! and pool failures to a small set of kinds the adapters translate. The
//! constraint inspection is what turns a raw unique-violation into the
//! domain's duplicate-submission conflict.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Storage failure reduced to what the ports care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StorageErrorKind {
    /// Connection could not be established or checked out.
    Connection(String),
    /// Query or mutation failed.
    Query(String),
    /// A uniqueness constraint was violated.
    UniqueViolation {
        /// Violated constraint name, when the driver reports one.
        constraint: Option<String>,
    },
    /// A foreign key constraint was violated.
    ForeignKeyViolation {
        /// Violated constraint name, when the driver reports one.
        constraint: Option<String>,
    },
}

impl StorageErrorKind {
    /// Whether the violated constraint name contains `needle`.
    pub(crate) fn constraint_contains(&self, needle: &str) -> bool {
        let constraint = match self {
            Self::UniqueViolation { constraint } | Self::ForeignKeyViolation { constraint } => {
                constraint.as_deref()
            }
            Self::Connection(_) | Self::Query(_) => None,
        };
        constraint.is_some_and(|name| name.contains(needle))
    }
}

/// Reduce a pool failure: checkout and build failures are both connection
/// problems from the adapters' point of view.
pub(crate) fn classify_pool_error(error: PoolError) -> StorageErrorKind {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StorageErrorKind::Connection(message)
        }
    }
}

/// Reduce a Diesel failure to a [`StorageErrorKind`], logging debug context.
pub(crate) fn classify_diesel_error(error: DieselError) -> StorageErrorKind {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = ?info.constraint_name(),
                "diesel operation failed"
            );
            let constraint = info.constraint_name().map(str::to_owned);
            match kind {
                DatabaseErrorKind::UniqueViolation => {
                    StorageErrorKind::UniqueViolation { constraint }
                }
                DatabaseErrorKind::ForeignKeyViolation => {
                    StorageErrorKind::ForeignKeyViolation { constraint }
                }
                DatabaseErrorKind::ClosedConnection => {
                    StorageErrorKind::Connection("database connection closed".to_owned())
                }
                _ => StorageErrorKind::Query(info.message().to_owned()),
            }
        }
        DieselError::NotFound => StorageErrorKind::Query("record not found".to_owned()),
        other => {
            debug!(error = %other, "diesel operation failed");
            StorageErrorKind::Query(other.to_string())
        }
    }
}
