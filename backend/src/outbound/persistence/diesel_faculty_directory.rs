//! PostgreSQL-backed read-only `FacultyDirectory` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::faculty::Faculty;
use crate::domain::ports::{FacultyDirectory, FacultyDirectoryError};

use super::error_map::{classify_diesel_error, classify_pool_error, StorageErrorKind};
use super::models::FacultyRow;
use super::pool::DbPool;
use super::schema::faculties;

/// Diesel implementation of the `FacultyDirectory` port.
#[derive(Clone)]
pub struct DieselFacultyDirectory {
    pool: DbPool,
}

impl DieselFacultyDirectory {
    /// Create a new directory over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(kind: StorageErrorKind) -> FacultyDirectoryError {
    match kind {
        StorageErrorKind::Connection(message) => FacultyDirectoryError::connection(message),
        StorageErrorKind::Query(message) => FacultyDirectoryError::query(message),
        StorageErrorKind::UniqueViolation { .. } | StorageErrorKind::ForeignKeyViolation { .. } => {
            FacultyDirectoryError::query("constraint violation during read")
        }
    }
}

fn row_to_faculty(row: FacultyRow) -> Faculty {
    Faculty {
        id: row.id,
        name: row.name,
        department: row.department,
        email: row.email,
        created_at: row.created_at,
    }
}

#[async_trait]
impl FacultyDirectory for DieselFacultyDirectory {
    async fn find_by_id(&self, faculty_id: i32) -> Result<Option<Faculty>, FacultyDirectoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_error(classify_pool_error(err)))?;

        let row: Option<FacultyRow> = faculties::table
            .filter(faculties::id.eq(faculty_id))
            .select(FacultyRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_error(classify_diesel_error(err)))?;

        Ok(row.map(row_to_faculty))
    }

    async fn list_all(&self) -> Result<Vec<Faculty>, FacultyDirectoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_error(classify_pool_error(err)))?;

        let rows: Vec<FacultyRow> = faculties::table
            .select(FacultyRow::as_select())
            .order_by(faculties::name.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_error(classify_diesel_error(err)))?;

        Ok(rows.into_iter().map(row_to_faculty).collect())
    }
}
