//! Driven port for faculty lookups.
//!
//! The faculty directory is admin-managed outside this service; this port is
//! strictly read-only.

use async_trait::async_trait;

use crate::domain::faculty::Faculty;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by faculty directory adapters.
    pub enum FacultyDirectoryError {
        /// Storage connection could not be established.
        Connection { message: String } =>
            "faculty directory connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "faculty directory query failed: {message}",
    }
}

/// Read-only port for faculty records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FacultyDirectory: Send + Sync {
    /// Fetch one faculty by id; `None` when it does not exist.
    async fn find_by_id(&self, faculty_id: i32) -> Result<Option<Faculty>, FacultyDirectoryError>;

    /// Every faculty, ordered by name.
    async fn list_all(&self) -> Result<Vec<Faculty>, FacultyDirectoryError>;
}

/// Fixture implementation with no faculties.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFacultyDirectory;

#[async_trait]
impl FacultyDirectory for FixtureFacultyDirectory {
    async fn find_by_id(&self, _faculty_id: i32) -> Result<Option<Faculty>, FacultyDirectoryError> {
        Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<Faculty>, FacultyDirectoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_directory_is_empty() {
        let directory = FixtureFacultyDirectory;

        assert!(directory
            .find_by_id(1)
            .await
            .expect("fixture lookup succeeds")
            .is_none());
        assert!(directory
            .list_all()
            .await
            .expect("fixture listing succeeds")
            .is_empty());
    }
}
