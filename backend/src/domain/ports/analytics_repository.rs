//! Driven port for aggregate feedback reads.
//!
//! The aggregation engine computes averages, ranking, and histogram policy
//! in the service layer; adapters only run the grouped queries and return
//! raw totals.

use async_trait::async_trait;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by analytics repository adapters.
    pub enum AnalyticsRepositoryError {
        /// Storage connection could not be established.
        Connection { message: String } =>
            "analytics store connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "analytics store query failed: {message}",
    }
}

/// Raw rating totals for one faculty. `rating_sum`, `min_rating`, and
/// `max_rating` are `None` when no feedback rows exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingTotals {
    /// Number of feedback rows.
    pub total_feedbacks: i64,
    /// Sum of all ratings.
    pub rating_sum: Option<i64>,
    /// Lowest rating.
    pub min_rating: Option<i16>,
    /// Highest rating.
    pub max_rating: Option<i16>,
}

/// Per-faculty rating sums for ranking. Faculties without feedback are
/// excluded by the grouping join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyRatingSum {
    /// Faculty id.
    pub faculty_id: i32,
    /// Faculty display name.
    pub faculty_name: String,
    /// Faculty department.
    pub department: String,
    /// Sum of all ratings for this faculty.
    pub rating_sum: i64,
    /// Number of feedback rows for this faculty.
    pub total_feedbacks: i64,
}

/// Count of feedback rows holding one rating value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingCount {
    /// Rating value (1..=5 for well-formed data).
    pub rating: i16,
    /// Number of rows with that rating.
    pub count: i64,
}

/// Port for aggregate feedback queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Count/sum/min/max of ratings for one faculty.
    async fn totals_for_faculty(
        &self,
        faculty_id: i32,
    ) -> Result<RatingTotals, AnalyticsRepositoryError>;

    /// Rating sums grouped per faculty, ordered by faculty id ascending so
    /// downstream ranking is deterministic. Zero-feedback faculties never
    /// appear.
    async fn rating_sums_by_faculty(
        &self,
    ) -> Result<Vec<FacultyRatingSum>, AnalyticsRepositoryError>;

    /// System-wide count of rows per rating value; absent values simply have
    /// no entry.
    async fn rating_counts(&self) -> Result<Vec<RatingCount>, AnalyticsRepositoryError>;
}

/// Fixture implementation reporting an empty system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnalyticsRepository;

#[async_trait]
impl AnalyticsRepository for FixtureAnalyticsRepository {
    async fn totals_for_faculty(
        &self,
        _faculty_id: i32,
    ) -> Result<RatingTotals, AnalyticsRepositoryError> {
        Ok(RatingTotals::default())
    }

    async fn rating_sums_by_faculty(
        &self,
    ) -> Result<Vec<FacultyRatingSum>, AnalyticsRepositoryError> {
        Ok(Vec::new())
    }

    async fn rating_counts(&self) -> Result<Vec<RatingCount>, AnalyticsRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_reports_empty_system() {
        let repo = FixtureAnalyticsRepository;

        let totals = repo
            .totals_for_faculty(1)
            .await
            .expect("fixture totals succeed");
        assert_eq!(totals.total_feedbacks, 0);
        assert!(totals.rating_sum.is_none());

        assert!(repo
            .rating_sums_by_faculty()
            .await
            .expect("fixture sums succeed")
            .is_empty());
        assert!(repo
            .rating_counts()
            .await
            .expect("fixture counts succeed")
            .is_empty());
    }
}
