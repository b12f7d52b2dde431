//! PostgreSQL-backed `AnalyticsRepository` using Diesel.
//!
//! Runs the grouped aggregate queries and returns raw totals; averaging,
//! rounding, and ranking policy live in the aggregation service.

use async_trait::async_trait;
use diesel::dsl::{self, count, count_star};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    AnalyticsRepository, AnalyticsRepositoryError, FacultyRatingSum, RatingCount, RatingTotals,
};

use super::error_map::{classify_diesel_error, classify_pool_error, StorageErrorKind};
use super::pool::DbPool;
use super::schema::{faculties, feedbacks};

/// Diesel implementation of the `AnalyticsRepository` port.
#[derive(Clone)]
pub struct DieselAnalyticsRepository {
    pool: DbPool,
}

impl DieselAnalyticsRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(kind: StorageErrorKind) -> AnalyticsRepositoryError {
    match kind {
        StorageErrorKind::Connection(message) => AnalyticsRepositoryError::connection(message),
        StorageErrorKind::Query(message) => AnalyticsRepositoryError::query(message),
        // Aggregate reads never mutate, so constraint violations are plain
        // query failures here.
        StorageErrorKind::UniqueViolation { .. } | StorageErrorKind::ForeignKeyViolation { .. } => {
            AnalyticsRepositoryError::query("constraint violation during read")
        }
    }
}

fn map_pool(error: super::pool::PoolError) -> AnalyticsRepositoryError {
    map_error(classify_pool_error(error))
}

fn map_diesel(error: diesel::result::Error) -> AnalyticsRepositoryError {
    map_error(classify_diesel_error(error))
}

#[async_trait]
impl AnalyticsRepository for DieselAnalyticsRepository {
    async fn totals_for_faculty(
        &self,
        faculty_id: i32,
    ) -> Result<RatingTotals, AnalyticsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let (total_feedbacks, rating_sum, min_rating, max_rating): (
            i64,
            Option<i64>,
            Option<i16>,
            Option<i16>,
        ) = feedbacks::table
            .filter(feedbacks::faculty_id.eq(faculty_id))
            .select((
                count_star(),
                dsl::sum(feedbacks::rating),
                dsl::min(feedbacks::rating),
                dsl::max(feedbacks::rating),
            ))
            .first(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(RatingTotals {
            total_feedbacks,
            rating_sum,
            min_rating,
            max_rating,
        })
    }

    async fn rating_sums_by_faculty(
        &self,
    ) -> Result<Vec<FacultyRatingSum>, AnalyticsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Inner join: faculties with no feedback never enter the ranking.
        let rows: Vec<(i32, String, String, Option<i64>, i64)> = faculties::table
            .inner_join(feedbacks::table)
            .group_by((faculties::id, faculties::name, faculties::department))
            .select((
                faculties::id,
                faculties::name,
                faculties::department,
                dsl::sum(feedbacks::rating),
                count(feedbacks::id),
            ))
            .order_by(faculties::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows
            .into_iter()
            .map(
                |(faculty_id, faculty_name, department, rating_sum, total_feedbacks)| {
                    FacultyRatingSum {
                        faculty_id,
                        faculty_name,
                        department,
                        rating_sum: rating_sum.unwrap_or_default(),
                        total_feedbacks,
                    }
                },
            )
            .collect())
    }

    async fn rating_counts(&self) -> Result<Vec<RatingCount>, AnalyticsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<(i16, i64)> = feedbacks::table
            .group_by(feedbacks::rating)
            .select((feedbacks::rating, count_star()))
            .order_by(feedbacks::rating.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows
            .into_iter()
            .map(|(rating, count)| RatingCount { rating, count })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_failures_map_to_connection() {
        let error = map_pool(super::super::pool::PoolError::checkout("timed out"));
        assert!(matches!(
            error,
            AnalyticsRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn diesel_failures_map_to_query() {
        let error = map_diesel(diesel::result::Error::NotFound);
        assert!(matches!(error, AnalyticsRepositoryError::Query { .. }));
    }
}
