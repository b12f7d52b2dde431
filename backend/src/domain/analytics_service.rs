//! Aggregation engine service.
//!
//! Adapters return raw grouped totals; the policy lives here: two-decimal
//! mean rounding, the zero-default statistics shape, top/bottom slicing over
//! a stable ranking, and the always-five-keys histogram.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AnalyticsRepository, AnalyticsRepositoryError, FacultyStatistics, FeedbackAnalytics,
    RankedFaculty, RatingDistribution, TopBottomFaculty,
};
use crate::domain::Error;

fn map_repository_error(error: AnalyticsRepositoryError) -> Error {
    match error {
        AnalyticsRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("analytics store unavailable: {message}"))
        }
        AnalyticsRepositoryError::Query { message } => {
            Error::internal(format!("analytics store error: {message}"))
        }
    }
}

/// Arithmetic mean rounded to two decimal places, as the frontend renders it.
fn mean_to_2dp(sum: i64, count: i64) -> f64 {
    let raw = sum as f64 / count as f64;
    (raw * 100.0).round() / 100.0
}

/// Aggregation use-cases over an analytics repository.
#[derive(Clone)]
pub struct AnalyticsService<R> {
    analytics_repo: Arc<R>,
}

impl<R> AnalyticsService<R> {
    /// Create a new aggregation service.
    pub fn new(analytics_repo: Arc<R>) -> Self {
        Self { analytics_repo }
    }
}

#[async_trait]
impl<R> FeedbackAnalytics for AnalyticsService<R>
where
    R: AnalyticsRepository,
{
    async fn statistics_for(&self, faculty_id: i32) -> Result<FacultyStatistics, Error> {
        let totals = self
            .analytics_repo
            .totals_for_faculty(faculty_id)
            .await
            .map_err(map_repository_error)?;

        if totals.total_feedbacks == 0 {
            return Ok(FacultyStatistics::EMPTY);
        }

        Ok(FacultyStatistics {
            total_feedbacks: totals.total_feedbacks,
            average_rating: mean_to_2dp(
                totals.rating_sum.unwrap_or_default(),
                totals.total_feedbacks,
            ),
            min_rating: totals.min_rating.unwrap_or_default(),
            max_rating: totals.max_rating.unwrap_or_default(),
        })
    }

    async fn top_bottom(&self, n: usize) -> Result<TopBottomFaculty, Error> {
        let sums = self
            .analytics_repo
            .rating_sums_by_faculty()
            .await
            .map_err(map_repository_error)?;

        let mut ranked: Vec<RankedFaculty> = sums
            .into_iter()
            .map(|entry| RankedFaculty {
                faculty_id: entry.faculty_id,
                faculty_name: entry.faculty_name,
                department: entry.department,
                average_rating: mean_to_2dp(entry.rating_sum, entry.total_feedbacks),
                total_feedbacks: entry.total_feedbacks,
            })
            .collect();
        // Stable sort over the id-ordered input: equal averages keep faculty
        // id order, so ranking is deterministic.
        ranked.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));

        let top: Vec<RankedFaculty> = ranked.iter().take(n).cloned().collect();
        // Last n of the descending ranking, reversed so the worst performer
        // comes first. For fewer than 2n ranked faculties the lists may
        // overlap, mirroring the slice(-n) behaviour the frontend expects.
        let bottom: Vec<RankedFaculty> = ranked.iter().rev().take(n).cloned().collect();

        Ok(TopBottomFaculty { top, bottom })
    }

    async fn rating_distribution(&self) -> Result<RatingDistribution, Error> {
        let counts = self
            .analytics_repo
            .rating_counts()
            .await
            .map_err(map_repository_error)?;

        let mut distribution: BTreeMap<i16, i64> = (1..=5).map(|rating| (rating, 0)).collect();
        for entry in counts {
            distribution.insert(entry.rating, entry.count);
        }
        Ok(RatingDistribution(distribution))
    }
}

#[cfg(test)]
#[path = "analytics_service_tests.rs"]
mod tests;
