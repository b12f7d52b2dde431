//! Driving port for the aggregation engine.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// Per-faculty statistics with the zero-default policy: every numeric field
/// reports `0` when no feedback exists (never null), because the frontend
/// renders these fields unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacultyStatistics {
    /// Number of feedback rows.
    pub total_feedbacks: i64,
    /// Arithmetic mean of ratings, rounded to two decimal places.
    pub average_rating: f64,
    /// Lowest rating.
    pub min_rating: i16,
    /// Highest rating.
    pub max_rating: i16,
}

impl FacultyStatistics {
    /// The all-zero statistics reported for a faculty with no feedback.
    pub const EMPTY: Self = Self {
        total_feedbacks: 0,
        average_rating: 0.0,
        min_rating: 0,
        max_rating: 0,
    };
}

/// One faculty's position in the average-rating ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFaculty {
    /// Faculty id.
    pub faculty_id: i32,
    /// Faculty display name.
    pub faculty_name: String,
    /// Faculty department.
    pub department: String,
    /// Mean rating, rounded to two decimal places.
    pub average_rating: f64,
    /// Number of feedback rows backing the average.
    pub total_feedbacks: i64,
}

/// Top and bottom performers by average rating. For small ranked sets the
/// lists may overlap or be shorter than requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopBottomFaculty {
    /// Best-performing faculties, highest average first.
    pub top: Vec<RankedFaculty>,
    /// Worst-performing faculties, lowest average first.
    pub bottom: Vec<RankedFaculty>,
}

/// System-wide histogram of ratings. All five keys are always present,
/// defaulting to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingDistribution(pub BTreeMap<i16, i64>);

impl RatingDistribution {
    /// Total number of feedback rows counted by the histogram.
    pub fn total(&self) -> i64 {
        self.0.values().sum()
    }
}

/// Port for anonymized aggregate reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackAnalytics: Send + Sync {
    /// Statistics for one faculty; all-zero when it has no feedback.
    async fn statistics_for(&self, faculty_id: i32) -> Result<FacultyStatistics, Error>;

    /// Top-n and bottom-n faculties by average rating; faculties with zero
    /// feedback are excluded from both lists.
    async fn top_bottom(&self, n: usize) -> Result<TopBottomFaculty, Error>;

    /// Histogram of every feedback row by rating value.
    async fn rating_distribution(&self) -> Result<RatingDistribution, Error>;
}

/// Fixture analytics for handler tests: an empty system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeedbackAnalytics;

#[async_trait]
impl FeedbackAnalytics for FixtureFeedbackAnalytics {
    async fn statistics_for(&self, _faculty_id: i32) -> Result<FacultyStatistics, Error> {
        Ok(FacultyStatistics::EMPTY)
    }

    async fn top_bottom(&self, _n: usize) -> Result<TopBottomFaculty, Error> {
        Ok(TopBottomFaculty {
            top: Vec::new(),
            bottom: Vec::new(),
        })
    }

    async fn rating_distribution(&self) -> Result<RatingDistribution, Error> {
        Ok(RatingDistribution((1..=5).map(|r| (r, 0)).collect()))
    }
}
