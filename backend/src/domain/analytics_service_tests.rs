//! Behaviour coverage for the aggregation engine policies.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{
    FacultyRatingSum, MockAnalyticsRepository, RatingCount, RatingTotals,
};
use crate::domain::ErrorCode;

fn service_with(repo: MockAnalyticsRepository) -> AnalyticsService<MockAnalyticsRepository> {
    AnalyticsService::new(Arc::new(repo))
}

fn faculty_sum(id: i32, sum: i64, total: i64) -> FacultyRatingSum {
    FacultyRatingSum {
        faculty_id: id,
        faculty_name: format!("Faculty {id}"),
        department: "Computing".to_owned(),
        rating_sum: sum,
        total_feedbacks: total,
    }
}

#[tokio::test]
async fn statistics_for_empty_faculty_report_zeroes() {
    let mut repo = MockAnalyticsRepository::new();
    repo.expect_totals_for_faculty()
        .returning(|_| Ok(RatingTotals::default()));
    let service = service_with(repo);

    let stats = service.statistics_for(1).await.expect("statistics succeed");

    assert_eq!(stats.total_feedbacks, 0);
    assert_eq!(stats.average_rating, 0.0);
    assert_eq!(stats.min_rating, 0);
    assert_eq!(stats.max_rating, 0);
}

#[rstest]
#[case(10, 3, 3.33)]
#[case(11, 3, 3.67)]
#[case(7, 2, 3.5)]
#[case(5, 1, 5.0)]
#[tokio::test]
async fn average_is_rounded_to_two_decimals(
    #[case] sum: i64,
    #[case] count: i64,
    #[case] expected: f64,
) {
    let mut repo = MockAnalyticsRepository::new();
    repo.expect_totals_for_faculty().returning(move |_| {
        Ok(RatingTotals {
            total_feedbacks: count,
            rating_sum: Some(sum),
            min_rating: Some(1),
            max_rating: Some(5),
        })
    });
    let service = service_with(repo);

    let stats = service.statistics_for(1).await.expect("statistics succeed");

    assert_eq!(stats.average_rating, expected);
    assert_eq!(stats.total_feedbacks, count);
}

#[tokio::test]
async fn top_bottom_ranks_by_descending_average() {
    let mut repo = MockAnalyticsRepository::new();
    repo.expect_rating_sums_by_faculty().returning(|| {
        Ok(vec![
            faculty_sum(1, 6, 2),  // 3.0
            faculty_sum(2, 10, 2), // 5.0
            faculty_sum(3, 2, 2),  // 1.0
            faculty_sum(4, 8, 2),  // 4.0
            faculty_sum(5, 4, 2),  // 2.0
            faculty_sum(6, 9, 2),  // 4.5
            faculty_sum(7, 3, 2),  // 1.5
        ])
    });
    let service = service_with(repo);

    let ranking = service.top_bottom(3).await.expect("ranking succeeds");

    let top_ids: Vec<i32> = ranking.top.iter().map(|f| f.faculty_id).collect();
    assert_eq!(top_ids, vec![2, 6, 4]);
    let bottom_ids: Vec<i32> = ranking.bottom.iter().map(|f| f.faculty_id).collect();
    assert_eq!(bottom_ids, vec![3, 7, 5], "worst performer comes first");
}

#[tokio::test]
async fn top_bottom_overlap_for_small_ranked_sets() {
    let mut repo = MockAnalyticsRepository::new();
    repo.expect_rating_sums_by_faculty()
        .returning(|| Ok(vec![faculty_sum(1, 10, 2), faculty_sum(2, 4, 2)]));
    let service = service_with(repo);

    let ranking = service.top_bottom(3).await.expect("ranking succeeds");

    assert_eq!(ranking.top.len(), 2);
    assert_eq!(ranking.bottom.len(), 2);
    let top_ids: Vec<i32> = ranking.top.iter().map(|f| f.faculty_id).collect();
    let bottom_ids: Vec<i32> = ranking.bottom.iter().map(|f| f.faculty_id).collect();
    assert_eq!(top_ids, vec![1, 2]);
    assert_eq!(bottom_ids, vec![2, 1]);
}

#[tokio::test]
async fn top_bottom_ties_keep_faculty_id_order() {
    let mut repo = MockAnalyticsRepository::new();
    repo.expect_rating_sums_by_faculty().returning(|| {
        Ok(vec![
            faculty_sum(1, 8, 2), // 4.0
            faculty_sum(2, 4, 1), // 4.0
            faculty_sum(3, 2, 1), // 2.0
        ])
    });
    let service = service_with(repo);

    let ranking = service.top_bottom(2).await.expect("ranking succeeds");

    let top_ids: Vec<i32> = ranking.top.iter().map(|f| f.faculty_id).collect();
    assert_eq!(top_ids, vec![1, 2], "stable sort keeps id order on ties");
}

#[tokio::test]
async fn top_bottom_excludes_unranked_faculties() {
    // The repository contract already excludes zero-feedback faculties; the
    // service must not reintroduce them from anywhere.
    let mut repo = MockAnalyticsRepository::new();
    repo.expect_rating_sums_by_faculty()
        .returning(|| Ok(Vec::new()));
    let service = service_with(repo);

    let ranking = service.top_bottom(3).await.expect("ranking succeeds");

    assert!(ranking.top.is_empty());
    assert!(ranking.bottom.is_empty());
}

#[tokio::test]
async fn distribution_always_has_all_five_keys() {
    let mut repo = MockAnalyticsRepository::new();
    repo.expect_rating_counts().returning(|| {
        Ok(vec![
            RatingCount { rating: 5, count: 7 },
            RatingCount { rating: 2, count: 1 },
        ])
    });
    let service = service_with(repo);

    let distribution = service
        .rating_distribution()
        .await
        .expect("distribution succeeds");

    let keys: Vec<i16> = distribution.0.keys().copied().collect();
    assert_eq!(keys, vec![1, 2, 3, 4, 5]);
    assert_eq!(distribution.0.get(&5), Some(&7));
    assert_eq!(distribution.0.get(&2), Some(&1));
    assert_eq!(distribution.0.get(&1), Some(&0));
    assert_eq!(distribution.total(), 8);
}

#[tokio::test]
async fn repository_failures_map_to_error_codes() {
    let mut repo = MockAnalyticsRepository::new();
    repo.expect_rating_counts()
        .returning(|| Err(AnalyticsRepositoryError::connection("pool exhausted")));
    repo.expect_totals_for_faculty()
        .returning(|_| Err(AnalyticsRepositoryError::query("syntax error")));
    let service = service_with(repo);

    let transient = service
        .rating_distribution()
        .await
        .expect_err("connection failure surfaces");
    assert_eq!(transient.code(), ErrorCode::ServiceUnavailable);

    let internal = service
        .statistics_for(1)
        .await
        .expect_err("query failure surfaces");
    assert_eq!(internal.code(), ErrorCode::InternalError);
}
