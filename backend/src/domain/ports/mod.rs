//! Domain ports: driving use-case traits consumed by inbound adapters, and
//! driven storage traits implemented by outbound adapters.

pub mod account_repository;
pub mod analytics_repository;
pub mod faculty_directory;
pub mod feedback_analytics;
pub mod feedback_ledger;
pub mod feedback_repository;
pub mod identity;
pub(crate) mod macros;

pub use account_repository::{
    AccountCredentials, AccountRepository, AccountRepositoryError, FixtureAccountRepository,
};
pub use analytics_repository::{
    AnalyticsRepository, AnalyticsRepositoryError, FacultyRatingSum, FixtureAnalyticsRepository,
    RatingCount, RatingTotals,
};
pub use faculty_directory::{FacultyDirectory, FacultyDirectoryError, FixtureFacultyDirectory};
pub use feedback_analytics::{
    FacultyStatistics, FeedbackAnalytics, FixtureFeedbackAnalytics, RankedFaculty,
    RatingDistribution, TopBottomFaculty,
};
pub use feedback_ledger::{
    FeedbackLedger, FixtureFeedbackLedger, SubmitFeedbackRequest, UpdateFeedbackRequest,
};
pub use feedback_repository::{
    AnonymizedFeedback, FacultyFeedbackStatus, FeedbackRepository, FeedbackRepositoryError,
    FixtureFeedbackRepository, NewFeedback, StudentFeedbackEntry,
};
pub use identity::{
    AuthSession, FixtureIdentityService, IdentityService, LoginRequest, RegisterRequest,
};

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(test)]
pub use faculty_directory::MockFacultyDirectory;
#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
