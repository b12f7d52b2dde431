//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.

pub mod diesel_account_repository;
pub mod diesel_analytics_repository;
pub mod diesel_faculty_directory;
pub mod diesel_feedback_repository;
pub(crate) mod error_map;
pub(crate) mod models;
pub mod pool;
pub mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_analytics_repository::DieselAnalyticsRepository;
pub use diesel_faculty_directory::DieselFacultyDirectory;
pub use diesel_feedback_repository::DieselFeedbackRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
