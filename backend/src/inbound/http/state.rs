//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FacultyDirectory, FeedbackAnalytics, FeedbackLedger, IdentityService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Identity collaborator: registration, login, bearer verification.
    pub identity: Arc<dyn IdentityService>,
    /// Feedback ledger use-cases.
    pub ledger: Arc<dyn FeedbackLedger>,
    /// Aggregation engine use-cases.
    pub analytics: Arc<dyn FeedbackAnalytics>,
    /// Read-only faculty directory.
    pub faculties: Arc<dyn FacultyDirectory>,
}
