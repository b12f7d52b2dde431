//! Domain entities, services, and ports.
//!
//! Purpose: keep every business rule of the feedback system (rating ranges,
//! comment limits, the one-submission-per-(student, faculty) invariant, and
//! the anonymization guarantees) transport- and storage-agnostic. Inbound
//! adapters translate HTTP onto the driving ports; outbound adapters
//! implement the driven ports over PostgreSQL.

pub mod account;
pub mod analytics_service;
pub mod error;
pub mod faculty;
pub mod feedback;
pub mod identity_service;
pub mod ledger_service;
pub mod ports;
pub mod principal;

pub use self::account::{Account, NewAccount};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::faculty::Faculty;
pub use self::feedback::{Comments, FeedbackValidationError, Rating};
pub use self::principal::{Principal, Role, RoleParseError, UserId};
