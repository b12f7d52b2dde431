//! Anonymous course-feedback backend.
//!
//! Students rate faculty members and manage their own submissions;
//! administrators read aggregated, anonymized feedback. The crate follows a
//! hexagonal layout: `domain` holds entities, services, and ports; `inbound`
//! adapts HTTP onto the driving ports; `outbound` adapts the driven ports
//! onto PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware re-exported for server wiring.
pub use middleware::trace::Trace;
