//! BitSlow marketplace backend.
//!
//! A hexagonal layout: `domain` holds the ledger model, services and ports;
//! `inbound::http` exposes them over actix-web; `outbound` implements the
//! driven ports on SQLite, argon2 and the thread RNG.

pub mod doc;
pub mod domain;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
