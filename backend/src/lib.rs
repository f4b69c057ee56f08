//! Backend library modules.
//!
//! The binary in `main.rs` wires these into an Actix server; integration
//! tests drive the same handlers against in-memory adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
