//! Larder backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, services,
//! and ports; `inbound` adapts HTTP traffic onto the domain; `outbound`
//! implements the driven ports; `server` assembles the application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request correlation middleware applied to every route.
pub use middleware::correlation::Correlation;
