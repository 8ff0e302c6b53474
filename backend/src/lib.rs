//! Sample posts CRUD backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod startup;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
