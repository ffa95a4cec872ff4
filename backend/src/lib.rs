//! Appointment booking backend.
//!
//! Customers sign up, browse service providers, check their availability and
//! book one-hour slots; providers review their daily schedule. The crate is
//! laid out hexagonally: [`domain`] holds the rules and ports, [`inbound`]
//! the Actix HTTP adapter, and [`outbound`] the persistence, cache, mail,
//! storage and hashing adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
