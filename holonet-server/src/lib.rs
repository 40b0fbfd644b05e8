//! Holonet Server
//!
//! Serves the Star Wars GraphQL API over HTTP: configuration, logging,
//! service wiring and the axum application.

pub mod errors;
pub mod handlers;
pub mod services;
pub mod startup;

// Re-export main components
pub use errors::{WebError, WebResult};
pub use handlers::AppState;
pub use services::{init_logging, ServiceContainer};
pub use startup::Server;
