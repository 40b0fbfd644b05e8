//! Domain-driven configuration management for Holonet
//!
//! Configuration is split by functional domain (server, GraphQL execution,
//! logging), each with its own defaults and validation, and can be loaded
//! from YAML with environment variable overrides.

pub mod error;
pub mod loader;
pub mod validation;

pub mod domains;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

pub use domains::{
    graphql::GraphQLConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    server::ServerConfig,
    HolonetConfig,
};
