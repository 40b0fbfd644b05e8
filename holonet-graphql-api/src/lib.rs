//! GraphQL API for the Holonet character and starship service
//!
//! The schema is declared in `schema.graphqls` and bound to resolvers through
//! async-graphql derive macros; `wiring` refuses to build a schema whose
//! resolvers drift from that contract. Every request passes through the
//! instrumentation chain (complexity limit, depth limit, per-level batch
//! dispatch) before and during execution, and `engine` turns the outcome into
//! a `{ data, errors }` envelope.

pub mod context;
pub mod engine;
pub mod errors;
pub mod instrumentation;
pub mod loaders;
pub mod resolvers;
pub mod schema;
pub mod types;
pub mod wiring;

// Re-export main components
pub use context::{GraphQLConfig, GraphQLContext};
pub use engine::{ExecutionEngine, GraphQLPayload, ResultEnvelope};
pub use errors::{ConfigurationError, GraphQLError};
pub use resolvers::{Mutation, Query};
pub use schema::{build_schema, create_schema, StarWarsSchema};
pub use types::{Biological, Character, Droid, Starship};
