//! # Holonet Interfaces
//!
//! Repository contracts shared by the storage layer and the GraphQL API.
//! The API only ever talks to these traits, so tests can swap the in-memory
//! stores for doubles that count or forbid calls.

pub mod database;

// Re-export commonly used types
pub use database::{
    CharacterRepository, CrudRepository, Repository, RepositoryError, RepositoryFactory,
    StarshipRepository,
};
