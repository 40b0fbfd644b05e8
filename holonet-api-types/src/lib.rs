//! Shared domain types for the Holonet GraphQL service
//!
//! These types describe what the repositories store. They are deliberately
//! independent of GraphQL so that storage and services can be tested without
//! a schema.

pub mod domain;
pub mod ids;

// Re-export main types for convenience
pub use domain::{
    CharacterKind, CharacterRecord, Entity, SaveBiological, SaveDroid, SaveStarship,
    StarshipRecord, TypeResolutionError,
};
pub use ids::EntityId;
