//! GraphQL type definitions

pub mod characters;
pub mod inputs;
pub mod starships;

pub use characters::*;
pub use inputs::*;
pub use starships::*;

use async_graphql::ID;
use holonet_api_types::EntityId;

pub(crate) fn entity_id(id: ID) -> EntityId {
    EntityId::from(id.0)
}

pub(crate) fn graphql_id(id: &EntityId) -> ID {
    ID(id.as_str().to_string())
}
