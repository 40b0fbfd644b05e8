//! Mutation input types

use async_graphql::{InputObject, ID};
use holonet_api_types::{SaveBiological, SaveDroid, SaveStarship};

use super::entity_id;

/// Insert a droid, or replace the character stored under `id`
#[derive(InputObject)]
#[graphql(rename_fields = "camelCase")]
pub struct DroidInput {
    pub id: Option<ID>,
    pub name: String,
    pub friend_ids: Option<Vec<ID>>,
}

impl From<DroidInput> for SaveDroid {
    fn from(input: DroidInput) -> Self {
        Self {
            id: input.id.map(entity_id),
            name: input.name,
            friend_ids: input
                .friend_ids
                .unwrap_or_default()
                .into_iter()
                .map(entity_id)
                .collect(),
        }
    }
}

/// Insert a biological character, or replace the character stored under `id`
#[derive(InputObject)]
#[graphql(rename_fields = "camelCase")]
pub struct BiologicalInput {
    pub id: Option<ID>,
    pub name: String,
    pub friend_ids: Option<Vec<ID>>,
    /// Must name an existing starship
    pub starship_id: Option<ID>,
}

impl From<BiologicalInput> for SaveBiological {
    fn from(input: BiologicalInput) -> Self {
        Self {
            id: input.id.map(entity_id),
            name: input.name,
            friend_ids: input
                .friend_ids
                .unwrap_or_default()
                .into_iter()
                .map(entity_id)
                .collect(),
            starship_id: input.starship_id.map(entity_id),
        }
    }
}

#[derive(InputObject)]
pub struct StarshipInput {
    pub id: Option<ID>,
    pub name: String,
}

impl From<StarshipInput> for SaveStarship {
    fn from(input: StarshipInput) -> Self {
        Self {
            id: input.id.map(entity_id),
            name: input.name,
        }
    }
}
