//! GraphQL type for starships

use async_graphql::{SimpleObject, ID};
use holonet_api_types::StarshipRecord;

use super::graphql_id;

#[derive(SimpleObject, Debug, Clone)]
pub struct Starship {
    pub id: ID,
    pub name: String,
}

impl From<StarshipRecord> for Starship {
    fn from(record: StarshipRecord) -> Self {
        Self {
            id: graphql_id(&record.id),
            name: record.name,
        }
    }
}
