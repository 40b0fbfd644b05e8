//! GraphQL query resolvers

use async_graphql::{Context, Object, Result, ID};

use crate::{
    context::GraphQLContext,
    errors::field_error,
    types::{entity_id, Character, Starship},
};

/// Root query resolver
pub struct Query;

#[Object]
impl Query {
    /// A character by id, or null when absent
    async fn get_character_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Character>> {
        let context = ctx.data::<GraphQLContext>()?;
        let record = context
            .characters
            .get(&entity_id(id))
            .await
            .map_err(field_error)?;

        match record {
            Some(record) => Ok(Some(Character::try_from(record).map_err(field_error)?)),
            None => Ok(None),
        }
    }

    /// A starship by id, or null when absent
    async fn get_starship_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Starship>> {
        let context = ctx.data::<GraphQLContext>()?;
        let record = context
            .starships
            .get(&entity_id(id))
            .await
            .map_err(field_error)?;
        Ok(record.map(Starship::from))
    }
}
