//! GraphQL mutation resolvers

use async_graphql::{Context, Object, Result, ID};

use crate::{
    context::GraphQLContext,
    errors::field_error,
    types::{entity_id, Biological, BiologicalInput, Droid, DroidInput, Starship, StarshipInput},
};

/// Root mutation resolver
pub struct Mutation;

#[Object]
impl Mutation {
    async fn save_droid_character(
        &self,
        ctx: &Context<'_>,
        input: DroidInput,
    ) -> Result<Option<Droid>> {
        let context = ctx.data::<GraphQLContext>()?;
        let saved = context
            .characters
            .save_droid(input.into())
            .await
            .map_err(field_error)?;
        Ok(Some(Droid::from_record(saved)))
    }

    /// Fails without storing anything when `starshipId` names no starship
    async fn save_biological_character(
        &self,
        ctx: &Context<'_>,
        input: BiologicalInput,
    ) -> Result<Option<Biological>> {
        let context = ctx.data::<GraphQLContext>()?;
        let saved = context
            .characters
            .save_biological(input.into())
            .await
            .map_err(field_error)?;
        Ok(Some(Biological::from_record(saved)))
    }

    async fn save_starship(
        &self,
        ctx: &Context<'_>,
        input: StarshipInput,
    ) -> Result<Option<Starship>> {
        let context = ctx.data::<GraphQLContext>()?;
        let saved = context
            .starships
            .save(input.into())
            .await
            .map_err(field_error)?;
        Ok(Some(saved.into()))
    }

    /// Always true once the character is gone, whether or not it existed
    async fn delete_character_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Option<bool>> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .characters
            .delete_by_id(&entity_id(id))
            .await
            .map_err(field_error)?;
        Ok(Some(true))
    }

    async fn delete_all_characters(&self, ctx: &Context<'_>) -> Result<Option<bool>> {
        let context = ctx.data::<GraphQLContext>()?;
        context.characters.delete_all().await.map_err(field_error)?;
        Ok(Some(true))
    }

    /// Always true once the starship is gone, whether or not it existed
    async fn delete_starship_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Option<bool>> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .starships
            .delete_by_id(&entity_id(id))
            .await
            .map_err(field_error)?;
        Ok(Some(true))
    }

    async fn delete_all_starships(&self, ctx: &Context<'_>) -> Result<Option<bool>> {
        let context = ctx.data::<GraphQLContext>()?;
        context.starships.delete_all().await.map_err(field_error)?;
        Ok(Some(true))
    }
}
