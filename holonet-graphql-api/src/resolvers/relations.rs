//! Relationship fields shared by the character variants
//!
//! Both go through the request's batch loaders so sibling resolutions at one
//! level collapse into a single store lookup. A failure is recorded against
//! the field's own path and the field resolves to null, which keeps the
//! path intact when the parent was reached through the `Character` interface.

use async_graphql::{Context, Result};
use holonet_api_types::CharacterRecord;

use crate::errors::{field_error, GraphQLError};
use crate::loaders::RequestLoaders;
use crate::types::{Character, Starship};

/// Resolve `friend_ids` in order, dropping ids that no longer exist.
///
/// A friend whose variant cannot be resolved fails the whole list.
pub async fn friends(
    ctx: &Context<'_>,
    record: &CharacterRecord,
) -> Result<Option<Vec<Option<Character>>>> {
    let loaders = ctx.data::<RequestLoaders>()?;
    let mut found = match loaders.characters.load_many(&record.friend_ids).await {
        Ok(found) => found,
        Err(error) => return Ok(null_with_error(ctx, error)),
    };

    let mut friends = Vec::with_capacity(found.len());
    for id in &record.friend_ids {
        if let Some(friend) = found.remove(id) {
            match Character::try_from(friend) {
                Ok(friend) => friends.push(Some(friend)),
                Err(error) => return Ok(null_with_error(ctx, error)),
            }
        }
    }
    Ok(Some(friends))
}

/// Resolve the piloted starship; a dangling id resolves to null
pub async fn starship(ctx: &Context<'_>, record: &CharacterRecord) -> Result<Option<Starship>> {
    let Some(starship_id) = record.piloted_starship() else {
        return Ok(None);
    };

    let loaders = ctx.data::<RequestLoaders>()?;
    match loaders.starships.load_one(starship_id).await {
        Ok(starship) => Ok(starship.map(Starship::from)),
        Err(error) => Ok(null_with_error(ctx, error)),
    }
}

/// Record `error` at the current field and resolve the field to null
fn null_with_error<T>(ctx: &Context<'_>, error: impl Into<GraphQLError>) -> Option<T> {
    let error = field_error(error).into_server_error(ctx.item.pos);
    ctx.add_error(ctx.set_error_path(error));
    None
}
