//! Character service

use holonet_api_types::{CharacterRecord, EntityId, SaveBiological, SaveDroid};
use holonet_interfaces::{CharacterRepository, StarshipRepository};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use super::{IdSequence, PilotIndex};
use crate::error::{ServiceError, ServiceResult};

pub struct CharacterService {
    characters: Arc<dyn CharacterRepository>,
    starships: Arc<dyn StarshipRepository>,
    pilots: Arc<PilotIndex>,
    ids: IdSequence,
}

impl CharacterService {
    pub fn new(
        characters: Arc<dyn CharacterRepository>,
        starships: Arc<dyn StarshipRepository>,
        pilots: Arc<PilotIndex>,
    ) -> Self {
        Self {
            characters,
            starships,
            pilots,
            ids: IdSequence::new("c"),
        }
    }

    pub async fn get(&self, id: &EntityId) -> ServiceResult<Option<CharacterRecord>> {
        Ok(self.characters.get(id).await?)
    }

    pub async fn get_many(&self, ids: &[EntityId]) -> ServiceResult<Vec<CharacterRecord>> {
        Ok(self.characters.get_many(ids).await?)
    }

    pub async fn save_droid(&self, request: SaveDroid) -> ServiceResult<CharacterRecord> {
        let id = self.resolve_id(request.id).await?;
        validate_friends(&id, &request.friend_ids)?;

        let saved = self
            .characters
            .save(CharacterRecord::droid(
                id,
                request.name,
                request.friend_ids,
            ))
            .await?;
        // A droid may replace a former pilot stored under the same id
        self.pilots.unlink(&saved.id).await;

        info!(character_id = %saved.id, "Saved droid character");
        Ok(saved)
    }

    /// Save a biological character.
    ///
    /// Nothing is stored when `starship_id` names a starship that does not exist.
    pub async fn save_biological(&self, request: SaveBiological) -> ServiceResult<CharacterRecord> {
        if let Some(starship_id) = &request.starship_id {
            if self.starships.get(starship_id).await?.is_none() {
                return Err(ServiceError::Reference {
                    entity: "Starship",
                    id: starship_id.clone(),
                });
            }
        }

        let id = self.resolve_id(request.id).await?;
        validate_friends(&id, &request.friend_ids)?;

        let saved = self
            .characters
            .save(CharacterRecord::biological(
                id,
                request.name,
                request.friend_ids,
                request.starship_id,
            ))
            .await?;
        self.pilots
            .link(&saved.id, saved.starship_id.as_ref())
            .await;

        info!(
            character_id = %saved.id,
            starship_id = ?saved.starship_id,
            "Saved biological character"
        );
        Ok(saved)
    }

    /// Remove a character; absent ids are not an error.
    ///
    /// Other characters keep the id in their `friend_ids`.
    pub async fn delete_by_id(&self, id: &EntityId) -> ServiceResult<bool> {
        let removed = self.characters.delete_by_id(id).await?;
        if removed {
            self.pilots.unlink(id).await;
            info!(character_id = %id, "Deleted character");
        } else {
            debug!(character_id = %id, "Character already absent");
        }
        Ok(removed)
    }

    pub async fn delete_all(&self) -> ServiceResult<u64> {
        let removed = self.characters.delete_all().await?;
        self.pilots.clear().await;
        info!(removed, "Deleted all characters");
        Ok(removed)
    }

    async fn resolve_id(&self, requested: Option<EntityId>) -> ServiceResult<EntityId> {
        if let Some(id) = requested {
            return Ok(id);
        }
        loop {
            let id = self.ids.next_id();
            if self.characters.get(&id).await?.is_none() {
                return Ok(id);
            }
        }
    }
}

fn validate_friends(id: &EntityId, friend_ids: &[EntityId]) -> ServiceResult<()> {
    let mut seen = HashSet::with_capacity(friend_ids.len());
    for friend in friend_ids {
        if friend == id {
            return Err(ServiceError::validation(format!(
                "Character {} cannot be its own friend",
                id
            )));
        }
        if !seen.insert(friend) {
            return Err(ServiceError::validation(format!(
                "Friend {} is listed more than once",
                friend
            )));
        }
    }
    Ok(())
}
