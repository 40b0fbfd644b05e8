//! Starship service

use holonet_api_types::{EntityId, SaveStarship, StarshipRecord};
use holonet_interfaces::StarshipRepository;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{IdSequence, PilotIndex};
use crate::error::ServiceResult;

pub struct StarshipService {
    starships: Arc<dyn StarshipRepository>,
    pilots: Arc<PilotIndex>,
    ids: IdSequence,
}

impl StarshipService {
    pub fn new(starships: Arc<dyn StarshipRepository>, pilots: Arc<PilotIndex>) -> Self {
        Self {
            starships,
            pilots,
            ids: IdSequence::new("s"),
        }
    }

    pub async fn get(&self, id: &EntityId) -> ServiceResult<Option<StarshipRecord>> {
        Ok(self.starships.get(id).await?)
    }

    pub async fn get_many(&self, ids: &[EntityId]) -> ServiceResult<Vec<StarshipRecord>> {
        Ok(self.starships.get_many(ids).await?)
    }

    pub async fn save(&self, request: SaveStarship) -> ServiceResult<StarshipRecord> {
        let id = match request.id {
            Some(id) => id,
            None => self.next_free_id().await?,
        };

        let saved = self
            .starships
            .save(StarshipRecord::new(id, request.name))
            .await?;
        info!(starship_id = %saved.id, "Saved starship");
        Ok(saved)
    }

    /// Remove a starship; absent ids are not an error.
    ///
    /// Pilots keep their `starship_id`, which resolves to nothing from now on.
    pub async fn delete_by_id(&self, id: &EntityId) -> ServiceResult<bool> {
        let removed = self.starships.delete_by_id(id).await?;
        let dangling = self.pilots.drop_starship(id).await;
        if !dangling.is_empty() {
            warn!(
                starship_id = %id,
                pilots = dangling.len(),
                "Deleted starship still referenced by pilots"
            );
        }
        if removed {
            info!(starship_id = %id, "Deleted starship");
        } else {
            debug!(starship_id = %id, "Starship already absent");
        }
        Ok(removed)
    }

    pub async fn delete_all(&self) -> ServiceResult<u64> {
        let removed = self.starships.delete_all().await?;
        self.pilots.clear().await;
        info!(removed, "Deleted all starships");
        Ok(removed)
    }

    async fn next_free_id(&self) -> ServiceResult<EntityId> {
        loop {
            let id = self.ids.next_id();
            if self.starships.get(&id).await?.is_none() {
                return Ok(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryRepository;
    use crate::services::CharacterService;
    use holonet_api_types::SaveBiological;
    use holonet_interfaces::CharacterRepository;

    struct Fixture {
        starships: StarshipService,
        characters: CharacterService,
        store: Arc<dyn StarshipRepository>,
        pilots: Arc<PilotIndex>,
    }

    fn fixture() -> Fixture {
        let store: Arc<dyn StarshipRepository> = Arc::new(InMemoryRepository::new());
        let character_repo: Arc<dyn CharacterRepository> = Arc::new(InMemoryRepository::new());
        let pilots = Arc::new(PilotIndex::new());
        Fixture {
            starships: StarshipService::new(store.clone(), pilots.clone()),
            characters: CharacterService::new(character_repo, store.clone(), pilots.clone()),
            store,
            pilots,
        }
    }

    fn starship(id: Option<&EntityId>, name: &str) -> SaveStarship {
        SaveStarship {
            id: id.cloned(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_upserts_by_id() {
        let f = fixture();
        let first = f.starships.save(starship(None, "X-Wing")).await.unwrap();
        f.starships
            .save(starship(Some(&first.id), "Red Five"))
            .await
            .unwrap();

        let all = f.store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Red Five");
    }

    #[tokio::test]
    async fn test_delete_leaves_pilot_reference_dangling() {
        let f = fixture();
        let falcon = f
            .starships
            .save(starship(None, "Millennium Falcon"))
            .await
            .unwrap();
        let han = f
            .characters
            .save_biological(SaveBiological {
                id: None,
                name: "Han".to_string(),
                friend_ids: vec![],
                starship_id: Some(falcon.id.clone()),
            })
            .await
            .unwrap();
        assert_eq!(f.pilots.pilots(&falcon.id).await, vec![han.id.clone()]);

        assert!(f.starships.delete_by_id(&falcon.id).await.unwrap());
        assert!(f.pilots.pilots(&falcon.id).await.is_empty());

        let stored = f.characters.get(&han.id).await.unwrap().unwrap();
        assert_eq!(stored.starship_id, Some(falcon.id));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_an_error() {
        let f = fixture();
        assert!(!f.starships.delete_by_id(&"s99".into()).await.unwrap());
        assert_eq!(f.starships.delete_all().await.unwrap(), 0);
    }
}
