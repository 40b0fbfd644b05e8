//! Mock repository implementations using mockall

use async_trait::async_trait;
use holonet_api_types::{CharacterRecord, EntityId, StarshipRecord};
use holonet_interfaces::{CrudRepository, Repository, RepositoryError};
use mockall::mock;

mock! {
    pub CharacterRepo {}

    #[async_trait]
    impl Repository for CharacterRepo {
        async fn health_check(&self) -> Result<(), RepositoryError>;
    }

    #[async_trait]
    impl CrudRepository<CharacterRecord> for CharacterRepo {
        async fn get(&self, id: &EntityId) -> Result<Option<CharacterRecord>, RepositoryError>;
        async fn get_many(&self, ids: &[EntityId]) -> Result<Vec<CharacterRecord>, RepositoryError>;
        async fn get_all(&self) -> Result<Vec<CharacterRecord>, RepositoryError>;
        async fn save(&self, entity: CharacterRecord) -> Result<CharacterRecord, RepositoryError>;
        async fn delete_by_id(&self, id: &EntityId) -> Result<bool, RepositoryError>;
        async fn delete_all(&self) -> Result<u64, RepositoryError>;
    }
}

mock! {
    pub StarshipRepo {}

    #[async_trait]
    impl Repository for StarshipRepo {
        async fn health_check(&self) -> Result<(), RepositoryError>;
    }

    #[async_trait]
    impl CrudRepository<StarshipRecord> for StarshipRepo {
        async fn get(&self, id: &EntityId) -> Result<Option<StarshipRecord>, RepositoryError>;
        async fn get_many(&self, ids: &[EntityId]) -> Result<Vec<StarshipRecord>, RepositoryError>;
        async fn get_all(&self) -> Result<Vec<StarshipRecord>, RepositoryError>;
        async fn save(&self, entity: StarshipRecord) -> Result<StarshipRecord, RepositoryError>;
        async fn delete_by_id(&self, id: &EntityId) -> Result<bool, RepositoryError>;
        async fn delete_all(&self) -> Result<u64, RepositoryError>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{CharacterService, PilotIndex};
    use holonet_interfaces::{CharacterRepository, StarshipRepository};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_repository_failure_surfaces_as_service_error() {
        let mut characters = MockCharacterRepo::new();
        characters.expect_get().times(1).returning(|_| {
            Err(RepositoryError::Unavailable {
                message: "store offline".to_string(),
            })
        });
        let characters: Arc<dyn CharacterRepository> = Arc::new(characters);
        let starships: Arc<dyn StarshipRepository> = Arc::new(MockStarshipRepo::new());

        let service = CharacterService::new(characters, starships, Arc::new(PilotIndex::new()));
        let err = service.get(&"c1".into()).await.unwrap_err();
        assert!(err.to_string().contains("store offline"));
    }

    #[tokio::test]
    async fn test_missing_starship_never_touches_character_store() {
        let mut starships = MockStarshipRepo::new();
        starships.expect_get().times(1).returning(|_| Ok(None));
        let mut characters = MockCharacterRepo::new();
        characters.expect_save().never();
        characters.expect_get().never();

        let service = CharacterService::new(
            Arc::new(characters),
            Arc::new(starships),
            Arc::new(PilotIndex::new()),
        );
        let request = holonet_api_types::SaveBiological {
            id: None,
            name: "Luke".to_string(),
            friend_ids: vec![],
            starship_id: Some("nonexistent".into()),
        };
        assert!(service.save_biological(request).await.is_err());
    }
}
