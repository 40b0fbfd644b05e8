//! Process-wide in-memory stores

use async_trait::async_trait;
use holonet_api_types::{CharacterRecord, Entity, EntityId, StarshipRecord};
use holonet_interfaces::{
    CharacterRepository, CrudRepository, Repository, RepositoryError, RepositoryFactory,
    StarshipRepository,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Key-value store of one entity type guarded by a single lock
pub struct InMemoryRepository<T> {
    entities: RwLock<BTreeMap<EntityId, T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository for InMemoryRepository<T> {
    async fn health_check(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[async_trait]
impl<T: Entity> CrudRepository<T> for InMemoryRepository<T> {
    async fn get(&self, id: &EntityId) -> Result<Option<T>, RepositoryError> {
        Ok(self.entities.read().await.get(id).cloned())
    }

    async fn get_many(&self, ids: &[EntityId]) -> Result<Vec<T>, RepositoryError> {
        let entities = self.entities.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| entities.get(id).cloned())
            .collect())
    }

    async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.entities.read().await.values().cloned().collect())
    }

    async fn save(&self, entity: T) -> Result<T, RepositoryError> {
        self.entities
            .write()
            .await
            .insert(entity.id().clone(), entity.clone());
        Ok(entity)
    }

    async fn delete_by_id(&self, id: &EntityId) -> Result<bool, RepositoryError> {
        Ok(self.entities.write().await.remove(id).is_some())
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let mut entities = self.entities.write().await;
        let removed = entities.len() as u64;
        entities.clear();
        Ok(removed)
    }
}

/// Factory holding one store per entity type
#[derive(Clone, Default)]
pub struct InMemoryRepositoryFactory {
    characters: Arc<InMemoryRepository<CharacterRecord>>,
    starships: Arc<InMemoryRepository<StarshipRecord>>,
}

impl InMemoryRepositoryFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryFactory for InMemoryRepositoryFactory {
    fn character_repository(&self) -> Arc<dyn CharacterRepository> {
        self.characters.clone()
    }

    fn starship_repository(&self) -> Arc<dyn StarshipRepository> {
        self.starships.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starship(id: &str, name: &str) -> StarshipRecord {
        StarshipRecord::new(id.into(), name)
    }

    #[tokio::test]
    async fn test_save_is_upsert() {
        let repo = InMemoryRepository::new();
        repo.save(starship("s1", "X-Wing")).await.unwrap();
        repo.save(starship("s1", "Red Five")).await.unwrap();

        assert_eq!(repo.get_all().await.unwrap().len(), 1);
        let stored = repo.get(&"s1".into()).await.unwrap().unwrap();
        assert_eq!(stored.name, "Red Five");
    }

    #[tokio::test]
    async fn test_get_many_preserves_request_order_and_skips_missing() {
        let repo = InMemoryRepository::new();
        repo.save(starship("s1", "X-Wing")).await.unwrap();
        repo.save(starship("s2", "Millennium Falcon"))
            .await
            .unwrap();

        let found = repo
            .get_many(&["s2".into(), "s404".into(), "s1".into()])
            .await
            .unwrap();
        let names: Vec<_> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Millennium Falcon", "X-Wing"]);
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let repo = InMemoryRepository::new();
        repo.save(starship("s1", "X-Wing")).await.unwrap();

        assert!(repo.delete_by_id(&"s1".into()).await.unwrap());
        assert!(!repo.delete_by_id(&"s1".into()).await.unwrap());
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_all_counts() {
        let repo = InMemoryRepository::new();
        repo.save(starship("s1", "X-Wing")).await.unwrap();
        repo.save(starship("s2", "TIE Fighter")).await.unwrap();

        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert_eq!(repo.delete_all().await.unwrap(), 0);
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_factory_shares_stores() {
        let factory = InMemoryRepositoryFactory::new();
        factory
            .starship_repository()
            .save(starship("s1", "X-Wing"))
            .await
            .unwrap();

        let again = factory
            .starship_repository()
            .get(&"s1".into())
            .await
            .unwrap();
        assert!(again.is_some());
    }
}
