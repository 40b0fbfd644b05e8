//! Repository interfaces
//!
//! Each operation is atomic with respect to itself. Nothing here promises
//! linearizability across operations; the services above decide how
//! multi-step changes are ordered.

use async_trait::async_trait;
use holonet_api_types::{CharacterRecord, EntityId, StarshipRecord};
use std::sync::Arc;

/// Common repository error type
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("Internal storage error: {message}")]
    Internal { message: String },
}

/// Base repository trait with health check capability
#[async_trait]
pub trait Repository: Send + Sync {
    /// Check if the repository is healthy and can serve requests
    async fn health_check(&self) -> Result<(), RepositoryError>;
}

/// Key-value store of one entity type
#[async_trait]
pub trait CrudRepository<T>: Repository {
    /// Find entity by id
    async fn get(&self, id: &EntityId) -> Result<Option<T>, RepositoryError>;

    /// Find every entity whose id is in `ids`; missing ids are skipped
    async fn get_many(&self, ids: &[EntityId]) -> Result<Vec<T>, RepositoryError>;

    /// All stored entities
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError>;

    /// Insert or replace by id, returning the stored entity
    async fn save(&self, entity: T) -> Result<T, RepositoryError>;

    /// Remove by id, returning whether anything was removed
    async fn delete_by_id(&self, id: &EntityId) -> Result<bool, RepositoryError>;

    /// Remove everything, returning the number of removed entities
    async fn delete_all(&self) -> Result<u64, RepositoryError>;
}

/// Character repository interface
pub trait CharacterRepository: CrudRepository<CharacterRecord> {}

impl<T: CrudRepository<CharacterRecord>> CharacterRepository for T {}

/// Starship repository interface
pub trait StarshipRepository: CrudRepository<StarshipRecord> {}

impl<T: CrudRepository<StarshipRecord>> StarshipRepository for T {}

/// Hands out the process-wide repositories
pub trait RepositoryFactory: Send + Sync {
    fn character_repository(&self) -> Arc<dyn CharacterRepository>;

    fn starship_repository(&self) -> Arc<dyn StarshipRepository>;
}
