//! GraphQL context types for dependency injection

use holonet_interfaces::RepositoryFactory;
use holonet_storage::{CharacterService, PilotIndex, StarshipService};
use std::sync::Arc;

/// Services shared by every resolver
#[derive(Clone)]
pub struct GraphQLContext {
    pub characters: Arc<CharacterService>,
    pub starships: Arc<StarshipService>,
}

impl GraphQLContext {
    pub fn new(characters: Arc<CharacterService>, starships: Arc<StarshipService>) -> Self {
        Self {
            characters,
            starships,
        }
    }

    /// Wire both services over one shared pilot index
    pub fn from_repositories(repositories: &dyn RepositoryFactory) -> Self {
        let pilots = Arc::new(PilotIndex::new());
        let starship_repository = repositories.starship_repository();
        Self {
            characters: Arc::new(CharacterService::new(
                repositories.character_repository(),
                starship_repository.clone(),
                pilots.clone(),
            )),
            starships: Arc::new(StarshipService::new(starship_repository, pilots)),
        }
    }
}

/// Configuration for GraphQL setup
#[derive(Debug, Clone)]
pub struct GraphQLConfig {
    pub max_query_depth: usize,
    pub max_query_complexity: usize,
    /// Assumed element count of list fields when costing a query
    pub list_size_estimate: usize,
    pub enable_introspection: bool,
    pub include_loader_statistics: bool,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            max_query_depth: 13,
            max_query_complexity: 100,
            list_size_estimate: 5,
            enable_introspection: true,
            include_loader_statistics: false,
        }
    }
}
