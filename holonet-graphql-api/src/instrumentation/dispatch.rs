//! Batched loader dispatch

use async_graphql::extensions::ExtensionContext;
use async_graphql::{Request, Response};
use holonet_storage::{CharacterService, StarshipService};
use std::sync::Arc;
use tracing::debug;

use super::Instrumentation;
use crate::loaders::RequestLoaders;

/// Gives every request a fresh set of batch loaders
pub struct BatchDispatch {
    characters: Arc<CharacterService>,
    starships: Arc<StarshipService>,
    include_statistics: bool,
}

impl BatchDispatch {
    pub fn new(characters: Arc<CharacterService>, starships: Arc<StarshipService>) -> Self {
        Self {
            characters,
            starships,
            include_statistics: false,
        }
    }

    /// Report loader counters under `extensions.dataloader`
    pub fn with_statistics(mut self, include: bool) -> Self {
        self.include_statistics = include;
        self
    }
}

impl Instrumentation for BatchDispatch {
    fn name(&self) -> &'static str {
        "batch-dispatch"
    }

    fn prepare_request(&self, request: Request) -> Request {
        request.data(RequestLoaders::new(
            self.characters.clone(),
            self.starships.clone(),
        ))
    }

    fn finish(&self, ctx: &ExtensionContext<'_>, response: Response) -> Response {
        let Some(loaders) = ctx.data_opt::<RequestLoaders>() else {
            return response;
        };

        let characters = loaders.characters.statistics();
        let starships = loaders.starships.statistics();
        debug!(
            character_batches = characters.batch_count,
            character_keys = characters.keys_dispatched,
            starship_batches = starships.batch_count,
            starship_keys = starships.keys_dispatched,
            "Batch loader statistics"
        );

        if !self.include_statistics {
            return response;
        }
        let statistics = serde_json::json!({
            "characters": characters,
            "starships": starships,
        });
        match async_graphql::Value::from_json(statistics) {
            Ok(value) => response.extension("dataloader", value),
            Err(_) => response,
        }
    }
}
