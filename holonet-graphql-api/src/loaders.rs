//! Per-request batch loaders
//!
//! Each `BatchLoader` wraps an async-graphql `DataLoader`. Keys requested
//! within one batching window are collected and sent to the store as a single
//! `get_many`, so sibling resolutions at one selection level cost one lookup
//! per entity type. The window opens on the first key and closes after
//! `BATCH_WINDOW`. Nothing is cached between windows.

use async_graphql::dataloader::{DataLoader, Loader};
use async_trait::async_trait;
use holonet_api_types::{CharacterRecord, Entity, EntityId, StarshipRecord};
use holonet_storage::{CharacterService, ServiceError, ServiceResult, StarshipService};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// How long a batch stays open for more keys after its first one
pub const BATCH_WINDOW: Duration = Duration::from_millis(1);

/// Backing store lookup for many keys at once
#[async_trait]
pub trait BatchFetch: Send + Sync + 'static {
    type Value: Clone + Send + Sync + 'static;

    /// Entity type name used in logs
    fn entity(&self) -> &'static str;

    /// Fetch every key that exists; absent keys are simply missing from the map
    async fn fetch(&self, keys: &[EntityId]) -> ServiceResult<HashMap<EntityId, Self::Value>>;
}

fn index_by_id<T: Entity>(entities: Vec<T>) -> HashMap<EntityId, T> {
    entities
        .into_iter()
        .map(|entity| (entity.id().clone(), entity))
        .collect()
}

#[async_trait]
impl BatchFetch for CharacterService {
    type Value = CharacterRecord;

    fn entity(&self) -> &'static str {
        "Character"
    }

    async fn fetch(&self, keys: &[EntityId]) -> ServiceResult<HashMap<EntityId, CharacterRecord>> {
        Ok(index_by_id(self.get_many(keys).await?))
    }
}

#[async_trait]
impl BatchFetch for StarshipService {
    type Value = StarshipRecord;

    fn entity(&self) -> &'static str {
        "Starship"
    }

    async fn fetch(&self, keys: &[EntityId]) -> ServiceResult<HashMap<EntityId, StarshipRecord>> {
        Ok(index_by_id(self.get_many(keys).await?))
    }
}

/// Counters for one loader over one request
#[derive(Debug, Default)]
pub struct LoaderStatistics {
    loads: AtomicU64,
    keys_requested: AtomicU64,
    batches: AtomicU64,
    keys_dispatched: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub load_count: u64,
    pub keys_requested: u64,
    pub batch_count: u64,
    pub keys_dispatched: u64,
}

impl LoaderStatistics {
    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            load_count: self.loads.load(Ordering::Relaxed),
            keys_requested: self.keys_requested.load(Ordering::Relaxed),
            batch_count: self.batches.load(Ordering::Relaxed),
            keys_dispatched: self.keys_dispatched.load(Ordering::Relaxed),
        }
    }

    fn record_load(&self, keys: usize) {
        self.loads.fetch_add(1, Ordering::Relaxed);
        self.keys_requested
            .fetch_add(keys as u64, Ordering::Relaxed);
    }

    fn record_dispatch(&self, keys: usize) {
        self.batches.fetch_add(1, Ordering::Relaxed);
        self.keys_dispatched
            .fetch_add(keys as u64, Ordering::Relaxed);
    }
}

/// `Loader` side of a `BatchLoader`: receives the deduplicated keys of one window
struct Dispatcher<F> {
    fetcher: Arc<F>,
    statistics: Arc<LoaderStatistics>,
}

impl<F: BatchFetch> Loader<EntityId> for Dispatcher<F> {
    type Value = F::Value;
    type Error = ServiceError;

    async fn load(&self, keys: &[EntityId]) -> Result<HashMap<EntityId, F::Value>, ServiceError> {
        self.statistics.record_dispatch(keys.len());
        debug!(
            entity = self.fetcher.entity(),
            keys = keys.len(),
            "Dispatching batch"
        );
        self.fetcher.fetch(keys).await
    }
}

pub struct BatchLoader<F: BatchFetch> {
    inner: DataLoader<Dispatcher<F>>,
    statistics: Arc<LoaderStatistics>,
}

impl<F: BatchFetch> BatchLoader<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        let statistics = Arc::new(LoaderStatistics::default());
        let dispatcher = Dispatcher {
            fetcher,
            statistics: statistics.clone(),
        };
        Self {
            inner: DataLoader::new(dispatcher, tokio::spawn).delay(BATCH_WINDOW),
            statistics,
        }
    }

    pub fn statistics(&self) -> StatisticsSnapshot {
        self.statistics.snapshot()
    }

    pub async fn load_one(&self, key: &EntityId) -> ServiceResult<Option<F::Value>> {
        let mut found = self.load_many(std::slice::from_ref(key)).await?;
        Ok(found.remove(key))
    }

    /// Load `keys` as part of the currently open batch
    pub async fn load_many(&self, keys: &[EntityId]) -> ServiceResult<HashMap<EntityId, F::Value>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        self.statistics.record_load(keys.len());
        self.inner.load_many(keys.iter().cloned()).await
    }
}

/// The loaders of one request
pub struct RequestLoaders {
    pub characters: BatchLoader<CharacterService>,
    pub starships: BatchLoader<StarshipService>,
}

impl RequestLoaders {
    pub fn new(characters: Arc<CharacterService>, starships: Arc<StarshipService>) -> Self {
        Self {
            characters: BatchLoader::new(characters),
            starships: BatchLoader::new(starships),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::join_all;
    use std::sync::atomic::AtomicUsize;

    /// Serves `c<n>` for every n below 100 and counts fetches
    struct Numbered {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl BatchFetch for Numbered {
        type Value = String;

        fn entity(&self) -> &'static str {
            "Numbered"
        }

        async fn fetch(&self, keys: &[EntityId]) -> ServiceResult<HashMap<EntityId, String>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(keys
                .iter()
                .filter(|key| {
                    key.as_str()
                        .strip_prefix('c')
                        .and_then(|n| n.parse::<u32>().ok())
                        .is_some_and(|n| n < 100)
                })
                .map(|key| (key.clone(), format!("value of {}", key)))
                .collect())
        }
    }

    fn loader() -> (Arc<Numbered>, BatchLoader<Numbered>) {
        let fetcher = Arc::new(Numbered {
            fetches: AtomicUsize::new(0),
        });
        (fetcher.clone(), BatchLoader::new(fetcher))
    }

    fn ids(raw: &[&str]) -> Vec<EntityId> {
        raw.iter().map(|id| EntityId::from(*id)).collect()
    }

    #[tokio::test]
    async fn test_siblings_share_one_fetch() {
        let (fetcher, loader) = loader();
        let requests = [ids(&["c1", "c2"]), ids(&["c2", "c3"]), ids(&["c4"])];

        let results = join_all(requests.iter().map(|keys| loader.load_many(keys))).await;

        assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 1);
        let stats = loader.statistics();
        assert_eq!(stats.batch_count, 1);
        assert_eq!(stats.load_count, 3);
        assert_eq!(stats.keys_requested, 5);
        assert_eq!(stats.keys_dispatched, 4);

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[&EntityId::from("c3")], "value of c3");
    }

    #[tokio::test]
    async fn test_loads_from_separate_tasks_share_a_window() {
        let (fetcher, loader) = loader();
        let loader = Arc::new(loader);

        let tasks: Vec<_> = ["c1", "c2", "c3"]
            .into_iter()
            .map(|id| {
                let loader = loader.clone();
                tokio::spawn(async move { loader.load_one(&id.into()).await })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().unwrap().is_some());
        }

        assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(loader.statistics().keys_dispatched, 3);
    }

    #[tokio::test]
    async fn test_sequential_loads_are_not_cached() {
        let (fetcher, loader) = loader();

        loader.load_one(&"c1".into()).await.unwrap();
        loader.load_one(&"c1".into()).await.unwrap();

        assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(loader.statistics().batch_count, 2);
    }

    #[tokio::test]
    async fn test_absent_keys_are_missing() {
        let (_, loader) = loader();

        assert_eq!(loader.load_one(&"c500".into()).await.unwrap(), None);
        let found = loader.load_many(&ids(&["c1", "c500"])).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_request_skips_fetch() {
        let (fetcher, loader) = loader();

        assert!(loader.load_many(&[]).await.unwrap().is_empty());
        assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 0);
        assert_eq!(loader.statistics().load_count, 0);
    }
}
