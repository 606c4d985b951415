//! Mount Cache
//!
//! Process-lifetime memoization of fetched records keyed by mount. Entries are
//! populated lazily on the first successful fetch and never expire. A failed
//! fetch leaves the mount absent so the next call retries every page.
//!
//! Concurrent misses for the same mount each run their own fetch and the last
//! completion wins, unless single-flight is enabled. With single-flight, misses
//! for a mount are serialized and later callers see the first caller's entry.

use async_trait::async_trait;
use jxpz_common::Record;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::page_fetcher::PageFetcher;
use crate::error::FetchError;

/// Shared, immutable record collection of one mount
pub type MountRecords = Arc<Vec<Record>>;

/// Backing storage for the mount cache
///
/// `clear` and `mounts` exist for inspection and tests; the cache itself never
/// evicts.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, mount: &str) -> Option<MountRecords>;

    async fn insert(&self, mount: String, records: MountRecords);

    async fn contains(&self, mount: &str) -> bool {
        self.get(mount).await.is_some()
    }

    async fn len(&self) -> usize;

    /// Cached mounts with their record counts, sorted by mount
    async fn mounts(&self) -> Vec<(String, usize)>;

    async fn clear(&self);
}

/// Unbounded in-memory store
#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, MountRecords>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for InMemoryStore {
    async fn get(&self, mount: &str) -> Option<MountRecords> {
        self.entries.read().await.get(mount).cloned()
    }

    async fn insert(&self, mount: String, records: MountRecords) {
        self.entries.write().await.insert(mount, records);
    }

    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    async fn mounts(&self) -> Vec<(String, usize)> {
        let mut mounts: Vec<(String, usize)> = self
            .entries
            .read()
            .await
            .iter()
            .map(|(mount, records)| (mount.clone(), records.len()))
            .collect();
        mounts.sort();
        mounts
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

/// Cache in front of the page fetcher
pub struct MountCache {
    fetcher: PageFetcher,
    store: Arc<dyn CacheStore>,
    single_flight: bool,
    mount_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MountCache {
    pub fn new(fetcher: PageFetcher, store: Arc<dyn CacheStore>) -> Self {
        Self {
            fetcher,
            store,
            single_flight: false,
            mount_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Enable or disable in-flight deduplication per mount
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.single_flight = enabled;
        self
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Cached records for `mount`, fetching and storing them on a miss
    pub async fn get_or_fetch(&self, mount: &str) -> Result<MountRecords, FetchError> {
        if let Some(records) = self.store.get(mount).await {
            debug!(mount = %mount, count = records.len(), "Mount cache hit");
            return Ok(records);
        }

        if !self.single_flight {
            return self.fetch_and_store(mount).await;
        }

        let lock = {
            let mut locks = self.mount_locks.lock().await;
            Arc::clone(locks.entry(mount.to_string()).or_default())
        };
        let _guard = lock.lock().await;

        // Another caller may have filled the entry while we waited.
        if let Some(records) = self.store.get(mount).await {
            debug!(mount = %mount, count = records.len(), "Mount cache hit after wait");
            return Ok(records);
        }

        self.fetch_and_store(mount).await
    }

    async fn fetch_and_store(&self, mount: &str) -> Result<MountRecords, FetchError> {
        debug!(mount = %mount, "Mount cache miss");

        let records: MountRecords = Arc::new(self.fetcher.fetch_all(mount).await?);
        self.store
            .insert(mount.to_string(), Arc::clone(&records))
            .await;

        info!(mount = %mount, count = records.len(), "Mount cached");
        Ok(records)
    }
}
