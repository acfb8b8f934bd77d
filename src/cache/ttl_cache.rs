//! TTL Cache
//!
//! A [`CacheStore`] bundled with the reaper that keeps it trimmed.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::{spawn_reaper, ReaperHandle};

// == TTL Cache ==
/// Byte cache whose entries expire `ttl` after insertion.
///
/// Construct one per owning component and share it by reference or `Arc`.
/// The reaper runs until [`TtlCache::shutdown`] is awaited or the cache is
/// dropped.
///
/// # Example
/// ```ignore
/// let cache = TtlCache::new(Duration::from_secs(10));
/// cache.add("https://example.com", body);
/// let hit = cache.get("https://example.com");
/// cache.shutdown().await?;
/// ```
#[derive(Debug)]
pub struct TtlCache {
    store: Arc<CacheStore>,
    reaper: ReaperHandle,
    config: CacheConfig,
}

impl TtlCache {
    // == Constructors ==
    /// Creates a cache whose reaper sweeps once per `ttl`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        Self::with_config(CacheConfig::new(ttl))
    }

    /// Creates a cache from a full configuration and starts its reaper.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn with_config(config: CacheConfig) -> Self {
        let store = Arc::new(CacheStore::new(&config));
        let reaper = spawn_reaper(&store, config.sweep_interval);

        debug!(
            ttl = ?config.ttl,
            sweep_interval = ?reaper.interval(),
            check_on_read = config.check_on_read,
            "TTL cache created"
        );

        Self {
            store,
            reaper,
            config,
        }
    }

    /// Settings the cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// See [`CacheConfig::staleness_bound`].
    pub fn staleness_bound(&self) -> Duration {
        self.config.staleness_bound()
    }

    /// See [`CacheConfig::max_visible_lifetime`].
    pub fn max_visible_lifetime(&self) -> Duration {
        self.config.max_visible_lifetime()
    }

    /// See [`CacheStore::add`].
    pub fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        self.store.add(key, value);
    }

    /// See [`CacheStore::get`].
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.store.get(key)
    }

    /// See [`CacheStore::remove`].
    pub fn remove(&self, key: &str) -> Option<Bytes> {
        self.store.remove(key)
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Snapshot of the activity counters.
    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    // == Fetch Through ==
    /// Returns the cached value for `key`, or runs `fetch` and caches its
    /// result on a miss.
    ///
    /// The lock is not held while `fetch` runs, so concurrent misses on the
    /// same key may each fetch; the last write wins. A fetch error is
    /// returned unchanged and nothing is cached.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: &str,
        fetch: F,
    ) -> std::result::Result<Bytes, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Bytes, E>>,
    {
        if let Some(value) = self.store.get(key) {
            debug!(key, "cache hit");
            return Ok(value);
        }

        debug!(key, "cache miss, fetching");
        let value = fetch().await?;
        self.store.add(key, value.clone());
        Ok(value)
    }

    // == Shutdown ==
    /// Stops the reaper and waits for it to exit. Entries stay readable.
    pub async fn shutdown(&self) -> Result<()> {
        self.reaper.shutdown().await
    }

    /// Returns true once the reaper has stopped.
    pub fn is_reaper_finished(&self) -> bool {
        self.reaper.is_finished()
    }
}
