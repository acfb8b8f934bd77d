//! Cache Store Module
//!
//! Mutex-guarded key to entry map with a single time-to-live policy.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use tracing::trace;

use crate::cache::{CacheEntry, CacheStats};
use crate::config::CacheConfig;

/// Map and counters, guarded together so stats never drift from the map.
#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

// == Cache Store ==
/// Concurrent byte cache where every entry shares one TTL.
///
/// Every operation takes the same lock, so `add`, `get` and `sweep` are
/// linearizable with respect to each other. The lock is only held for map
/// work and never across an await point.
#[derive(Debug)]
pub struct CacheStore {
    inner: Mutex<Inner>,
    ttl: Duration,
    check_on_read: bool,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store from `config`. The sweep interval is the
    /// reaper's concern and is ignored here.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            ttl: config.ttl,
            check_on_read: config.check_on_read,
        }
    }

    /// Lifetime shared by every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether `get` drops expired entries itself.
    pub fn check_on_read(&self) -> bool {
        self.check_on_read
    }

    // == Add ==
    /// Inserts `value` under `key`, replacing any previous entry.
    ///
    /// The replacement carries a fresh timestamp, so the latest write governs
    /// expiry.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let key = key.into();
        let entry = CacheEntry::new(value.into());

        let mut inner = self.inner.lock();
        trace!(key = %key, bytes = entry.value().len(), "cache add");
        inner.entries.insert(key, entry);
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
    }

    // == Get ==
    /// Returns the payload stored under `key`, or `None` when absent.
    ///
    /// With `check_on_read` disabled, presence only means the reaper has not
    /// removed the entry yet, so an expired entry may still be returned until
    /// the next sweep. With it enabled, an expired entry is dropped here and
    /// reported as a miss.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let mut inner = self.inner.lock();

        let expired = match inner.entries.get(key) {
            None => {
                inner.stats.record_miss();
                return None;
            }
            Some(entry) => self.check_on_read && entry.is_expired(self.ttl),
        };

        if expired {
            inner.entries.remove(key);
            let len = inner.entries.len();
            inner.stats.record_expired(1);
            inner.stats.record_miss();
            inner.stats.set_total_entries(len);
            trace!(key = %key, "cache entry expired on read");
            return None;
        }

        let value = inner.entries.get(key).map(|entry| entry.value().clone());
        inner.stats.record_hit();
        value
    }

    /// Returns true if an entry for `key` is present, without touching stats
    /// or checking freshness.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.lock().entries.contains_key(key)
    }

    // == Remove ==
    /// Removes `key`, returning its payload if it was present.
    pub fn remove(&self, key: &str) -> Option<Bytes> {
        let mut inner = self.inner.lock();
        let removed = inner.entries.remove(key).map(|entry| entry.value().clone());
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
        removed
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.stats.set_total_entries(0);
    }

    // == Sweep ==
    /// Removes every entry older than the TTL in one pass under the lock.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self) -> usize {
        let ttl = self.ttl;
        let mut inner = self.inner.lock();

        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired(ttl));
        let after = inner.entries.len();
        let removed = before - after;

        inner.stats.record_expired(removed);
        inner.stats.set_total_entries(after);
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the current counters.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries, expired-but-unswept included.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }
}
