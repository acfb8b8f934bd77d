//! Cache Entry Module
//!
//! Defines the immutable record stored for every cached key.

use std::time::{Duration, Instant};

use bytes::Bytes;

// == Cache Entry ==
/// A cached payload together with the instant it was inserted.
///
/// Entries are never edited in place. Overwriting a key stores a new entry
/// with a fresh timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    value: Bytes,
    created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Wraps `value` in a new entry stamped with the current instant.
    pub fn new(value: Bytes) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    /// Returns the stored payload. Cloning `Bytes` only bumps a refcount.
    pub fn value(&self) -> &Bytes {
        &self.value
    }

    /// Returns the insertion instant.
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Time elapsed since insertion.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// An entry whose age equals `ttl` exactly is still fresh; it expires
    /// once its age is strictly greater.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }
}
