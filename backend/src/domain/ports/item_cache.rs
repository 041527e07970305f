//! Port interface for the inventory cache.
//!
//! The cache stores serialized JSON payloads under [`CacheKey`]s with a TTL.
//! It is an accelerator, never a source of truth: callers treat every error
//! surfaced here as a miss and carry on against the item store.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::{define_port_error, CacheKey};

define_port_error! {
    /// Errors surfaced by cache adapters.
    pub enum CacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "cache backend failure: {message}",
        /// Cached payload could not be read back.
        Serialization { message: String } => "cache serialization failed: {message}",
    }
}

/// Key-value cache with per-entry TTL.
#[async_trait]
pub trait ItemCache: Send + Sync {
    /// Read a cached payload. `None` means a miss (or an expired entry).
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError>;

    /// Store a payload under the key for the given lifetime.
    async fn put(&self, key: &CacheKey, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Remove an entry. Deleting an absent key is a no-op.
    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError>;
}

struct CachedEntry {
    value: String,
    stored_at: Instant,
    ttl: Duration,
}

impl CachedEntry {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() > self.ttl
    }
}

/// In-memory cache used by tests and the dev-mode server.
///
/// Entries expire lazily: an expired entry is dropped on the read that finds
/// it, mirroring what a TTL'd Redis key looks like to callers.
#[derive(Default)]
pub struct InMemoryItemCache {
    entries: Mutex<HashMap<String, CachedEntry>>,
}

impl InMemoryItemCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a live (unexpired) entry exists, for test assertions.
    pub fn contains(&self, key: &CacheKey) -> bool {
        let entries = self.entries.lock().expect("cache lock");
        entries
            .get(key.as_str())
            .is_some_and(|entry| !entry.is_expired())
    }
}

#[async_trait]
impl ItemCache for InMemoryItemCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock().expect("cache lock");
        if let Some(entry) = entries.get(key.as_str()) {
            if !entry.is_expired() {
                return Ok(Some(entry.value.clone()));
            }
        }
        // Reaching here the entry is absent or expired; removing an absent
        // key is a no-op.
        entries.remove(key.as_str());
        Ok(None)
    }

    async fn put(&self, key: &CacheKey, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().expect("cache lock");
        entries.insert(
            key.as_str().to_owned(),
            CachedEntry {
                value: value.to_owned(),
                stored_at: Instant::now(),
                ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().expect("cache lock");
        entries.remove(key.as_str());
        Ok(())
    }
}
