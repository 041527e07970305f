//! Inventory CRUD with the cache consistency contract.
//!
//! The cache is a read-through accelerator in front of the item store.
//! Reads check the cache first and repopulate on a miss; every mutation
//! invalidates the affected keys only **after** the store write has
//! committed, so a concurrent reader can never repopulate the cache from
//! pre-mutation state via this service.
//!
//! The cache is never a source of truth: any cache failure is logged and
//! degraded to a miss (reads) or a no-op (invalidations). A corrupt cached
//! payload is evicted and re-read from the store.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::domain::item::{Item, ItemDraft, ItemId};
use crate::domain::ports::{CacheKey, ItemCache, ItemPersistenceError, ItemRepository};
use crate::domain::Error;

/// Default lifetime of cache entries: 15 minutes.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Inventory use-cases over the item store and its cache.
#[derive(Clone)]
pub struct InventoryService {
    items: Arc<dyn ItemRepository>,
    cache: Arc<dyn ItemCache>,
    cache_ttl: Duration,
}

fn map_item_persistence_error(error: ItemPersistenceError) -> Error {
    match error {
        ItemPersistenceError::Connection { message } => Error::service_unavailable(message),
        ItemPersistenceError::Query { message } => Error::internal(message),
    }
}

impl InventoryService {
    /// Create a new service with the default entry TTL.
    pub fn new(items: Arc<dyn ItemRepository>, cache: Arc<dyn ItemCache>) -> Self {
        Self::with_ttl(items, cache, DEFAULT_CACHE_TTL)
    }

    /// Create a new service with an explicit entry TTL.
    pub fn with_ttl(
        items: Arc<dyn ItemRepository>,
        cache: Arc<dyn ItemCache>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            items,
            cache,
            cache_ttl,
        }
    }

    /// List every item, serving from the collection cache entry when present.
    pub async fn list(&self) -> Result<Vec<Item>, Error> {
        let key = CacheKey::collection();
        if let Some(items) = self.cached(&key).await {
            return Ok(items);
        }

        let items = self.items.list().await.map_err(map_item_persistence_error)?;
        self.store_in_cache(&key, &items).await;
        Ok(items)
    }

    /// Fetch one item, serving from its cache entry when present.
    pub async fn get(&self, id: &ItemId) -> Result<Item, Error> {
        let key = CacheKey::item(id);
        if let Some(item) = self.cached(&key).await {
            return Ok(item);
        }

        let item = self
            .items
            .find_by_id(id)
            .await
            .map_err(map_item_persistence_error)?
            .ok_or_else(|| Error::not_found("Item not found"))?;
        self.store_in_cache(&key, &item).await;
        Ok(item)
    }

    /// Create an item, then invalidate the collection entry.
    ///
    /// Per-item entries are untouched: a new id cannot have one yet, and the
    /// next list call repopulates the collection on its miss.
    pub async fn create(&self, draft: ItemDraft) -> Result<Item, Error> {
        let item = self
            .items
            .insert(draft)
            .await
            .map_err(map_item_persistence_error)?;
        self.evict(&CacheKey::collection()).await;
        Ok(item)
    }

    /// Replace an item's fields, then invalidate its entry and the collection.
    pub async fn update(&self, id: &ItemId, draft: ItemDraft) -> Result<Item, Error> {
        let item = self
            .items
            .update(id, draft)
            .await
            .map_err(map_item_persistence_error)?
            .ok_or_else(|| Error::not_found("Item not found"))?;
        self.evict(&CacheKey::item(id)).await;
        self.evict(&CacheKey::collection()).await;
        Ok(item)
    }

    /// Delete an item, then invalidate its entry and the collection.
    pub async fn delete(&self, id: &ItemId) -> Result<(), Error> {
        let removed = self
            .items
            .delete(id)
            .await
            .map_err(map_item_persistence_error)?;
        if !removed {
            return Err(Error::not_found("Item not found"));
        }
        self.evict(&CacheKey::item(id)).await;
        self.evict(&CacheKey::collection()).await;
        Ok(())
    }

    /// Read and deserialize a cache entry, degrading every failure to a miss.
    async fn cached<T: serde::de::DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let payload = match self.cache.get(key).await {
            Ok(payload) => payload?,
            Err(error) => {
                warn!(key = %key, error = %error, "cache read failed; treating as miss");
                return None;
            }
        };
        match serde_json::from_str(&payload) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(key = %key, error = %error, "corrupt cache payload; evicting");
                self.evict(key).await;
                None
            }
        }
    }

    /// Serialize and store a cache entry; failures are logged and dropped.
    async fn store_in_cache<T: serde::Serialize>(&self, key: &CacheKey, value: &T) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(key = %key, error = %error, "failed to serialize cache payload");
                return;
            }
        };
        if let Err(error) = self.cache.put(key, &payload, self.cache_ttl).await {
            warn!(key = %key, error = %error, "cache write failed; continuing without cache");
        }
    }

    /// Invalidate a cache entry; failures are logged and dropped.
    ///
    /// Worst case the entry survives until its TTL, which the contract
    /// tolerates only for out-of-band staleness, so the failure is still
    /// logged loudly.
    async fn evict(&self, key: &CacheKey) {
        if let Err(error) = self.cache.delete(key).await {
            warn!(key = %key, error = %error, "cache invalidation failed");
        }
    }
}
