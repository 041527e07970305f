//! Redis-backed implementation of the item cache port.
//!
//! Uses `bb8-redis` for connection pooling and plain string commands:
//! `GET`, `SET` with `EX`, and `DEL`. Every Redis failure maps to
//! [`CacheError::Backend`]; the inventory service degrades those to cache
//! misses, so a Redis outage slows requests down rather than failing them.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;
use bb8_redis::RedisConnectionManager;

use crate::domain::ports::{CacheError, CacheKey, ItemCache};

/// Redis adapter for the [`ItemCache`] port.
#[derive(Clone)]
pub struct RedisItemCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisItemCache {
    /// Build a pooled client against the given Redis URL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Backend`] when the URL is invalid or the pool
    /// cannot be constructed.
    pub async fn connect(redis_url: &str, max_size: u32) -> Result<Self, CacheError> {
        let manager = RedisConnectionManager::new(redis_url)
            .map_err(|err| CacheError::backend(err.to_string()))?;
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .await
            .map_err(|err| CacheError::backend(err.to_string()))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl ItemCache for RedisItemCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CacheError::backend(err.to_string()))?;
        conn.get::<_, Option<String>>(key.as_str())
            .await
            .map_err(|err| CacheError::backend(err.to_string()))
    }

    async fn put(&self, key: &CacheKey, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CacheError::backend(err.to_string()))?;
        // Redis EX takes whole seconds; round sub-second TTLs up to one.
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key.as_str(), value, seconds)
            .await
            .map_err(|err| CacheError::backend(err.to_string()))
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CacheError::backend(err.to_string()))?;
        conn.del::<_, ()>(key.as_str())
            .await
            .map_err(|err| CacheError::backend(err.to_string()))
    }
}
