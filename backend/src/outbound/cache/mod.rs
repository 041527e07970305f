//! Cache adapters.

mod redis_item_cache;

pub use redis_item_cache::RedisItemCache;
