//! Key-value store backing the link cache.
//!
//! Provides a [`CacheStore`] trait with two implementations:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`NullStore`] - No-op implementation for disabled caching

mod null_store;
mod redis_store;
mod service;

pub use null_store::NullStore;
pub use redis_store::RedisStore;
pub use service::{CacheEntry, CacheError, CacheResult, CacheStore};

#[cfg(test)]
pub use service::MockCacheStore;
