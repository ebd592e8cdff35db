//! Cache store trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::CacheKey;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Link projection failed: {0}")]
    Projection(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A serialized value ready to be written under its store key.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub value: String,
}

/// Key-value store holding cached link projections.
///
/// Writes are insert-if-absent with an expiration: an existing entry is never
/// overwritten, so a stale writer cannot clobber a fresher one. Updating an
/// entry means deleting it first.
///
/// Unlike a fail-open cache, errors are returned to the caller, which decides
/// whether to fall back to the database or log and move on.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisStore`] - Redis-backed store
/// - [`crate::infrastructure::cache::NullStore`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Writes one entry if no value exists under its key.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the entry was written
    /// - `Ok(false)` if a value already existed and was left untouched
    async fn set_if_absent(&self, entry: CacheEntry, ttl_seconds: u64) -> CacheResult<bool>;

    /// Writes every entry if absent, in a single round trip.
    ///
    /// Per-key outcomes are not reported: callers cannot tell which entries
    /// were skipped because they already existed.
    async fn set_if_absent_many(&self, entries: Vec<CacheEntry>, ttl_seconds: u64)
    -> CacheResult<()>;

    /// Reads the raw value stored under `key`.
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>>;

    /// Deletes the given keys and returns how many existed.
    async fn delete_many(&self, keys: Vec<CacheKey>) -> CacheResult<u64>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
