//! No-op cache store for disabled caching.

use super::service::{CacheEntry, CacheResult, CacheStore};
use crate::domain::entities::CacheKey;
use async_trait::async_trait;
use tracing::debug;

/// A store that keeps nothing.
///
/// Used when Redis is not configured or unreachable at startup. Writes report
/// success, reads always miss, so every lookup goes to the database.
pub struct NullStore;

impl NullStore {
    /// Creates a new NullStore instance.
    pub fn new() -> Self {
        debug!("Using NullStore (caching disabled)");
        Self
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for NullStore {
    async fn set_if_absent(&self, _entry: CacheEntry, _ttl_seconds: u64) -> CacheResult<bool> {
        Ok(true)
    }

    async fn set_if_absent_many(
        &self,
        _entries: Vec<CacheEntry>,
        _ttl_seconds: u64,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn get(&self, _key: &CacheKey) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn delete_many(&self, _keys: Vec<CacheKey>) -> CacheResult<u64> {
        Ok(0)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
