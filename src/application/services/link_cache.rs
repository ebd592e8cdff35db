//! Link cache population, lookup and invalidation.

use futures_util::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::application::services::projection::LinkProjector;
use crate::domain::entities::{CacheKey, CachedLink, Link};
use crate::infrastructure::cache::{CacheEntry, CacheResult, CacheStore};

/// Lifetime of a cached link: 7 days.
pub const LINK_CACHE_TTL_SECONDS: u64 = 60 * 60 * 24 * 7;

/// Mirrors link records into the key-value store for fast request routing.
///
/// Entries live under `lowercase(domain):lowercase(key)` and are written
/// insert-if-absent with a fixed TTL, so a late writer never replaces a
/// fresher entry. Changing a cached link goes through [`LinkCache::refresh`],
/// which deletes before writing.
///
/// Constructed once at startup and shared via `Arc`.
pub struct LinkCache {
    store: Arc<dyn CacheStore>,
    projector: Arc<dyn LinkProjector>,
}

impl LinkCache {
    pub fn new(store: Arc<dyn CacheStore>, projector: Arc<dyn LinkProjector>) -> Self {
        Self { store, projector }
    }

    /// Caches every link in one pipelined round trip.
    ///
    /// An empty slice returns immediately without touching the store. All
    /// projections are resolved before anything is sent; if one fails, nothing
    /// is written. Entries that already exist are skipped silently.
    ///
    /// # Errors
    ///
    /// Returns the first projection failure, or the store error if the
    /// pipeline could not be executed.
    pub async fn set_many(&self, links: &[Link]) -> CacheResult<()> {
        if links.is_empty() {
            return Ok(());
        }

        let entries = try_join_all(links.iter().map(|link| self.entry_for(link))).await?;

        debug!(count = entries.len(), "Populating link cache");
        self.store
            .set_if_absent_many(entries, LINK_CACHE_TTL_SECONDS)
            .await
    }

    /// Caches a single link.
    ///
    /// Returns `false` when an entry already existed under the link's key; that
    /// case is logged but is not an error.
    pub async fn set(&self, link: &Link) -> CacheResult<bool> {
        let entry = self.entry_for(link).await?;
        self.write(entry).await
    }

    /// Replaces the cached entry of a link with a fresh projection.
    ///
    /// The projection is built first, so a failing projection leaves the
    /// existing entry in place.
    pub async fn refresh(&self, link: &Link) -> CacheResult<bool> {
        let entry = self.entry_for(link).await?;
        self.store.delete_many(vec![entry.key.clone()]).await?;
        self.write(entry).await
    }

    /// Looks up the cached projection for `domain` and `key`.
    ///
    /// An entry that no longer decodes is reported as a miss.
    pub async fn get(&self, domain: &str, key: &str) -> CacheResult<Option<CachedLink>> {
        let cache_key = CacheKey::new(domain, key);

        let Some(raw) = self.store.get(&cache_key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(cached) => Ok(Some(cached)),
            Err(e) => {
                warn!(cache_key = %cache_key, "Discarding undecodable cache entry: {}", e);
                Ok(None)
            }
        }
    }

    /// Removes the entry for `domain` and `key`. Returns whether one existed.
    pub async fn delete(&self, domain: &str, key: &str) -> CacheResult<bool> {
        let deleted = self
            .store
            .delete_many(vec![CacheKey::new(domain, key)])
            .await?;
        Ok(deleted > 0)
    }

    /// Removes the entries of every link with a single command.
    pub async fn delete_many(&self, links: &[Link]) -> CacheResult<u64> {
        if links.is_empty() {
            return Ok(0);
        }

        self.store
            .delete_many(links.iter().map(CacheKey::for_link).collect())
            .await
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    async fn entry_for(&self, link: &Link) -> CacheResult<CacheEntry> {
        let projection = self.projector.project(link).await?;

        Ok(CacheEntry {
            key: CacheKey::for_link(link),
            value: serde_json::to_string(&projection)?,
        })
    }

    async fn write(&self, entry: CacheEntry) -> CacheResult<bool> {
        let cache_key = entry.key.clone();
        let written = self
            .store
            .set_if_absent(entry, LINK_CACHE_TTL_SECONDS)
            .await?;

        if !written {
            warn!(cache_key = %cache_key, "Failed to set link in cache: entry already exists");
        }

        Ok(written)
    }
}
