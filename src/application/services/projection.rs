//! Link to cache-projection transformation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::{CachedLink, Link};
use crate::domain::repositories::WebhookRepository;
use crate::infrastructure::cache::{CacheError, CacheResult};

/// Turns a link record into the projection stored in the cache.
///
/// May perform I/O to resolve denormalized fields. A failure aborts the cache
/// write for the link being projected.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkProjector: Send + Sync {
    async fn project(&self, link: &Link) -> CacheResult<CachedLink>;
}

/// Projector that resolves webhook subscriptions from the database.
///
/// Links that already carry their webhook ids are projected without a query.
pub struct WebhookProjector<W: WebhookRepository> {
    webhook_repository: Arc<W>,
}

impl<W: WebhookRepository> WebhookProjector<W> {
    pub fn new(webhook_repository: Arc<W>) -> Self {
        Self { webhook_repository }
    }
}

#[async_trait]
impl<W: WebhookRepository> LinkProjector for WebhookProjector<W> {
    async fn project(&self, link: &Link) -> CacheResult<CachedLink> {
        if link.webhook_ids.is_some() {
            return Ok(CachedLink::from(link));
        }

        let webhook_ids = self
            .webhook_repository
            .webhook_ids_for_link(&link.id)
            .await
            .map_err(|e| {
                CacheError::Projection(format!("webhooks of link {}: {}", link.id, e))
            })?;

        let mut projection = CachedLink::from(link);
        projection.webhook_ids = webhook_ids;
        Ok(projection)
    }
}
