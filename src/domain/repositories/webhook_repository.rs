//! Repository trait for link webhook subscriptions.

use crate::error::AppError;
use async_trait::async_trait;

/// Resolves the webhooks attached to a link.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebhookRepository: Send + Sync {
    /// Returns the ids of the webhooks subscribed to `link_id`, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn webhook_ids_for_link(&self, link_id: &str) -> Result<Vec<String>, AppError>;
}
