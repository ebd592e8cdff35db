//! PostgreSQL implementation of webhook repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::WebhookRepository;
use crate::error::AppError;

/// PostgreSQL repository resolving link webhook subscriptions from `link_webhooks`.
pub struct PgWebhookRepository {
    pool: Arc<PgPool>,
}

impl PgWebhookRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WebhookRepository for PgWebhookRepository {
    async fn webhook_ids_for_link(&self, link_id: &str) -> Result<Vec<String>, AppError> {
        let ids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT webhook_id
            FROM link_webhooks
            WHERE link_id = $1
            ORDER BY webhook_id
            "#,
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ids)
    }
}
