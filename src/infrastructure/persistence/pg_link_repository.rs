//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link lookups.
///
/// Reads the `links` table owned by the main application; this service never
/// writes to it.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: String,
    domain: String,
    key: String,
    url: String,
    project_id: String,
    program_id: Option<String>,
    partner_id: Option<String>,
    password: Option<String>,
    proxy: bool,
    rewrite: bool,
    track_conversion: bool,
    expires_at: Option<DateTime<Utc>>,
    expired_url: Option<String>,
    ios: Option<String>,
    android: Option<String>,
    geo: Option<Json<BTreeMap<String, String>>>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Self {
            id: row.id,
            domain: row.domain,
            key: row.key,
            url: row.url,
            project_id: row.project_id,
            program_id: row.program_id,
            partner_id: row.partner_id,
            password: row.password,
            proxy: row.proxy,
            rewrite: row.rewrite,
            track_conversion: row.track_conversion,
            expires_at: row.expires_at,
            expired_url: row.expired_url,
            ios: row.ios,
            android: row.android,
            geo: row.geo.map(|Json(geo)| geo),
            webhook_ids: None,
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_domain_key(&self, domain: &str, key: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, domain, "key", url, project_id, program_id, partner_id, password,
                   proxy, rewrite, track_conversion, expires_at, expired_url, ios, android, geo
            FROM links
            WHERE LOWER(domain) = LOWER($1) AND LOWER("key") = LOWER($2)
            LIMIT 1
            "#,
        )
        .bind(domain)
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_by_domain(
        &self,
        domain: &str,
        after_id: Option<String>,
        limit: i64,
    ) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, domain, "key", url, project_id, program_id, partner_id, password,
                   proxy, rewrite, track_conversion, expires_at, expired_url, ios, android, geo
            FROM links
            WHERE LOWER(domain) = LOWER($1)
              AND ($2::text IS NULL OR id > $2)
            ORDER BY id
            LIMIT $3
            "#,
        )
        .bind(domain)
        .bind(after_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
