//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, worker spawning, and Axum server lifecycle.

use crate::api::routes::app_router;
use crate::application::services::{CacheQueue, LinkCache, WebhookProjector, run_cache_worker};
use crate::config::Config;
use crate::infrastructure::cache::{CacheStore, NullStore, RedisStore};
use crate::infrastructure::persistence::{PgLinkRepository, PgWebhookRepository};
use crate::state::AppState;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the Postgres pool with the configured limits.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Some(Duration::from_secs(config.db_idle_timeout)))
        .max_lifetime(Some(Duration::from_secs(config.db_max_lifetime)))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Connects the cache store, falling back to [`NullStore`] when Redis is
/// not configured or unreachable.
pub async fn connect_cache_store(config: &Config) -> Arc<dyn CacheStore> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullStore)");
        return Arc::new(NullStore::new());
    };

    match RedisStore::connect(redis_url).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullStore.", e);
            Arc::new(NullStore::new())
        }
    }
}

/// Builds the link cache over the given store, resolving webhooks from `pool`.
pub fn build_link_cache(store: Arc<dyn CacheStore>, pool: Arc<PgPool>) -> Arc<LinkCache> {
    let webhook_repository = Arc::new(PgWebhookRepository::new(pool));
    let projector = Arc::new(WebhookProjector::new(webhook_repository));
    Arc::new(LinkCache::new(store, projector))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Redis cache store (or NullStore fallback)
/// - Background cache worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// Queued cache tasks are drained before this returns.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = Arc::new(connect_database(&config).await?);
    let store = connect_cache_store(&config).await;

    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let link_cache = build_link_cache(store, pool);

    let (cache_queue, cache_rx) = CacheQueue::channel(config.cache_queue_capacity);
    let worker = tokio::spawn(run_cache_worker(
        cache_rx,
        link_cache.clone(),
        config.cache_worker_concurrency,
    ));

    let state = AppState::new(link_repository, link_cache, cache_queue);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and every queue sender it held) is gone now; wait for the
    // worker to finish what is still queued.
    if let Err(e) = worker.await {
        tracing::error!("Cache worker terminated abnormally: {}", e);
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
