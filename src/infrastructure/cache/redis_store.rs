//! Redis-backed cache store.

use super::service::{CacheEntry, CacheError, CacheResult, CacheStore};
use crate::domain::entities::CacheKey;
use async_trait::async_trait;
use redis::{
    AsyncCommands, Client, Cmd, ExistenceCheck, Pipeline, SetExpiry, SetOptions, Value,
    aio::ConnectionManager,
};
use tracing::{debug, info};

/// Redis store for cached link projections.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection reuse.
/// Every write is `SET key value NX EX ttl`, relying on Redis' atomicity for the
/// insert-if-absent guarantee.
pub struct RedisStore {
    client: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }
}

fn set_if_absent_options(ttl_seconds: u64) -> SetOptions {
    SetOptions::default()
        .conditional_set(ExistenceCheck::NX)
        .with_expiration(SetExpiry::EX(ttl_seconds))
}

/// `SET key value NX EX ttl` for one entry.
fn set_if_absent_cmd(entry: &CacheEntry, ttl_seconds: u64) -> Cmd {
    let mut cmd = redis::cmd("SET");
    cmd.arg(entry.key.as_str())
        .arg(&entry.value)
        .arg(set_if_absent_options(ttl_seconds));
    cmd
}

/// One pipeline holding a conditional SET per entry, replies ignored.
fn set_if_absent_pipeline(entries: &[CacheEntry], ttl_seconds: u64) -> Pipeline {
    let mut pipe = redis::pipe();
    for entry in entries {
        pipe.add_command(set_if_absent_cmd(entry, ttl_seconds))
            .ignore();
    }
    pipe
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn set_if_absent(&self, entry: CacheEntry, ttl_seconds: u64) -> CacheResult<bool> {
        let mut conn = self.client.clone();

        // SET NX replies OK when written and nil when the key already exists.
        let reply: Value = set_if_absent_cmd(&entry, ttl_seconds)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                CacheError::OperationError(format!("SET NX failed for {}: {}", entry.key, e))
            })?;

        let written = !matches!(reply, Value::Nil);
        debug!(cache_key = %entry.key, written, ttl_seconds, "Cache SET NX");
        Ok(written)
    }

    async fn set_if_absent_many(
        &self,
        entries: Vec<CacheEntry>,
        ttl_seconds: u64,
    ) -> CacheResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut conn = self.client.clone();

        set_if_absent_pipeline(&entries, ttl_seconds)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| CacheError::OperationError(format!("Pipelined SET NX failed: {}", e)))?;

        debug!(count = entries.len(), ttl_seconds, "Cache pipelined SET NX");
        Ok(())
    }

    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        let value = conn
            .get::<_, Option<String>>(key.as_str())
            .await
            .map_err(|e| CacheError::OperationError(format!("GET failed for {}: {}", key, e)))?;

        if value.is_some() {
            debug!("Cache HIT: {}", key);
        } else {
            debug!("Cache MISS: {}", key);
        }

        Ok(value)
    }

    async fn delete_many(&self, keys: Vec<CacheKey>) -> CacheResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.client.clone();
        let names: Vec<&str> = keys.iter().map(CacheKey::as_str).collect();

        let deleted = conn
            .del::<_, u64>(names)
            .await
            .map_err(|e| CacheError::OperationError(format!("DEL failed: {}", e)))?;

        debug!("Cache INVALIDATE: {} of {} keys", deleted, keys.len());
        Ok(deleted)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
