#![allow(dead_code)]

use async_trait::async_trait;
use link_cache::application::services::{CacheQueue, CacheTask, LinkCache, WebhookProjector};
use link_cache::domain::entities::{CacheKey, Link};
use link_cache::domain::repositories::{LinkRepository, WebhookRepository};
use link_cache::error::AppError;
use link_cache::infrastructure::cache::{
    CacheEntry, CacheError, CacheResult, CacheStore,
};
use link_cache::state::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Store call as seen by [`InMemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    SetIfAbsent { key: String, ttl: u64 },
    SetIfAbsentMany { keys: Vec<String>, ttl: u64 },
    Get { key: String },
    DeleteMany { keys: Vec<String> },
}

/// Redis stand-in with SET NX semantics and a call log.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<StoreCall>>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn json(&self, key: &str) -> Option<serde_json::Value> {
        self.value(key).map(|v| serde_json::from_str(&v).unwrap())
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn record(&self, call: StoreCall) -> CacheResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionError("store offline".to_string()));
        }
        Ok(())
    }

    fn insert_if_absent(&self, entry: CacheEntry) -> bool {
        let mut entries = self.entries.lock().unwrap();
        let key = entry.key.as_str().to_string();
        if entries.contains_key(&key) {
            return false;
        }
        entries.insert(key, entry.value);
        true
    }
}

#[async_trait]
impl CacheStore for InMemoryStore {
    async fn set_if_absent(&self, entry: CacheEntry, ttl_seconds: u64) -> CacheResult<bool> {
        self.record(StoreCall::SetIfAbsent {
            key: entry.key.to_string(),
            ttl: ttl_seconds,
        })?;
        Ok(self.insert_if_absent(entry))
    }

    async fn set_if_absent_many(
        &self,
        entries: Vec<CacheEntry>,
        ttl_seconds: u64,
    ) -> CacheResult<()> {
        self.record(StoreCall::SetIfAbsentMany {
            keys: entries.iter().map(|e| e.key.to_string()).collect(),
            ttl: ttl_seconds,
        })?;
        for entry in entries {
            self.insert_if_absent(entry);
        }
        Ok(())
    }

    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>> {
        self.record(StoreCall::Get {
            key: key.to_string(),
        })?;
        Ok(self.value(key.as_str()))
    }

    async fn delete_many(&self, keys: Vec<CacheKey>) -> CacheResult<u64> {
        self.record(StoreCall::DeleteMany {
            keys: keys.iter().map(CacheKey::to_string).collect(),
        })?;
        let mut entries = self.entries.lock().unwrap();
        Ok(keys
            .iter()
            .filter(|k| entries.remove(k.as_str()).is_some())
            .count() as u64)
    }

    async fn health_check(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }
}

/// Link table stand-in with case-insensitive lookups.
#[derive(Default)]
pub struct FakeLinkRepository {
    links: Mutex<Vec<Link>>,
    pub healthy: AtomicBool,
}

impl FakeLinkRepository {
    pub fn with_links(links: Vec<Link>) -> Self {
        Self {
            links: Mutex::new(links),
            healthy: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl LinkRepository for FakeLinkRepository {
    async fn find_by_domain_key(&self, domain: &str, key: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.domain.eq_ignore_ascii_case(domain) && l.key.eq_ignore_ascii_case(key))
            .cloned())
    }

    async fn list_by_domain(
        &self,
        domain: &str,
        after_id: Option<String>,
        limit: i64,
    ) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.domain.eq_ignore_ascii_case(domain))
            .filter(|l| after_id.as_ref().is_none_or(|after| &l.id > after))
            .cloned()
            .collect();
        links.sort_by(|a, b| a.id.cmp(&b.id));
        links.truncate(limit as usize);
        Ok(links)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::internal("Database error", serde_json::json!({})))
        }
    }
}

/// Webhook subscriptions keyed by link id.
#[derive(Default)]
pub struct FakeWebhookRepository {
    pub webhooks: HashMap<String, Vec<String>>,
}

#[async_trait]
impl WebhookRepository for FakeWebhookRepository {
    async fn webhook_ids_for_link(&self, link_id: &str) -> Result<Vec<String>, AppError> {
        Ok(self.webhooks.get(link_id).cloned().unwrap_or_default())
    }
}

pub fn link(id: &str, domain: &str, key: &str, url: &str) -> Link {
    Link::new(id, domain, key, url, "proj_1")
}

pub fn link_cache(store: Arc<InMemoryStore>, webhooks: FakeWebhookRepository) -> LinkCache {
    LinkCache::new(store, Arc::new(WebhookProjector::new(Arc::new(webhooks))))
}

pub struct TestContext {
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
    pub links: Arc<FakeLinkRepository>,
    pub rx: mpsc::Receiver<CacheTask>,
}

pub fn create_test_context(links: Vec<Link>) -> TestContext {
    let store = Arc::new(InMemoryStore::default());
    let links = Arc::new(FakeLinkRepository::with_links(links));
    let cache = Arc::new(link_cache(store.clone(), FakeWebhookRepository::default()));
    let (queue, rx) = CacheQueue::channel(100);

    let state = AppState::new(links.clone(), cache, queue);

    TestContext {
        state,
        store,
        links,
        rx,
    }
}
