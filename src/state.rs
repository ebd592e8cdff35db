use std::sync::Arc;

use crate::application::services::{CacheQueue, LinkCache};
use crate::domain::repositories::LinkRepository;

/// Shared handler state, built once in [`crate::server::run`].
#[derive(Clone)]
pub struct AppState {
    pub link_repository: Arc<dyn LinkRepository>,
    pub link_cache: Arc<LinkCache>,
    pub cache_queue: CacheQueue,
}

impl AppState {
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        link_cache: Arc<LinkCache>,
        cache_queue: CacheQueue,
    ) -> Self {
        Self {
            link_repository,
            link_cache,
            cache_queue,
        }
    }
}
