//! Business logic services for the application layer.

pub mod cache_queue;
pub mod link_cache;
pub mod projection;

pub use cache_queue::{CacheQueue, CacheTask, run_cache_worker};
pub use link_cache::{LINK_CACHE_TTL_SECONDS, LinkCache};
pub use projection::{LinkProjector, WebhookProjector};
