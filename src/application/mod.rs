//! Application layer services.
//!
//! Services consume repository and store traits and give HTTP handlers and the
//! admin tool a small API over the cache.
//!
//! - [`services::link_cache::LinkCache`] - Cache population, lookup and invalidation
//! - [`services::projection::LinkProjector`] - Link to cache-projection transformation
//! - [`services::cache_queue::CacheQueue`] - Background cache population

pub mod services;
