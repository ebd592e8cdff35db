//! Core domain entities.
//!
//! - [`Link`] - The authoritative link record loaded from the database
//! - [`CachedLink`] - Its cache projection, serialized into Redis
//! - [`CacheKey`] - The `domain:key` store key shared by every cache path

pub mod cache_key;
pub mod cached_link;
pub mod link;

pub use cache_key::CacheKey;
pub use cached_link::CachedLink;
pub use link::Link;
