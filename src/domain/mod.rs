//! Domain layer containing entities and repository contracts.
//!
//! - [`entities`] - Link records, their cache projection and cache keys
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.

pub mod entities;
pub mod repositories;
