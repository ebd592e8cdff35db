//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime queries.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link lookups and paging for cache warming
//! - [`PgWebhookRepository`] - Webhook ids attached to a link

pub mod pg_link_repository;
pub mod pg_webhook_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_webhook_repository::PgWebhookRepository;
