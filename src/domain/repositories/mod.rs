//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data access; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! - [`LinkRepository`] - Link lookups by domain and key
//! - [`WebhookRepository`] - Webhook ids attached to a link

pub mod link_repository;
pub mod webhook_repository;

pub use link_repository::LinkRepository;
pub use webhook_repository::WebhookRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use webhook_repository::MockWebhookRepository;
