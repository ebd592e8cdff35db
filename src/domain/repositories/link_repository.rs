//! Repository trait for link lookups.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to authoritative link records.
///
/// Used on cache misses and by the admin tool when warming the cache.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by domain and key, both compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_domain_key(&self, domain: &str, key: &str) -> Result<Option<Link>, AppError>;

    /// Lists links of a domain ordered by id, starting after `after_id`.
    ///
    /// Keyset pagination: pass the last id of the previous page to get the next one.
    /// An empty result means there are no more links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_domain(
        &self,
        domain: &str,
        after_id: Option<String>,
        limit: i64,
    ) -> Result<Vec<Link>, AppError>;

    /// Checks database connectivity.
    async fn health_check(&self) -> Result<(), AppError>;
}
