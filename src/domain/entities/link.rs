//! Link entity representing an authoritative short link record.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A short link as stored in the relational database.
///
/// The database stays the source of truth; the cache only ever holds a
/// [`super::CachedLink`] projection of this record.
///
/// `webhook_ids` is `None` while the link's webhooks have not been resolved yet,
/// and `Some` (possibly empty) once they are known.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: String,
    pub domain: String,
    pub key: String,
    pub url: String,
    pub project_id: String,
    pub program_id: Option<String>,
    pub partner_id: Option<String>,
    pub password: Option<String>,
    pub proxy: bool,
    pub rewrite: bool,
    pub track_conversion: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub expired_url: Option<String>,
    pub ios: Option<String>,
    pub android: Option<String>,
    pub geo: Option<BTreeMap<String, String>>,
    pub webhook_ids: Option<Vec<String>>,
}

impl Link {
    /// Creates a plain redirect link with every optional attribute unset.
    pub fn new(
        id: impl Into<String>,
        domain: impl Into<String>,
        key: impl Into<String>,
        url: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            domain: domain.into(),
            key: key.into(),
            url: url.into(),
            project_id: project_id.into(),
            program_id: None,
            partner_id: None,
            password: None,
            proxy: false,
            rewrite: false,
            track_conversion: false,
            expires_at: None,
            expired_url: None,
            ios: None,
            android: None,
            geo: None,
            webhook_ids: None,
        }
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }

    /// Returns true if visitors must provide a password before being redirected.
    pub fn is_password_protected(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}
