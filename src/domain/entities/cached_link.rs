//! Cache projection of a link, as stored in Redis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Link;

/// The subset of a [`Link`] needed to route an inbound request.
///
/// Serialized as camelCase JSON. `key` and `domain` are deliberately absent:
/// they are folded into the store key (see [`super::CacheKey`]).
///
/// The password itself is never cached, only whether the link has one.
/// Flags that are `false` and optional fields that are unset are omitted from
/// the JSON to keep entries small.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedLink {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub password: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub proxy: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rewrite: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub track_conversion: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<BTreeMap<String, String>>,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub webhook_ids: Vec<String>,
}

impl CachedLink {
    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }
}

impl From<&Link> for CachedLink {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id.clone(),
            url: link.url.clone(),
            password: link.is_password_protected(),
            proxy: link.proxy,
            rewrite: link.rewrite,
            track_conversion: link.track_conversion,
            expires_at: link.expires_at,
            expired_url: link.expired_url.clone(),
            ios: link.ios.clone(),
            android: link.android.clone(),
            geo: link.geo.clone().filter(|g| !g.is_empty()),
            project_id: link.project_id.clone(),
            program_id: link.program_id.clone(),
            partner_id: link.partner_id.clone(),
            webhook_ids: link.webhook_ids.clone().unwrap_or_default(),
        }
    }
}
