//! Cache key derivation for link lookups.

use std::fmt;

use super::Link;

/// Store key of a cached link: `lowercase(domain):lowercase(key)`.
///
/// Domains and keys are matched case-insensitively by inbound routing, so both
/// halves are lowercased before they are joined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(domain: &str, key: &str) -> Self {
        Self(format!("{}:{}", domain.to_lowercase(), key.to_lowercase()))
    }

    pub fn for_link(link: &Link) -> Self {
        Self::new(&link.domain, &link.key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
