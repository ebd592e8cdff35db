//! Tracing subscriber setup shared by the binaries.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `level` is an `EnvFilter` directive (the value of `RUST_LOG`); `format` is
/// `text` for human-readable output or `json` for one JSON object per line.
///
/// # Errors
///
/// Returns an error if the directive does not parse or a subscriber is already set.
pub fn init(level: &str, format: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).context("Invalid RUST_LOG directive")?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = if format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}
