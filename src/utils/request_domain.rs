//! Link domain of an incoming request.

use crate::AppError;
use axum::http::{HeaderMap, header, uri::Authority};
use serde_json::json;

/// Returns the lowercased host of the request's `Host` header, without port.
///
/// IPv6 literals keep their brackets (`[::1]`).
pub fn request_domain(headers: &HeaderMap) -> Result<String, AppError> {
    let raw = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?;

    let authority = Authority::try_from(raw.as_bytes())
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?;

    Ok(authority.host().to_ascii_lowercase())
}
