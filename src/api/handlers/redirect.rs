//! Handler for link resolution.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tracing::{debug, warn};

use crate::application::services::CacheTask;
use crate::domain::entities::{CachedLink, Link};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_domain::request_domain;

/// Resolves a short link and redirects to its destination.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// # Request Flow
///
/// 1. Extract domain from Host header
/// 2. Look up `domain:key` in the link cache
/// 3. On cache miss, query the database
/// 4. Queue a background cache write (the response does not wait for it)
/// 5. Redirect
///
/// # Cache Strategy
///
/// - **Cache hit**: Answer from the cached projection
/// - **Cache miss**: Query DB, submit [`CacheTask::Set`]
/// - **Cache error**: Log and fall back to DB without repopulating
///
/// # Responses
///
/// - **307**: Redirect to the destination, or to `expired_url` for an expired link
/// - **403**: The link is password protected
/// - **404**: No link for this domain and key
/// - **410**: The link expired and has no fallback URL
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let domain = request_domain(&headers)?;

    let target = match state.link_cache.get(&domain, &key).await {
        Ok(Some(cached)) => {
            debug!("Cache HIT for {}:{}", domain, key);
            cached
        }
        Ok(None) => {
            debug!("Cache MISS for {}:{}", domain, key);

            let link = load_link(&state, &domain, &key).await?;
            let target = CachedLink::from(&link);
            state.cache_queue.submit(CacheTask::Set(link));
            target
        }
        Err(e) => {
            warn!("Cache lookup failed, falling back to database: {}", e);

            let link = load_link(&state, &domain, &key).await?;
            CachedLink::from(&link)
        }
    };

    resolve(&target, &domain, &key)
}

async fn load_link(state: &AppState, domain: &str, key: &str) -> Result<Link, AppError> {
    state
        .link_repository
        .find_by_domain_key(domain, key)
        .await?
        .ok_or_else(|| {
            AppError::not_found("Link not found", json!({ "domain": domain, "key": key }))
        })
}

fn resolve(link: &CachedLink, domain: &str, key: &str) -> Result<Response, AppError> {
    if link.password {
        return Err(AppError::forbidden(
            "Link is password protected",
            json!({ "reason": "password_required", "domain": domain, "key": key }),
        ));
    }

    if link.is_expired() {
        return match &link.expired_url {
            Some(expired_url) => Ok(Redirect::temporary(expired_url).into_response()),
            None => Err(AppError::gone(
                "Link has expired",
                json!({ "domain": domain, "key": key }),
            )),
        };
    }

    Ok(Redirect::temporary(&link.url).into_response())
}
