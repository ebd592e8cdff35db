//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// `GET /api/health`: probes Postgres, the cache store and the cache queue.
///
/// Answers 200 with `"status": "healthy"` when every check passes, otherwise
/// 503 with `"degraded"` and the same body.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = match state.link_repository.health_check().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    };

    let cache = if state.link_cache.health_check().await {
        CheckStatus::ok("Cache store reachable")
    } else {
        CheckStatus::error("Cache store unreachable")
    };

    let cache_queue = if state.cache_queue.is_closed() {
        CheckStatus::error("Cache queue is closed")
    } else {
        CheckStatus::ok(format!("Free slots: {}", state.cache_queue.capacity()))
    };

    let all_healthy = database.is_ok() && cache.is_ok() && cache_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            cache,
            cache_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
