//! Route configuration.

use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware;
use crate::state::AppState;
use axum::{Router, routing::get};

/// Builds the application router.
///
/// # Endpoints
///
/// - `GET /api/health` - Component health
/// - `GET /{key}`      - Resolve a short link for the request's Host
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/{key}", get(redirect_handler))
        .layer(middleware::tracing::layer())
        .with_state(state)
}
