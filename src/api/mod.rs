//! HTTP API surface.

pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use handlers::AppState;

/// Build the service router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Upload sessions
        .route("/sessions", post(handlers::upload))
        .route("/sessions/:session_id", get(handlers::get_session))
        .route("/sessions/:session_id", delete(handlers::delete_session))
        // Filtering
        .route("/sessions/:session_id/filter", post(handlers::apply_filter))
        .route("/sessions/:session_id/download", get(handlers::download))
        .with_state(state)
}
