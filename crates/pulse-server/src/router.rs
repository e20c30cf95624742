//! Axum router construction for the dashboard API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the dashboard server.
///
/// The router includes:
/// - `GET /` -- dashboard page shell
/// - `GET /api/current-data` -- current cache document
/// - `GET /ws/updates` -- `WebSocket` cache document stream
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Page shell
        .route("/", get(handlers::index))
        // REST API
        .route("/api/current-data", get(handlers::current_data))
        // WebSocket
        .route("/ws/updates", get(ws::ws_updates))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
