//! Axum router construction for the Ace Case API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled so the real-time client can call the API cross-origin.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- landing page
/// - `GET /health` -- liveness probe
/// - `GET /api/cases` -- case catalog
/// - `POST /api/token` -- room credential for a case
/// - `POST /api/subscribe` -- waitlist signup
///
/// CORS is configured to allow any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/cases", get(handlers::list_cases))
        .route("/api/token", post(handlers::issue_token))
        .route("/api/subscribe", post(handlers::subscribe))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
