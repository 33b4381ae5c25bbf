//! Application builder — wires router, middleware, and state into an Axum app.

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;

use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
}
