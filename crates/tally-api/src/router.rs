//! Route definitions for the Tally HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::Router;
use axum::routing::get;

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes, bound to `state`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().merge(auth_routes()).merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Session endpoints: login, logout, current identity.
fn auth_routes() -> Router<AppState> {
    Router::new().route(
        "/auth",
        get(handlers::auth::me)
            .post(handlers::auth::login)
            .delete(handlers::auth::logout),
    )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
