//! Request handlers.

pub mod auth;
pub mod health;

use axum::http::StatusCode;

use crate::dto::WebResponse;

/// Fallback for unknown routes.
pub async fn not_found() -> WebResponse<&'static str> {
    WebResponse::new(StatusCode::NOT_FOUND, "Not Found")
}
