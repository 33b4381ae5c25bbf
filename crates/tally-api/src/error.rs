//! HTTP error type: wraps domain `AppError` and renders it in the envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use tally_core::error::{AppError, ErrorKind};

use crate::dto::WebResponse;

/// Body for server-side failures; the real cause only goes to the log.
const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Error returned by handlers and extractors.
///
/// Any [`AppError`] converts with `?`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        if err.is_internal() {
            tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
            return WebResponse::new(status, INTERNAL_MESSAGE).into_response();
        }

        if !err.fields.is_empty() {
            return WebResponse::new(status, err.fields).into_response();
        }

        WebResponse::new(status, err.message).into_response()
    }
}
