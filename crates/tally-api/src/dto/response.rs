//! The uniform response envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// `{code, status, data}` wrapper used for every success and error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebResponse<T> {
    /// Numeric HTTP status.
    pub code: u16,
    /// HTTP status name, e.g. `UNPROCESSABLE_ENTITY`.
    pub status: String,
    /// Message string or list of field errors.
    pub data: T,
}

impl<T: Serialize> WebResponse<T> {
    /// Wraps `data` for the given status.
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            code: status.as_u16(),
            status: status_name(status),
            data,
        }
    }

    /// Wraps `data` in a `200 OK` envelope.
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }
}

impl<T: Serialize> IntoResponse for WebResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Upper snake case name of a status code (`404` → `NOT_FOUND`).
pub fn status_name(status: StatusCode) -> String {
    match status.as_u16() {
        422 => "UNPROCESSABLE_ENTITY".to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("UNKNOWN")
            .to_uppercase()
            .replace([' ', '-'], "_"),
    }
}
