//! JSON body extractor whose rejections use the response envelope.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use tally_core::error::AppError;

use crate::error::ApiError;

/// Like [`axum::Json`], but an unreadable body becomes a field error on
/// `body` instead of a plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
                Err(AppError::field("body", rejection.body_text()).into())
            }
        }
    }
}
