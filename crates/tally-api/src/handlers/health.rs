//! Health check handler.

use axum::extract::State;

use crate::dto::WebResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> ApiResult<WebResponse<&'static str>> {
    if let Some(database) = &state.database {
        database.ping().await?;
    }
    Ok(WebResponse::ok("OK"))
}
