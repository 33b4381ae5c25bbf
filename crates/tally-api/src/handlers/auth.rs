//! Auth handlers — login, logout, current session.

use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;

use crate::cookie;
use crate::dto::{LoginRequest, WebResponse};
use crate::error::ApiResult;
use crate::extractors::{JsonBody, SessionUser};
use crate::state::AppState;

const LOGIN_SUCCESS: &str = "Login success!!";
const LOGOUT_SUCCESS: &str = "Logout success!!";

/// POST /api/auth
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<(CookieJar, WebResponse<&'static str>)> {
    let token = state.authenticator.login(&req.email, &req.password).await?;
    let jar = cookie::apply(jar, state.authenticator.session_cookie(&token));

    Ok((jar, WebResponse::ok(LOGIN_SUCCESS)))
}

/// DELETE /api/auth
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, WebResponse<&'static str>)> {
    let cleared = state
        .authenticator
        .logout(cookie::session_token(&jar))
        .await?;

    Ok((cookie::apply(jar, cleared), WebResponse::ok(LOGOUT_SUCCESS)))
}

/// GET /api/auth
pub async fn me(user: SessionUser) -> WebResponse<String> {
    WebResponse::ok(user.email().to_string())
}
