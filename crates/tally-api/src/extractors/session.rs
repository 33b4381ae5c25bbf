//! `SessionUser` extractor — reads the `jwt` cookie and verifies it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use tally_auth::SessionClaims;
use crate::cookie::session_token;
use crate::error::ApiError;
use crate::state::AppState;

/// Identity of the caller, taken from a valid, unrevoked session cookie.
#[derive(Debug, Clone)]
pub struct SessionUser(pub SessionClaims);

impl SessionUser {
    /// Email of the signed-in account.
    pub fn email(&self) -> &str {
        &self.0.subject
    }
}

impl std::ops::Deref for SessionUser {
    type Target = SessionClaims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let claims = state.authenticator.authenticate(session_token(&jar)).await?;
        Ok(SessionUser(claims))
    }
}
