//! Session authenticator — login, logout, and token checks.
//!
//! Holds no per-session state. Every call is independent; the only shared
//! pieces are the read-only codec and the injected collaborators.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use tally_core::config::AuthConfig;
use tally_core::error::AppError;
use tally_core::result::AppResult;
use tally_core::traits::{CredentialStore, PasswordVerifier, TokenDenylist};
use tally_core::types::normalize_email;

use crate::jwt::{SessionClaims, SessionToken, TokenCodec};
use crate::password::PasswordValidator;
use crate::validation::validate_login;

use super::cookie::SessionCookie;

/// Message for requests without a session token.
pub const MISSING_TOKEN: &str = "JWT token is null";
/// Message for tokens that fail verification or were revoked.
pub const INVALID_TOKEN: &str = "Invalid JWT token";
/// Message for logins naming an unknown account.
pub const USER_NOT_FOUND: &str = "User Not Found";
/// Message for logins with the wrong password.
pub const PASSWORD_MISMATCH: &str = "Password doesn't match";

/// Orchestrates credential checks and session token issue/teardown.
#[derive(Clone)]
pub struct SessionAuthenticator {
    /// Credential lookup.
    store: Arc<dyn CredentialStore>,
    /// Password hash comparison.
    verifier: Arc<dyn PasswordVerifier>,
    /// Token signing and verification.
    codec: Arc<TokenCodec>,
    /// Login password policy.
    policy: PasswordValidator,
    /// Optional server-side revocation.
    denylist: Option<Arc<dyn TokenDenylist>>,
    /// Lifetime of issued tokens.
    ttl: chrono::Duration,
    /// Whether issued cookies are `Secure`.
    cookie_secure: bool,
}

impl std::fmt::Debug for SessionAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthenticator")
            .field("store", &self.store)
            .field("policy", &self.policy)
            .field("revocation", &self.denylist.is_some())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionAuthenticator {
    /// Creates a stateless authenticator. Use [`Self::with_denylist`] to
    /// enable server-side revocation.
    ///
    /// Fails when the configured token lifetime is unusable.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        verifier: Arc<dyn PasswordVerifier>,
        codec: Arc<TokenCodec>,
        config: &AuthConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            store,
            verifier,
            codec,
            policy: PasswordValidator::new(config),
            denylist: None,
            ttl: config.token_ttl()?,
            cookie_secure: config.cookie_secure,
        })
    }

    /// Records logouts in `denylist` and rejects revoked tokens.
    pub fn with_denylist(mut self, denylist: Arc<dyn TokenDenylist>) -> Self {
        self.denylist = Some(denylist);
        self
    }

    /// Verifies credentials and mints a session token.
    ///
    /// Failure order is fixed: malformed input (validation), then unknown
    /// account (not found), then wrong password (validation on `password`).
    pub async fn login(&self, email: &str, password: &str) -> AppResult<SessionToken> {
        let errors = validate_login(email, password, &self.policy);
        if !errors.is_empty() {
            debug!(count = errors.len(), "Login payload rejected");
            return Err(AppError::validation_fields(errors));
        }

        let email = normalize_email(email);
        let credential = self.store.find_by_email(&email).await?.ok_or_else(|| {
            info!(email = %email, "Login for unknown account");
            AppError::not_found(USER_NOT_FOUND)
        })?;

        if !self.verifier.verify(password, &credential.password_hash)? {
            warn!(email = %email, "Login with wrong password");
            return Err(AppError::field("password", PASSWORD_MISMATCH));
        }

        let token = self.codec.encode(&credential.email, Utc::now(), self.ttl)?;
        info!(email = %credential.email, expires_at = %token.claims.expires_at, "Login succeeded");
        Ok(token)
    }

    /// Cookie that hands `token` to the client.
    pub fn session_cookie(&self, token: &SessionToken) -> SessionCookie {
        SessionCookie::issue(token, self.cookie_secure)
    }

    /// Ends the session carried by `token` and returns the clearing cookie.
    ///
    /// With revocation enabled the session is denylisted before this returns,
    /// so any later check on the same token fails.
    pub async fn logout(&self, token: Option<&str>) -> AppResult<SessionCookie> {
        let claims = self.authenticate(token).await?;

        if let Some(denylist) = &self.denylist {
            denylist
                .revoke(&claims.subject, claims.issued_at, claims.expires_at)
                .await?;
        }

        info!(email = %claims.subject, "Logout succeeded");
        Ok(SessionCookie::cleared(self.cookie_secure))
    }

    /// Checks a session token and returns the identity it asserts.
    ///
    /// An absent or empty token is "missing"; every decode failure and every
    /// revoked session is reported as the same "invalid" error.
    pub async fn authenticate(&self, token: Option<&str>) -> AppResult<SessionClaims> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized(MISSING_TOKEN))?;

        let claims = self.codec.decode(token).map_err(|e| {
            debug!(reason = %e, "Session token rejected");
            AppError::unauthorized(INVALID_TOKEN)
        })?;

        if let Some(denylist) = &self.denylist {
            if denylist
                .is_revoked(&claims.subject, claims.issued_at)
                .await?
            {
                debug!(email = %claims.subject, "Revoked session token presented");
                return Err(AppError::unauthorized(INVALID_TOKEN));
            }
        }

        Ok(claims)
    }
}
