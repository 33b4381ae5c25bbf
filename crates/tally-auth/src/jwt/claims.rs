//! Session token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT claims payload as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the normalized account email.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Decoded identity asserted by a verified session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account email the session belongs to.
    pub subject: String,
    /// When the token was minted.
    pub issued_at: DateTime<Utc>,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    /// Whether the token is no longer accepted at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Remaining lifetime at `now` (zero once expired).
    pub fn remaining_at(&self, now: DateTime<Utc>) -> chrono::Duration {
        (self.expires_at - now).max(chrono::Duration::zero())
    }
}

impl TryFrom<Claims> for SessionClaims {
    type Error = super::TokenError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let issued_at = DateTime::from_timestamp(claims.iat, 0)
            .ok_or_else(|| super::TokenError::Malformed("iat out of range".to_string()))?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| super::TokenError::Malformed("exp out of range".to_string()))?;
        Ok(Self {
            subject: claims.sub,
            issued_at,
            expires_at,
        })
    }
}

/// A freshly minted, signed session token together with its claims.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    /// Encoded compact JWT.
    pub token: String,
    /// Claims signed into `token`.
    pub claims: SessionClaims,
}

impl SessionToken {
    /// Lifetime of the token from issue to expiry.
    pub fn ttl(&self) -> chrono::Duration {
        self.claims.expires_at - self.claims.issued_at
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionToken")
            .field("claims", &self.claims)
            .finish_non_exhaustive()
    }
}
