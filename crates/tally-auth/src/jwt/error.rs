//! Token codec failures.

use thiserror::Error;

use tally_core::error::{AppError, ErrorKind};

/// Why a token could not be produced or accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token could not be signed (missing secret, bad lifetime, encoder failure).
    #[error("token signing failed: {0}")]
    Signing(String),
    /// The token is not a structurally valid session token.
    #[error("malformed token: {0}")]
    Malformed(String),
    /// The signature does not verify against the signing secret.
    #[error("token signature does not match")]
    InvalidSignature,
    /// The token's expiry time has passed.
    #[error("token has expired")]
    Expired,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(_) => {
                AppError::with_source(ErrorKind::Internal, "Token signing failed", err)
            }
            _ => AppError::unauthorized("Invalid JWT token"),
        }
    }
}
