//! HS256 session token signing and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use tally_core::config::AuthConfig;

use super::claims::{Claims, SessionClaims, SessionToken};
use super::error::TokenError;

/// Encodes and decodes signed session tokens.
///
/// Holds only the key material derived from the process-wide secret; every
/// operation is a pure function of its inputs and that secret.
#[derive(Clone)]
pub struct TokenCodec {
    /// HMAC key for signing.
    encoding_key: EncodingKey,
    /// HMAC key for verification.
    decoding_key: DecodingKey,
    /// Signature and structure checks; expiry is checked separately.
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, TokenError> {
        Self::from_secret(config.jwt_secret.as_bytes())
    }

    /// Creates a codec from a raw signing secret.
    ///
    /// An empty secret cannot sign anything and is rejected up front.
    pub fn from_secret(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::Signing(
                "JWT signing secret is not configured".to_string(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Signs a token for `subject` issued at `issued_at` and valid for `ttl`.
    ///
    /// Timestamps are truncated to whole seconds, so identical inputs always
    /// produce identical tokens.
    pub fn encode(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<SessionToken, TokenError> {
        if ttl <= Duration::zero() {
            return Err(TokenError::Signing(
                "token lifetime must be positive".to_string(),
            ));
        }

        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Signing("token expiry is out of range".to_string()))?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(SessionToken {
            token,
            claims: SessionClaims::try_from(claims)?,
        })
    }

    /// Verifies a token against the current time.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.decode_at(token, Utc::now())
    }

    /// Verifies a token as of `now`.
    ///
    /// The token is accepted only if the signature verifies and
    /// `now < expires_at`.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            },
        )?;

        let claims = SessionClaims::try_from(token_data.claims)?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
