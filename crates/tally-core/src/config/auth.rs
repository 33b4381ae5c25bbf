//! Authentication configuration.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authentication and session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Must not be empty.
    pub jwt_secret: String,
    /// Session token lifetime in minutes; also the cookie max-age.
    #[serde(default = "default_ttl")]
    pub jwt_ttl_minutes: u64,
    /// Minimum accepted password length at login.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum accepted password length at login.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
    /// Keep logged-out sessions in a server-side denylist until they expire.
    #[serde(default = "default_true")]
    pub revocation_enabled: bool,
    /// Mark the session cookie `Secure`.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Account created at startup when it does not exist yet.
    #[serde(default)]
    pub bootstrap: Option<BootstrapAccount>,
}

/// Credentials for the startup account.
#[derive(Clone, Serialize, Deserialize)]
pub struct BootstrapAccount {
    /// Account email.
    pub email: String,
    /// Plaintext password, hashed before it is stored.
    pub password: String,
}

impl std::fmt::Debug for BootstrapAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAccount")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl AuthConfig {
    /// Build a config with the given secret and every other field defaulted.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            jwt_ttl_minutes: default_ttl(),
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
            revocation_enabled: default_true(),
            cookie_secure: false,
            bootstrap: None,
        }
    }

    /// Session token lifetime.
    ///
    /// Fails unless the configured minutes are positive and a token issued
    /// now would have a representable expiry.
    pub fn token_ttl(&self) -> Result<chrono::Duration, AppError> {
        i64::try_from(self.jwt_ttl_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
            .filter(|ttl| *ttl > chrono::Duration::zero())
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "auth.jwt_ttl_minutes is out of range: {}",
                    self.jwt_ttl_minutes
                ))
            })
    }
}

fn default_ttl() -> u64 {
    1440
}

fn default_password_min() -> usize {
    5
}

fn default_password_max() -> usize {
    64
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn with_ttl(minutes: u64) -> AuthConfig {
        let mut config = AuthConfig::with_secret("s");
        config.jwt_ttl_minutes = minutes;
        config
    }

    #[test]
    fn test_default_ttl() {
        assert_eq!(
            AuthConfig::with_secret("s").token_ttl().unwrap(),
            chrono::Duration::days(1)
        );
        assert_eq!(with_ttl(1).token_ttl().unwrap(), chrono::Duration::minutes(1));
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let err = with_ttl(0).token_ttl().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_oversized_ttl_is_rejected() {
        for minutes in [u64::MAX, u64::MAX / 2, i64::MAX as u64, 1 << 40] {
            let err = with_ttl(minutes).token_ttl().unwrap_err();
            assert_eq!(err.kind, ErrorKind::Configuration, "minutes = {minutes}");
        }
    }

    #[test]
    fn test_bootstrap_debug_hides_password() {
        let account = BootstrapAccount {
            email: "admin@tally.dev".to_string(),
            password: "hunter22".to_string(),
        };
        let rendered = format!("{account:?}");
        assert!(rendered.contains("admin@tally.dev"));
        assert!(!rendered.contains("hunter22"));
    }
}
