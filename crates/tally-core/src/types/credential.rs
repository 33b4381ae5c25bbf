//! Stored credential record.

use serde::{Deserialize, Serialize};

/// Association between an account email and its one-way password hash.
///
/// The email is always held in normalized form (see [`normalize_email`]).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Normalized account email.
    pub email: String,
    /// Encoded password hash (PHC string format).
    pub password_hash: String,
}

impl Credential {
    /// Create a credential, normalizing the email.
    pub fn new(email: &str, password_hash: impl Into<String>) -> Self {
        Self {
            email: normalize_email(email),
            password_hash: password_hash.into(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Trim surrounding whitespace and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
