//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Login request body.
///
/// Missing fields deserialize as empty strings so they are reported by
/// login validation alongside every other field error.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    #[serde(default)]
    pub email: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
