//! Password policy applied to login attempts.
//!
//! Every stored hash was produced from a password inside this policy, so a
//! candidate outside it can be rejected before any lookup or hash work.

use tally_core::config::AuthConfig;

/// Validates login passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
    /// Maximum password length in characters.
    max_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_bounds(config.password_min_length, config.password_max_length)
    }

    /// Creates a validator with explicit length bounds.
    pub fn with_bounds(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length: max_length.max(min_length),
        }
    }

    /// Returns the first policy violation, or `None` if the password is acceptable.
    pub fn violation(&self, password: &str) -> Option<String> {
        if password.is_empty() {
            return Some("Password is required".to_string());
        }

        let length = password.chars().count();
        if length < self.min_length || length > self.max_length {
            return Some(format!(
                "Password must be between {} and {} characters",
                self.min_length, self.max_length
            ));
        }

        if !password.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Some("Password may only contain letters and digits".to_string());
        }

        None
    }
}
