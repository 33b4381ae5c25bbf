//! Login form validation.
//!
//! Runs before any credential lookup and reports every offending field at
//! once, in payload order.

use validator::ValidateEmail;

use tally_core::types::FieldError;

use crate::password::PasswordValidator;

/// Checks a login payload, returning one record per invalid field.
///
/// An empty result means the payload is well formed.
pub fn validate_login(email: &str, password: &str, policy: &PasswordValidator) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let email = email.trim();
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !email.validate_email() {
        errors.push(FieldError::new("email", "Email is not valid"));
    }

    if let Some(message) = policy.violation(password) {
        errors.push(FieldError::new("password", message));
    }

    errors
}
