//! Account provisioning for operators: create accounts and reset passwords.
//!
//! Passwords pass the same policy as login, so every provisioned account can
//! sign in.

use std::sync::Arc;

use tracing::info;

use tally_core::config::AuthConfig;
use tally_core::error::AppError;
use tally_core::result::AppResult;
use tally_core::traits::{AccountStore, PasswordVerifier};
use tally_core::types::{Credential, normalize_email};

use crate::password::PasswordValidator;
use crate::session::authenticator::USER_NOT_FOUND;
use crate::validation::validate_login;

/// Hashes passwords and writes accounts to an [`AccountStore`].
#[derive(Debug, Clone)]
pub struct AccountProvisioner {
    store: Arc<dyn AccountStore>,
    verifier: Arc<dyn PasswordVerifier>,
    policy: PasswordValidator,
}

impl AccountProvisioner {
    pub fn new(
        store: Arc<dyn AccountStore>,
        verifier: Arc<dyn PasswordVerifier>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            verifier,
            policy: PasswordValidator::new(config),
        }
    }

    /// Creates an account. Fails with a validation error for a malformed
    /// payload or a taken email.
    pub async fn create(&self, email: &str, password: &str) -> AppResult<Credential> {
        self.check(email, password)?;

        let hash = self.verifier.hash(password)?;
        let credential = self.store.create(&normalize_email(email), &hash).await?;
        info!(email = %credential.email, "Account created");
        Ok(credential)
    }

    /// Creates the account unless one already uses the email.
    ///
    /// Returns `true` when a new account was stored.
    pub async fn ensure(&self, email: &str, password: &str) -> AppResult<bool> {
        if self
            .store
            .find_by_email(&normalize_email(email))
            .await?
            .is_some()
        {
            return Ok(false);
        }
        self.create(email, password).await?;
        Ok(true)
    }

    /// Replaces the password of an existing account.
    pub async fn reset_password(&self, email: &str, password: &str) -> AppResult<()> {
        self.check(email, password)?;

        let email = normalize_email(email);
        let hash = self.verifier.hash(password)?;
        if !self.store.update_password(&email, &hash).await? {
            return Err(AppError::not_found(USER_NOT_FOUND));
        }
        info!(email = %email, "Password reset");
        Ok(())
    }

    fn check(&self, email: &str, password: &str) -> AppResult<()> {
        let errors = validate_login(email, password, &self.policy);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation_fields(errors))
        }
    }
}
