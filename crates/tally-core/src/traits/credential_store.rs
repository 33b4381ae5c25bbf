//! Credential lookup capability.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::Credential;

/// Read access to stored credentials, keyed by normalized email.
///
/// Implementations own their concurrency guarantees; callers may issue
/// lookups from any number of tasks at once.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find the credential for an already-normalized email.
    ///
    /// Returns `Ok(None)` when no account uses the address.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Credential>>;
}

/// Write access used to provision accounts outside the login flow.
#[async_trait]
pub trait AccountStore: CredentialStore {
    /// Store a new account. Fails with a validation error when the email is
    /// already taken.
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<Credential>;

    /// Replace the hash for an existing account. Returns `false` when no
    /// account uses the address.
    async fn update_password(&self, email: &str, password_hash: &str) -> AppResult<bool>;
}
