//! Server-side session revocation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;

/// Records logged-out sessions until their tokens would have expired anyway.
///
/// A session is identified by its subject and issue time. Implementations
/// must make a completed `revoke` visible to every later `is_revoked` call,
/// from any task.
#[async_trait]
pub trait TokenDenylist: Send + Sync + std::fmt::Debug + 'static {
    /// Mark a session as revoked until `expires_at`.
    async fn revoke(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Whether the session has been revoked.
    async fn is_revoked(&self, subject: &str, issued_at: DateTime<Utc>) -> AppResult<bool>;
}
