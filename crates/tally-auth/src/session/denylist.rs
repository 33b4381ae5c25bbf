//! In-memory revocation denylist backed by moka.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use tally_core::result::AppResult;
use tally_core::traits::TokenDenylist;

/// Expires each entry when the revoked token itself would have expired.
struct UntilTokenExpiry;

impl Expiry<String, DateTime<Utc>> for UntilTokenExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        expires_at: &DateTime<Utc>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some((*expires_at - Utc::now()).to_std().unwrap_or(Duration::ZERO))
    }
}

/// Single-node denylist keyed by subject and issue time.
///
/// Unbounded. An entry evicted before its expiry would revive a logged-out
/// session.
#[derive(Clone)]
pub struct MemoryTokenDenylist {
    /// Revoked session keys mapped to the token expiry.
    cache: Cache<String, DateTime<Utc>>,
}

impl std::fmt::Debug for MemoryTokenDenylist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTokenDenylist")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl MemoryTokenDenylist {
    /// Create an empty denylist.
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().expire_after(UntilTokenExpiry).build(),
        }
    }

    fn key(subject: &str, issued_at: DateTime<Utc>) -> String {
        format!("{subject}:{}", issued_at.timestamp())
    }
}

impl Default for MemoryTokenDenylist {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenDenylist for MemoryTokenDenylist {
    async fn revoke(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        if expires_at <= Utc::now() {
            return Ok(());
        }
        self.cache
            .insert(Self::key(subject, issued_at), expires_at)
            .await;
        debug!(subject, %expires_at, "Session revoked");
        Ok(())
    }

    async fn is_revoked(&self, subject: &str, issued_at: DateTime<Utc>) -> AppResult<bool> {
        Ok(self.cache.get(&Self::key(subject, issued_at)).await.is_some())
    }
}
