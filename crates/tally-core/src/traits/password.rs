//! One-way password hashing capability.

use crate::result::AppResult;

/// Hashes passwords and checks plaintext candidates against stored hashes.
///
/// Both operations may be slow by construction; they are synchronous and
/// callers decide where to run them.
pub trait PasswordVerifier: Send + Sync + std::fmt::Debug + 'static {
    /// Produce an encoded hash for a new password.
    fn hash(&self, password: &str) -> AppResult<String>;

    /// Returns `Ok(true)` if `password` matches `hash`, `Ok(false)` if not.
    ///
    /// An unreadable `hash` is an error, not a mismatch.
    fn verify(&self, password: &str, hash: &str) -> AppResult<bool>;
}
