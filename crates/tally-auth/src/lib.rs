//! # tally-auth
//!
//! Stateless cookie-session authentication for Tally.
//!
//! ## Modules
//!
//! - `accounts` — operator-side account creation and password resets
//! - `jwt` — signed session token encoding and decoding
//! - `password` — Argon2id hashing and the login password policy
//! - `validation` — login form checks producing field-level errors
//! - `session` — the session authenticator, cookie values, and revocation denylist

pub mod accounts;
pub mod jwt;
pub mod password;
pub mod session;
pub mod validation;

pub use accounts::AccountProvisioner;
pub use jwt::{SessionClaims, SessionToken, TokenCodec, TokenError};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{MemoryTokenDenylist, SessionAuthenticator, SessionCookie};
