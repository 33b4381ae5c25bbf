//! Capability traits defined in `tally-core` and implemented by other crates.

pub mod credential_store;
pub mod denylist;
pub mod password;

pub use credential_store::{AccountStore, CredentialStore};
pub use denylist::TokenDenylist;
pub use password::PasswordVerifier;
