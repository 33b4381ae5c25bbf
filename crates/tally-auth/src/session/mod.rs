//! Session lifecycle: login, logout, identity checks, and revocation.

pub mod authenticator;
pub mod cookie;
pub mod denylist;

pub use authenticator::SessionAuthenticator;
pub use cookie::{SESSION_COOKIE_NAME, SessionCookie};
pub use denylist::MemoryTokenDenylist;
