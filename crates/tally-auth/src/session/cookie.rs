//! Transport-neutral session cookie values.

use crate::jwt::SessionToken;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "jwt";

/// The cookie the transport should set on the response.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCookie {
    /// Cookie name, always [`SESSION_COOKIE_NAME`].
    pub name: &'static str,
    /// Encoded token, or empty when clearing.
    pub value: String,
    /// Lifetime in seconds; `0` tells the client to drop the cookie.
    pub max_age_seconds: i64,
    /// Hidden from scripts.
    pub http_only: bool,
    /// Only sent over TLS.
    pub secure: bool,
    /// Cookie path.
    pub path: &'static str,
}

impl SessionCookie {
    /// Cookie carrying a freshly minted token, expiring with it.
    pub fn issue(token: &SessionToken, secure: bool) -> Self {
        Self {
            name: SESSION_COOKIE_NAME,
            value: token.token.clone(),
            max_age_seconds: token.ttl().num_seconds(),
            http_only: true,
            secure,
            path: "/",
        }
    }

    /// Cookie instructing the client to discard its session.
    pub fn cleared(secure: bool) -> Self {
        Self {
            name: SESSION_COOKIE_NAME,
            value: String::new(),
            max_age_seconds: 0,
            http_only: true,
            secure,
            path: "/",
        }
    }

    /// Whether this cookie removes the session from the client.
    pub fn is_cleared(&self) -> bool {
        self.max_age_seconds == 0
    }
}

impl std::fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCookie")
            .field("name", &self.name)
            .field("max_age_seconds", &self.max_age_seconds)
            .field("http_only", &self.http_only)
            .field("secure", &self.secure)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
