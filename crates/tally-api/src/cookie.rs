//! Applies transport-neutral session cookies to axum cookie jars.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tally_auth::SessionCookie;

/// Converts a session cookie into its `Set-Cookie` representation.
pub fn to_cookie(session: SessionCookie) -> Cookie<'static> {
    Cookie::build((session.name, session.value))
        .path(session.path)
        .http_only(session.http_only)
        .secure(session.secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(session.max_age_seconds))
        .build()
}

/// Adds `session` to the jar, replacing any cookie with the same name.
pub fn apply(jar: CookieJar, session: SessionCookie) -> CookieJar {
    jar.add(to_cookie(session))
}

/// Reads the session token from the request cookies.
pub fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(tally_auth::session::SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value())
}
