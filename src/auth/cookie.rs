//! Session cookie handling
//!
//! The session token travels in an HttpOnly `token` cookie instead of an
//! Authorization header. Production deployments serve the storefront from a
//! different origin, so the cookie needs `SameSite=None; Secure` there;
//! local development uses `SameSite=Strict` over plain HTTP.

use http::HeaderMap;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Build the Set-Cookie value that establishes a session
pub fn session_cookie(token: &str, max_age_secs: i64, production: bool) -> String {
    if production {
        format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; Secure; SameSite=None",
            SESSION_COOKIE, token, max_age_secs
        )
    } else {
        format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Strict",
            SESSION_COOKIE, token, max_age_secs
        )
    }
}

/// Build the Set-Cookie value that clears the session
pub fn clear_cookie(production: bool) -> String {
    if production {
        format!(
            "{}=; Path=/; Max-Age=0; HttpOnly; Secure; SameSite=None",
            SESSION_COOKIE
        )
    } else {
        format!(
            "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Strict",
            SESSION_COOKIE
        )
    }
}

/// Extract the session token from the Cookie header, if present
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let cookies = headers.get(http::header::COOKIE)?.to_str().ok()?;
    cookies.split(';').map(str::trim).find_map(|pair| {
        pair.strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
    })
}
