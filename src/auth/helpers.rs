use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};

use super::JwtConfig;

/// Name of the cookie holding the session JWT.
pub const SESSION_COOKIE: &str = "token";

/// Finds the session cookie in a `Cookie` header value.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// Extracts the token from a `Bearer` authorization header.
pub fn token_from_bearer_header(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Returns the session token from the request headers.
/// The cookie wins over an `Authorization: Bearer` header when both are sent.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find_map(token_from_cookie_header);

    if let Some(token) = from_cookie {
        return Some(token.to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(token_from_bearer_header)
        .map(str::to_string)
}

/// `Set-Cookie` value carrying a freshly issued session token.
#[must_use]
pub fn session_cookie(token: &str, config: &JwtConfig) -> String {
    cookie(token, config.ttl_seconds(), config.secure_cookie)
}

/// `Set-Cookie` value that removes the session cookie.
#[must_use]
pub fn clear_session_cookie(config: &JwtConfig) -> String {
    cookie("", 0, config.secure_cookie)
}

fn cookie(value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={value}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
