//! Session cookie helpers.

use axum::http::{header, HeaderMap};
use std::time::Duration;

use crate::shared::constants::SESSION_COOKIE_NAME;

/// `Set-Cookie` value establishing a session
pub fn session_cookie(token: &str, max_age: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE_NAME,
        token,
        max_age.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", Duration::ZERO, secure)
}

/// Session token from the request's `Cookie` headers, if any
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, token)| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
