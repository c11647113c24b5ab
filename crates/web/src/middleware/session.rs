//! Session cookie construction.
//!
//! The provider's tokens are stored in two cookies (see
//! [`cookie_names`](crate::models::cookie_names)). Both are `HttpOnly`,
//! `SameSite=Lax`, scoped to `/`, and `Secure` when served over HTTPS.

use axum::http::{
    HeaderMap, HeaderValue,
    header::{InvalidHeaderValue, SET_COOKIE},
};
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

use crate::models::cookie_names;

/// Refresh token cookie lifetime in seconds (30 days).
pub const REFRESH_TOKEN_MAX_AGE_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Build a session cookie carrying `value`.
#[must_use]
pub fn session_cookie(
    name: &'static str,
    value: String,
    max_age_seconds: i64,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(max_age_seconds))
        .build()
}

/// Build a cookie that tells the browser to delete `name`.
#[must_use]
pub fn removal_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = session_cookie(name, String::new(), 0, secure);
    cookie.make_removal();
    cookie
}

/// Append a `Set-Cookie` header.
///
/// # Errors
///
/// Returns an error if the serialized cookie is not a valid header value.
pub fn append_cookie(
    headers: &mut HeaderMap,
    cookie: &Cookie<'_>,
) -> Result<(), InvalidHeaderValue> {
    let value = HeaderValue::from_str(&cookie.to_string())?;
    headers.append(SET_COOKIE, value);
    Ok(())
}

/// `Set-Cookie` headers clearing both session cookies.
///
/// # Errors
///
/// Returns an error if a removal cookie cannot be encoded as a header.
pub fn clear_session_cookies(secure: bool) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    for name in cookie_names::ALL {
        append_cookie(&mut headers, &removal_cookie(name, secure))?;
    }
    Ok(headers)
}
