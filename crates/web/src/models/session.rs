//! Session tokens carried in cookies.
//!
//! The provider owns the session. Between requests the browser holds the
//! provider's access and refresh tokens in two named cookies.

use axum::http::{HeaderMap, header::COOKIE};
use secrecy::SecretString;
use tower_sessions::cookie::Cookie;

/// Names of the session cookies.
pub mod cookie_names {
    /// Provider access token (short-lived JWT).
    pub const ACCESS_TOKEN: &str = "sb-access-token";

    /// Provider refresh token.
    pub const REFRESH_TOKEN: &str = "sb-refresh-token";

    /// Both session cookies, in the order they are cleared.
    pub const ALL: [&str; 2] = [ACCESS_TOKEN, REFRESH_TOKEN];
}

/// Provider tokens read from the request cookies.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
}

impl SessionTokens {
    /// Read the session cookies from request headers.
    ///
    /// Returns `None` when the access-token cookie is missing or empty.
    /// Malformed cookie pairs are skipped.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let mut access_token = None;
        let mut refresh_token = None;

        for cookie in request_cookies(headers) {
            let value = cookie.value();
            if value.is_empty() {
                continue;
            }
            match cookie.name() {
                cookie_names::ACCESS_TOKEN => access_token = Some(value.to_string()),
                cookie_names::REFRESH_TOKEN => refresh_token = Some(value.to_string()),
                _ => {}
            }
        }

        Some(Self {
            access_token: SecretString::from(access_token?),
            refresh_token: refresh_token.map(SecretString::from),
        })
    }

    /// Which session cookies are present, by name. Never exposes values.
    #[must_use]
    pub fn presence(headers: &HeaderMap) -> [(&'static str, bool); 2] {
        cookie_names::ALL.map(|name| (name, cookie_present(headers, name)))
    }
}

fn request_cookies(headers: &HeaderMap) -> impl Iterator<Item = Cookie<'_>> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
}

fn cookie_present(headers: &HeaderMap, name: &str) -> bool {
    request_cookies(headers).any(|cookie| cookie.name() == name && !cookie.value().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;
    use secrecy::ExposeSecret;

    use super::*;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(COOKIE, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_reads_both_tokens() {
        let headers = headers(&["theme=dark; sb-access-token=abc.def.ghi; sb-refresh-token=r1"]);
        let tokens = SessionTokens::from_headers(&headers).unwrap();

        assert_eq!(tokens.access_token.expose_secret(), "abc.def.ghi");
        assert_eq!(tokens.refresh_token.unwrap().expose_secret(), "r1");
    }

    #[test]
    fn test_reads_across_multiple_cookie_headers() {
        let headers = headers(&["sb-refresh-token=r2", "sb-access-token=a2"]);
        let tokens = SessionTokens::from_headers(&headers).unwrap();
        assert_eq!(tokens.access_token.expose_secret(), "a2");
    }

    #[test]
    fn test_missing_or_empty_access_token() {
        assert!(SessionTokens::from_headers(&HeaderMap::new()).is_none());
        assert!(SessionTokens::from_headers(&headers(&["sb-refresh-token=r3"])).is_none());
        assert!(SessionTokens::from_headers(&headers(&["sb-access-token="])).is_none());
    }

    #[test]
    fn test_presence() {
        let only_refresh = headers(&["sb-refresh-token=r4"]);
        assert_eq!(
            SessionTokens::presence(&only_refresh),
            [
                (cookie_names::ACCESS_TOKEN, false),
                (cookie_names::REFRESH_TOKEN, true)
            ]
        );
    }
}
