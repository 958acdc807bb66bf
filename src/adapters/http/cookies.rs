//! Session cookies.
//!
//! Both tokens travel as `HttpOnly; SameSite=Strict; Path=/` cookies whose
//! `Max-Age` equals the token lifetime. `Secure` is added when the server is
//! configured for it (production by default).

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::AppendHeaders;

use crate::domain::auth::{IssuedToken, TokenPair, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};

/// Cookie attributes that depend on the deployment.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSettings {
    pub secure: bool,
}

impl CookieSettings {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    fn build(&self, name: &str, value: &str, max_age: u64) -> Option<HeaderValue> {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
            name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        match HeaderValue::from_str(&cookie) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(cookie = name, error = %e, "Cookie value is not a valid header");
                None
            }
        }
    }

    fn token_cookie(&self, name: &str, token: &IssuedToken) -> Option<HeaderValue> {
        self.build(name, &token.token, token.ttl_secs)
    }

    /// `Set-Cookie` headers for a freshly issued session.
    pub fn session(&self, tokens: &TokenPair) -> AppendHeaders<Vec<(HeaderName, HeaderValue)>> {
        let cookies = [
            self.token_cookie(ACCESS_TOKEN_COOKIE, &tokens.access),
            self.token_cookie(REFRESH_TOKEN_COOKIE, &tokens.refresh),
        ];
        AppendHeaders(
            cookies
                .into_iter()
                .flatten()
                .map(|value| (SET_COOKIE, value))
                .collect(),
        )
    }

    /// `Set-Cookie` headers that expire both session cookies.
    pub fn cleared(&self) -> AppendHeaders<Vec<(HeaderName, HeaderValue)>> {
        AppendHeaders(
            [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE]
                .into_iter()
                .filter_map(|name| self.build(name, "", 0))
                .map(|value| (SET_COOKIE, value))
                .collect(),
        )
    }
}

/// Reads a cookie value from the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn issued(token: &str, ttl_secs: u64) -> IssuedToken {
        IssuedToken {
            token: token.to_string(),
            token_id: "jti".to_string(),
            expires_at: Timestamp::now(),
            ttl_secs,
        }
    }

    fn pair() -> TokenPair {
        TokenPair {
            access: issued("aaa", 3600),
            refresh: issued("rrr", 604800),
        }
    }

    fn values(headers: AppendHeaders<Vec<(HeaderName, HeaderValue)>>) -> Vec<String> {
        headers
            .0
            .into_iter()
            .map(|(name, value)| {
                assert_eq!(name, SET_COOKIE);
                value.to_str().unwrap().to_string()
            })
            .collect()
    }

    #[test]
    fn session_cookies_carry_lifetimes() {
        let cookies = values(CookieSettings::new(false).session(&pair()));
        assert_eq!(
            cookies,
            vec![
                "access_token=aaa; HttpOnly; SameSite=Strict; Path=/; Max-Age=3600",
                "refresh_token=rrr; HttpOnly; SameSite=Strict; Path=/; Max-Age=604800",
            ]
        );
    }

    #[test]
    fn secure_flag_is_appended_when_enabled() {
        let cookies = values(CookieSettings::new(true).session(&pair()));
        assert!(cookies.iter().all(|c| c.ends_with("; Secure")));
    }

    #[test]
    fn cleared_cookies_expire_immediately() {
        let cookies = values(CookieSettings::default().cleared());
        assert_eq!(cookies.len(), 2);
        assert!(cookies[0].starts_with("access_token=;"));
        assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    }

    #[test]
    fn reads_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; access_token=abc.def; refresh_token="),
        );

        assert_eq!(read_cookie(&headers, ACCESS_TOKEN_COOKIE), Some("abc.def".to_string()));
        assert_eq!(read_cookie(&headers, REFRESH_TOKEN_COOKIE), None);
        assert_eq!(read_cookie(&headers, "missing"), None);
    }
}
