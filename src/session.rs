//! Session token plumbing: header-first, cookie-fallback extraction and
//! `Set-Cookie` helpers, keyed by a configurable name.

use axum::http::{header, HeaderMap};
use subtle::ConstantTimeEq;

/// Default name used for both the token header and the token cookie.
pub const DEFAULT_COOKIE_NAME: &str = "api_token";
/// Default cookie lifetime: 7 days.
pub const DEFAULT_COOKIE_AGE_SECS: u32 = 604_800;

/// Where and for how long session tokens are carried for one service.
#[derive(Debug, Clone)]
pub struct SessionKeys {
    cookie_name: String,
    cookie_age: u32,
}

impl Default for SessionKeys {
    fn default() -> SessionKeys {
        SessionKeys::new(DEFAULT_COOKIE_NAME, DEFAULT_COOKIE_AGE_SECS)
    }
}

impl SessionKeys {
    pub fn new(cookie_name: impl Into<String>, cookie_age: u32) -> SessionKeys {
        SessionKeys {
            cookie_name: cookie_name.into(),
            cookie_age,
        }
    }

    /// The name shared by the token header and the token cookie.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Extract the session token from a request.
    ///
    /// The bearer-style header is read first; an absent or empty header falls
    /// back to the cookie of the same name. `None` when neither carries a
    /// value.
    pub fn token(&self, headers: &HeaderMap) -> Option<String> {
        let from_header = headers
            .get(self.cookie_name.as_str())
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty());
        if let Some(token) = from_header {
            return Some(token.to_string());
        }
        cookie_value(headers, &self.cookie_name)
    }

    /// `Set-Cookie` value that stores `token` for the configured lifetime.
    pub fn issue_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly",
            self.cookie_name, token, self.cookie_age
        )
    }

    /// `Set-Cookie` value that expires the stored token immediately.
    pub fn clear_cookie(&self) -> String {
        format!("{}=; Path=/; Max-Age=0; Secure; HttpOnly", self.cookie_name)
    }
}

/// Constant-time string comparison to prevent timing attacks.
/// Use this for comparing presented session tokens against stored values.
pub fn token_matches(presented: &str, expected: &str) -> bool {
    if presented.len() != expected.len() {
        return false;
    }
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Read a named cookie from the request's `Cookie` header(s).
///
/// Empty values count as absent.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .find_map(|pair| {
            let (cookie_name, value) = pair.trim().split_once('=')?;
            (cookie_name == name && !value.is_empty()).then(|| value.to_string())
        })
}
