//! Cookie header plumbing and the request-scoped credential jar.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use chrono::{DateTime, Utc};
use edupass_session::{CredentialJar, SessionError, SessionResult, CREDENTIAL_COOKIE};
use tracing::warn;

/// Name of the session id cookie.
pub const SESSION_COOKIE: &str = "edupass_sid";

const ATTRIBUTES: &str = "Path=/; HttpOnly; SameSite=Lax";

/// Returns the value of cookie `name` from the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim_matches('"').to_string())
        .filter(|v| !v.is_empty())
}

/// `Set-Cookie` value for a browser-session cookie.
pub fn session_cookie(name: &str, value: &str) -> String {
    format!("{name}={value}; {ATTRIBUTES}")
}

/// `Set-Cookie` value that expires after `max_age_secs`.
pub fn persistent_cookie(name: &str, value: &str, max_age_secs: i64) -> String {
    format!("{name}={value}; Max-Age={max_age_secs}; {ATTRIBUTES}")
}

/// `Set-Cookie` value that deletes cookie `name`.
pub fn removal_cookie(name: &str) -> String {
    format!("{name}=; Max-Age=0; {ATTRIBUTES}")
}

fn is_cookie_safe(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_graphic() && !matches!(c, '"' | ',' | ';' | '\\'))
}

/// Credential jar over one request's cookies.
///
/// Reads the credential the browser sent and records the `Set-Cookie`
/// values a handler produces, to be attached to the response.
#[derive(Debug, Default)]
pub struct RequestJar {
    current: Option<String>,
    set_cookies: Vec<String>,
}

impl RequestJar {
    /// Creates a jar from the request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            current: read_cookie(headers, CREDENTIAL_COOKIE),
            set_cookies: Vec::new(),
        }
    }

    /// `Set-Cookie` values produced so far.
    pub fn set_cookies(&self) -> &[String] {
        &self.set_cookies
    }

    /// Appends the produced `Set-Cookie` values to `headers`.
    pub fn write_to(self, headers: &mut HeaderMap) {
        for cookie in self.set_cookies {
            append_set_cookie(headers, &cookie);
        }
    }
}

/// Appends one `Set-Cookie` header, skipping values that are not valid
/// header text.
pub fn append_set_cookie(headers: &mut HeaderMap, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(e) => warn!("Dropping invalid Set-Cookie value: {}", e),
    }
}

impl CredentialJar for RequestJar {
    fn load(&self) -> Option<String> {
        self.current.clone()
    }

    fn store(&mut self, key: &str, expires_at: DateTime<Utc>) -> SessionResult<()> {
        if !is_cookie_safe(key) {
            return Err(SessionError::Store(
                "key contains characters not allowed in a cookie".to_string(),
            ));
        }
        let max_age = (expires_at - Utc::now()).num_seconds().max(0);
        self.set_cookies
            .push(persistent_cookie(CREDENTIAL_COOKIE, key, max_age));
        self.current = Some(key.to_string());
        Ok(())
    }

    fn clear(&mut self) -> SessionResult<()> {
        self.set_cookies.push(removal_cookie(CREDENTIAL_COOKIE));
        self.current = None;
        Ok(())
    }
}
