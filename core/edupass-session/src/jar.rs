//! Persisted credential storage.

use crate::error::{SessionError, SessionResult};
use chrono::{DateTime, Utc};

/// Name of the persisted credential.
pub const CREDENTIAL_COOKIE: &str = "user_license";

/// Lifetime of the persisted credential, renewed on every login.
pub const CREDENTIAL_TTL_DAYS: i64 = 365;

/// Client-side storage for the last known good license key.
pub trait CredentialJar {
    /// Reads the persisted key, if any.
    fn load(&self) -> Option<String>;

    /// Persists `key` until `expires_at`.
    fn store(&mut self, key: &str, expires_at: DateTime<Utc>) -> SessionResult<()>;

    /// Removes the persisted key.
    fn clear(&mut self) -> SessionResult<()>;
}

/// Jar held in memory, with failure injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryJar {
    value: Option<(String, DateTime<Utc>)>,
    fail_store: bool,
    fail_clear: bool,
}

impl MemoryJar {
    /// Creates an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a jar already holding `key`, as a returning browser would.
    pub fn holding(key: impl Into<String>) -> Self {
        let expires = Utc::now() + chrono::Duration::days(CREDENTIAL_TTL_DAYS);
        Self {
            value: Some((key.into(), expires)),
            ..Default::default()
        }
    }

    /// Returns the expiry of the stored key.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.value.as_ref().map(|(_, exp)| *exp)
    }

    /// Makes `store` fail.
    pub fn fail_store(mut self) -> Self {
        self.fail_store = true;
        self
    }

    /// Makes `clear` fail.
    pub fn fail_clear(mut self) -> Self {
        self.fail_clear = true;
        self
    }
}

impl CredentialJar for MemoryJar {
    fn load(&self) -> Option<String> {
        self.value
            .as_ref()
            .filter(|(_, exp)| *exp > Utc::now())
            .map(|(key, _)| key.clone())
    }

    fn store(&mut self, key: &str, expires_at: DateTime<Utc>) -> SessionResult<()> {
        if self.fail_store {
            return Err(SessionError::Store("jar is read-only".to_string()));
        }
        self.value = Some((key.to_string(), expires_at));
        Ok(())
    }

    fn clear(&mut self) -> SessionResult<()> {
        if self.fail_clear {
            return Err(SessionError::Clear("jar is read-only".to_string()));
        }
        self.value = None;
        Ok(())
    }
}
