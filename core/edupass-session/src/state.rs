//! Per-session authentication state.

use serde::{Deserialize, Serialize};

/// What the running session knows about the user.
///
/// This is the in-process half of the credential. It is passed into each
/// handler and handed back afterwards; the persisted half lives in a
/// [`CredentialJar`](crate::CredentialJar).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    /// True once a key has been validated in this session.
    pub session_granted: bool,
    /// The key that was granted.
    pub credential: Option<String>,
    /// Set by logout; suppresses passive recall for the rest of the session
    /// even if the persisted credential could not be cleared.
    #[serde(default)]
    pub signed_out: bool,
}

impl AuthState {
    /// State of a session that has just been granted `key`.
    pub fn granted(key: impl Into<String>) -> Self {
        Self {
            session_granted: true,
            credential: Some(key.into()),
            signed_out: false,
        }
    }

    /// State of a session that has just logged out.
    pub fn signed_out() -> Self {
        Self {
            session_granted: false,
            credential: None,
            signed_out: true,
        }
    }

    /// Returns the granted key, if the session flag is set.
    pub fn granted_key(&self) -> Option<&str> {
        if self.session_granted {
            self.credential.as_deref()
        } else {
            None
        }
    }
}
