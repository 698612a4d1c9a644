//! Binds a license key to a session and to a persisted credential.

use crate::error::AccessError;
use crate::gate::LicenseGate;
use crate::jar::{CredentialJar, CREDENTIAL_TTL_DAYS};
use crate::state::AuthState;
use chrono::{Duration, Utc};
use edupass_license::mask_key;
use tracing::{debug, info, warn};

/// Session state plus its persisted credential.
///
/// The session flag is the cheap, same-session answer. The persisted
/// credential is only a hint: before it is trusted again it is re-validated
/// against the record store.
pub struct SessionBinder<J: CredentialJar> {
    state: AuthState,
    jar: J,
}

impl<J: CredentialJar> SessionBinder<J> {
    /// Wraps a session's state and its jar.
    pub fn new(state: AuthState, jar: J) -> Self {
        Self { state, jar }
    }

    /// The current session state.
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// The persisted credential jar.
    pub fn jar(&self) -> &J {
        &self.jar
    }

    /// Hands the state and jar back to the caller.
    pub fn into_parts(self) -> (AuthState, J) {
        (self.state, self.jar)
    }

    /// Marks the session granted and persists `key` for a year.
    ///
    /// A jar failure is logged; the session stays granted.
    pub fn remember(&mut self, key: &str) {
        self.state = AuthState::granted(key);

        let expires_at = Utc::now() + Duration::days(CREDENTIAL_TTL_DAYS);
        if let Err(e) = self.jar.store(key, expires_at) {
            warn!(key = %mask_key(key), "Failed to persist credential: {}", e);
        }
    }

    /// Logs out. Always succeeds from the caller's point of view.
    pub fn forget(&mut self) {
        self.state = AuthState::signed_out();
        if let Err(e) = self.jar.clear() {
            warn!("Failed to clear persisted credential: {}", e);
        }
    }

    /// Unconditionally clears session and persisted credential.
    pub fn force_reset(&mut self) {
        info!("Session force reset");
        self.forget();
    }

    /// Passive auto-login. Never errors and never activates.
    pub async fn recall(&mut self, gate: &LicenseGate) -> Option<String> {
        match self.authorize(gate).await {
            Ok(key) => Some(key),
            Err(e) => {
                debug!("Passive login declined: {}", e);
                None
            }
        }
    }

    /// Resolves the key allowed to perform a privileged action.
    ///
    /// Order: session flag, then the persisted credential (shape check,
    /// then full validation against a fresh snapshot). A credential that
    /// fails either check is forgotten.
    ///
    /// # Errors
    ///
    /// `LoggedOut` when there is nothing to check, `Denied` with the
    /// validator's reason otherwise.
    pub async fn authorize(&mut self, gate: &LicenseGate) -> Result<String, AccessError> {
        if let Some(key) = self.state.granted_key() {
            return Ok(key.to_string());
        }
        if self.state.signed_out {
            return Err(AccessError::LoggedOut);
        }

        let Some(key) = self.jar.load() else {
            return Err(AccessError::LoggedOut);
        };

        if !gate.shape().matches(&key) {
            debug!("Persisted credential has the wrong shape, discarding");
            self.forget();
            return Err(AccessError::LoggedOut);
        }

        match gate.check(&key).await {
            Ok(_) => {
                debug!(key = %mask_key(&key), "Persisted credential re-validated");
                self.state = AuthState::granted(key.clone());
                Ok(key)
            }
            Err(e) => {
                info!(key = %mask_key(&key), "Persisted credential rejected: {}", e);
                self.forget();
                Err(AccessError::Denied(e))
            }
        }
    }

    /// The granted key with its middle hidden, for display.
    pub fn masked_key(&self) -> Option<String> {
        self.state.granted_key().map(mask_key)
    }
}
