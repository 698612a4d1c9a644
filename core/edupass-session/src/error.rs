//! Error types for session binding.

use edupass_license::LicenseError;
use thiserror::Error;

/// Result type for credential jar operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors from the persisted-credential jar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The credential could not be written.
    #[error("failed to store credential: {0}")]
    Store(String),

    /// The credential could not be cleared.
    #[error("failed to clear credential: {0}")]
    Clear(String),
}

/// Why a privileged action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No session and no usable persisted credential.
    #[error("not logged in")]
    LoggedOut,

    /// A persisted credential was presented but failed validation.
    #[error("access denied: {0}")]
    Denied(#[from] LicenseError),
}

impl AccessError {
    /// Returns the message shown to the end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::LoggedOut => "请先输入卡密登录".to_string(),
            Self::Denied(e) => e.user_message(),
        }
    }
}
