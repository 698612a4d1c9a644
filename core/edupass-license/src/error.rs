//! Error types for the licensing module.

use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LicenseError {
    /// No key was supplied.
    #[error("license key is empty")]
    EmptyKey,

    /// The record document could not be fetched (network, auth, config).
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),

    /// The key is not present in the record document.
    #[error("license key not found")]
    KeyNotFound,

    /// The key belongs to another application.
    #[error("license key is scoped to another application (plan: {type_name})")]
    ScopeMismatch {
        /// Plan label of the rejected record.
        type_name: String,
    },

    /// The record carries a status this system does not recognize, or is
    /// not a valid record at all.
    #[error("license record corrupt: {0}")]
    RecordCorrupt(String),

    /// Writing the activated document back failed.
    #[error("failed to persist activation: {0}")]
    PersistFailure(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl LicenseError {
    /// Returns the message shown to the end user.
    ///
    /// `StoreUnavailable` always reads as a cloud connection failure so it is
    /// never mistaken for an invalid key.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyKey => "请输入卡密".to_string(),
            Self::StoreUnavailable(reason) => format!("云端连接失败: {reason}"),
            Self::KeyNotFound => "卡密不存在".to_string(),
            Self::ScopeMismatch { type_name } => {
                format!("这张卡是【{type_name}】，不能用于本项目！")
            }
            Self::RecordCorrupt(_) => "卡密状态异常".to_string(),
            Self::PersistFailure(_) => "激活记录同步失败".to_string(),
            Self::Serialization(_) => "卡密数据格式错误".to_string(),
        }
    }

    /// Returns true if the failure came from the store rather than the key.
    #[must_use]
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::PersistFailure(_))
    }
}

impl From<serde_json::Error> for LicenseError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
