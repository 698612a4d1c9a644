//! Tutoring pipeline error types.

use thiserror::Error;

/// Result type for tutoring operations.
pub type TutorResult<T> = Result<T, TutorError>;

/// Errors from the tutoring pipeline and its upstream services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TutorError {
    /// The service key for this step is missing.
    #[error("{0} not configured")]
    NotConfigured(String),

    /// The request is malformed (unknown subject, empty image, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The vision service failed.
    #[error("recognition failed: {0}")]
    Recognition(String),

    /// The vision service answered but found nothing to read.
    #[error("recognition failed: no text detected")]
    NoTextDetected,

    /// The generation service failed.
    #[error("reasoning failed: {0}")]
    Reasoning(String),
}

impl TutorError {
    /// Returns the message shown to the end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured(var) => format!("Error: {var} 未配置"),
            Self::InvalidRequest(reason) => format!("请求无效: {reason}"),
            Self::Recognition(reason) => format!("图片识别失败: {reason}"),
            Self::NoTextDetected => "图片识别失败：未检测到有效内容".to_string(),
            Self::Reasoning(reason) => format!("AI思考失败: {reason}"),
        }
    }

    /// Returns true if an upstream service call failed.
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            Self::Recognition(_) | Self::NoTextDetected | Self::Reasoning(_)
        )
    }
}
