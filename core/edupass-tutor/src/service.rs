//! The two upstream collaborators of the pipeline.

use crate::error::{TutorError, TutorResult};
use async_trait::async_trait;

/// Reads the text of a homework photo.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Returns the recognized text for `subject`.
    async fn recognize(&self, image: &[u8], subject: &str) -> TutorResult<String>;
}

/// Explains recognized homework text.
#[async_trait]
pub trait ExplanationGenerator: Send + Sync {
    /// Returns formatted explanation text.
    async fn explain(&self, text: &str, subject: &str, task: &str) -> TutorResult<String>;
}

/// Stand-in for a service whose key is missing. Every call fails with
/// [`TutorError::NotConfigured`].
#[derive(Debug, Clone)]
pub struct Unconfigured {
    var: String,
}

impl Unconfigured {
    /// Creates a stand-in naming the missing variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl TextRecognizer for Unconfigured {
    async fn recognize(&self, _image: &[u8], _subject: &str) -> TutorResult<String> {
        Err(TutorError::NotConfigured(self.var.clone()))
    }
}

#[async_trait]
impl ExplanationGenerator for Unconfigured {
    async fn explain(&self, _text: &str, _subject: &str, _task: &str) -> TutorResult<String> {
        Err(TutorError::NotConfigured(self.var.clone()))
    }
}
