//! Photo → recognized text → explanation.

use crate::catalog::find_subject;
use crate::error::{TutorError, TutorResult};
use crate::service::{ExplanationGenerator, TextRecognizer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// One tutoring request.
#[derive(Debug, Clone)]
pub struct TutorRequest {
    /// Subject name from the catalogue.
    pub subject: String,
    /// Tutoring mode offered by that subject.
    pub task: String,
    /// Raw image bytes.
    pub image: Vec<u8>,
}

/// Result of a tutoring request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Text read from the photo.
    pub recognized_text: String,
    /// Explanation in Markdown.
    pub explanation: String,
}

/// Runs the two upstream steps in order. Each is attempted once.
#[derive(Clone)]
pub struct TutorPipeline {
    recognizer: Arc<dyn TextRecognizer>,
    generator: Arc<dyn ExplanationGenerator>,
}

impl TutorPipeline {
    /// Creates a pipeline over the given services.
    pub fn new(recognizer: Arc<dyn TextRecognizer>, generator: Arc<dyn ExplanationGenerator>) -> Self {
        Self {
            recognizer,
            generator,
        }
    }

    /// Recognizes the photo and explains it.
    ///
    /// Callers gate access before calling this.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` before any service call; otherwise the first
    /// failing step's error. Generation is not attempted if recognition
    /// fails.
    pub async fn run(&self, request: &TutorRequest) -> TutorResult<Lesson> {
        let subject = find_subject(&request.subject).ok_or_else(|| {
            TutorError::InvalidRequest(format!("unknown subject: {}", request.subject))
        })?;
        if !subject.offers(&request.task) {
            return Err(TutorError::InvalidRequest(format!(
                "{} has no task {}",
                subject.name, request.task
            )));
        }
        if request.image.is_empty() {
            return Err(TutorError::InvalidRequest("image is empty".to_string()));
        }

        let recognized_text = self
            .recognizer
            .recognize(&request.image, subject.name)
            .await
            .inspect_err(|e| warn!(subject = subject.name, "Recognition step failed: {}", e))?;

        let explanation = self
            .generator
            .explain(&recognized_text, subject.name, &request.task)
            .await
            .inspect_err(|e| warn!(subject = subject.name, "Generation step failed: {}", e))?;

        info!(
            subject = subject.name,
            task = %request.task,
            chars = explanation.chars().count(),
            "Lesson generated"
        );
        Ok(Lesson {
            recognized_text,
            explanation,
        })
    }
}
