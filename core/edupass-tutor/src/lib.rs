//! Photo-to-explanation tutoring pipeline for EduPass.
//!
//! A homework photo goes through two opaque upstream services:
//! 1. A vision model reads the text ([`TextRecognizer`], [`GlmVision`])
//! 2. A language model explains it for a subject and tutoring mode
//!    ([`ExplanationGenerator`], [`ChatTutor`])
//!
//! There is no retry: each step runs once per user action, and a failed
//! recognition stops the pipeline.

mod catalog;
mod chat;
mod error;
mod explain;
mod ocr;
mod pipeline;
pub mod prompt;
mod service;

pub use catalog::{find_subject, Subject, SUBJECTS};
pub use error::{TutorError, TutorResult};
pub use explain::{ChatTutor, ChatTutorConfig};
pub use ocr::{GlmVision, GlmVisionConfig};
pub use pipeline::{Lesson, TutorPipeline, TutorRequest};
pub use service::{ExplanationGenerator, TextRecognizer, Unconfigured};
