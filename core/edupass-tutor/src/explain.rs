//! Generation client (OpenAI-compatible chat, DeepSeek by default).

use crate::chat::{complete, ChatMessage, ChatRequest, MessageContent};
use crate::error::{TutorError, TutorResult};
use crate::prompt::{system_prompt, user_prompt};
use crate::service::ExplanationGenerator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Generation client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTutorConfig {
    /// API key (`DEEPSEEK_KEY`).
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Base URL of the chat completions API.
    pub base_url: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ChatTutorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "deepseek-chat".to_string(),
            base_url: "https://api.deepseek.com".to_string(),
            temperature: 0.3,
            timeout_secs: 120,
        }
    }
}

/// Explanation generator backed by a chat completions API.
pub struct ChatTutor {
    config: ChatTutorConfig,
    client: Client,
}

impl ChatTutor {
    /// Creates the client.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` if the API key is empty.
    pub fn new(config: ChatTutorConfig) -> TutorResult<Self> {
        if config.api_key.is_empty() {
            return Err(TutorError::NotConfigured("DEEPSEEK_KEY".to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TutorError::Reasoning(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl ExplanationGenerator for ChatTutor {
    async fn explain(&self, text: &str, subject: &str, task: &str) -> TutorResult<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(system_prompt(subject, task)),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Text(user_prompt(text)),
                },
            ],
            temperature: Some(self.config.temperature),
        };

        debug!(model = %self.config.model, subject, task, "Requesting explanation");
        let url = format!("{}/chat/completions", self.config.base_url);
        complete(&self.client, &url, &self.config.api_key, &request)
            .await
            .map_err(|e| {
                warn!("Generation request failed: {}", e);
                TutorError::Reasoning(e)
            })
    }
}
