//! Vision client (Zhipu GLM-4V).

use crate::chat::{complete, ChatMessage, ChatRequest, ContentPart, ImageRef, MessageContent};
use crate::error::{TutorError, TutorResult};
use crate::prompt::{ocr_prompt, NO_TEXT_SENTINEL};
use crate::service::TextRecognizer;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Vision client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlmVisionConfig {
    /// API key (`ZHIPU_KEY`).
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Base URL of the chat completions API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GlmVisionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "glm-4v".to_string(),
            base_url: "https://open.bigmodel.cn/api/paas/v4".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Text recognizer backed by a GLM vision model.
pub struct GlmVision {
    config: GlmVisionConfig,
    client: Client,
}

impl GlmVision {
    /// Creates the client.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` if the API key is empty.
    pub fn new(config: GlmVisionConfig) -> TutorResult<Self> {
        if config.api_key.is_empty() {
            return Err(TutorError::NotConfigured("ZHIPU_KEY".to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TutorError::Recognition(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl TextRecognizer for GlmVision {
    async fn recognize(&self, image: &[u8], subject: &str) -> TutorResult<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: ocr_prompt(subject),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageRef {
                            url: BASE64.encode(image),
                        },
                    },
                ]),
            }],
            temperature: None,
        };

        debug!(model = %self.config.model, bytes = image.len(), "Sending image for recognition");
        let url = format!("{}/chat/completions", self.config.base_url);
        let text = complete(&self.client, &url, &self.config.api_key, &request)
            .await
            .map_err(|e| {
                warn!("Vision request failed: {}", e);
                TutorError::Recognition(e)
            })?;

        let text = text.trim();
        if text.is_empty() || text == NO_TEXT_SENTINEL {
            return Err(TutorError::NoTextDetected);
        }
        Ok(text.to_string())
    }
}
