//! Environment configuration.

use edupass_store::{
    GistConfig, GistStore, RecordStore, StoreError, UnconfiguredStore, DEFAULT_GIST_FILE,
};
use edupass_tutor::{
    ChatTutor, ChatTutorConfig, ExplanationGenerator, GlmVision, GlmVisionConfig, TextRecognizer,
    Unconfigured,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Application scope used when `EDUPASS_APP_SCOPE` is unset.
pub const DEFAULT_APP_SCOPE: &str = "tutor";

/// Settings read from the environment. Empty values count as unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub github_token: String,
    pub gist_id: String,
    pub gist_file: String,
    pub zhipu_key: String,
    pub deepseek_key: String,
    pub app_scope: String,
}

impl AppConfig {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_map(&std::env::vars().collect())
    }

    /// Reads settings from `vars` (useful for testing).
    pub fn from_map(vars: &HashMap<String, String>) -> Self {
        let get = |name: &str| {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        let or_default = |value: String, default: &str| {
            if value.is_empty() {
                default.to_string()
            } else {
                value
            }
        };

        Self {
            github_token: get("GITHUB_TOKEN"),
            gist_id: get("GIST_ID"),
            gist_file: or_default(get("GIST_FILE"), DEFAULT_GIST_FILE),
            zhipu_key: get("ZHIPU_KEY"),
            deepseek_key: get("DEEPSEEK_KEY"),
            app_scope: or_default(get("EDUPASS_APP_SCOPE"), DEFAULT_APP_SCOPE),
        }
    }

    /// The Gist-backed record store, or a store that reports why it is
    /// unavailable on every call.
    pub fn record_store(&self) -> Arc<dyn RecordStore> {
        let config = GistConfig {
            token: self.github_token.clone(),
            gist_id: self.gist_id.clone(),
            file_name: self.gist_file.clone(),
            ..Default::default()
        };
        match GistStore::new(config) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!("Record store unavailable: {}", e);
                let reason = match e {
                    StoreError::Config(reason) => reason,
                    other => other.to_string(),
                };
                Arc::new(UnconfiguredStore::new(reason))
            }
        }
    }

    /// The vision client, or a stand-in naming the missing key.
    pub fn recognizer(&self) -> Arc<dyn TextRecognizer> {
        let config = GlmVisionConfig {
            api_key: self.zhipu_key.clone(),
            ..Default::default()
        };
        match GlmVision::new(config) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                warn!("Vision service unavailable: {}", e);
                Arc::new(Unconfigured::new("ZHIPU_KEY"))
            }
        }
    }

    /// The generation client, or a stand-in naming the missing key.
    pub fn generator(&self) -> Arc<dyn ExplanationGenerator> {
        let config = ChatTutorConfig {
            api_key: self.deepseek_key.clone(),
            ..Default::default()
        };
        match ChatTutor::new(config) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                warn!("Generation service unavailable: {}", e);
                Arc::new(Unconfigured::new("DEEPSEEK_KEY"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_empty() {
        let cfg = AppConfig::from_map(&HashMap::new());
        assert_eq!(cfg.gist_file, "licenses.json");
        assert_eq!(cfg.app_scope, "tutor");
        assert!(cfg.github_token.is_empty());
    }

    #[test]
    fn reads_and_trims_values() {
        let cfg = AppConfig::from_map(&vars(&[
            ("GITHUB_TOKEN", " ghp_x "),
            ("GIST_ID", "abc"),
            ("GIST_FILE", "keys.json"),
            ("EDUPASS_APP_SCOPE", "diet"),
        ]));
        assert_eq!(cfg.github_token, "ghp_x");
        assert_eq!(cfg.gist_id, "abc");
        assert_eq!(cfg.gist_file, "keys.json");
        assert_eq!(cfg.app_scope, "diet");
    }

    #[test]
    fn blank_scope_falls_back() {
        let cfg = AppConfig::from_map(&vars(&[("EDUPASS_APP_SCOPE", "  ")]));
        assert_eq!(cfg.app_scope, DEFAULT_APP_SCOPE);
    }

    #[tokio::test]
    async fn missing_store_config_degrades() {
        let store = AppConfig::from_map(&HashMap::new()).record_store();
        assert_eq!(store.backend_name(), "unconfigured");
        let err = store.fetch().await.unwrap_err();
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[tokio::test]
    async fn missing_service_keys_degrade() {
        let cfg = AppConfig::from_map(&HashMap::new());
        let err = cfg.recognizer().recognize(&[1], "数学").await.unwrap_err();
        assert_eq!(err.to_string(), "ZHIPU_KEY not configured");
        let err = cfg.generator().explain("t", "数学", "概念辨析").await.unwrap_err();
        assert_eq!(err.to_string(), "DEEPSEEK_KEY not configured");
    }
}
