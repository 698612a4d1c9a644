//! GitHub Gist backend.
//!
//! The document lives in one named file of a Gist. Reads use
//! `GET /gists/{id}`, writes replace the file content with
//! `PATCH /gists/{id}`.

use crate::error::{StoreError, StoreResult};
use crate::RecordStore;
use async_trait::async_trait;
use edupass_license::LicenseDb;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

/// File name used inside the Gist when none is configured.
pub const DEFAULT_GIST_FILE: &str = "licenses.json";

/// Gist backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistConfig {
    /// Personal access token with `gist` scope.
    pub token: String,
    /// Gist identifier.
    pub gist_id: String,
    /// Name of the file holding the document.
    pub file_name: String,
    /// Base URL for the GitHub API (e.g. `https://api.github.com`).
    pub api_base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GistConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            gist_id: String::new(),
            file_name: DEFAULT_GIST_FILE.to_string(),
            api_base_url: "https://api.github.com".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GistResponse {
    files: HashMap<String, GistFile>,
}

#[derive(Debug, Deserialize)]
struct GistFile {
    content: Option<String>,
    #[serde(default)]
    truncated: bool,
    raw_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct GistUpdate<'a> {
    files: HashMap<&'a str, GistFileUpdate>,
}

#[derive(Debug, Serialize)]
struct GistFileUpdate {
    content: String,
}

/// Record store backed by a GitHub Gist.
pub struct GistStore {
    config: GistConfig,
    client: Client,
}

impl GistStore {
    /// Creates a new Gist store.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the token or Gist id is empty, or `Http` if the
    /// client cannot be built.
    pub fn new(config: GistConfig) -> StoreResult<Self> {
        if config.token.is_empty() {
            return Err(StoreError::Config("GITHUB_TOKEN not configured".to_string()));
        }
        if config.gist_id.is_empty() {
            return Err(StoreError::Config("GIST_ID not configured".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("edupass/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GistConfig {
        &self.config
    }

    fn gist_url(&self) -> String {
        format!("{}/gists/{}", self.config.api_base_url, self.config.gist_id)
    }

    fn auth_header(&self) -> String {
        format!("token {}", self.config.token)
    }

    /// Maps a non-success response to a store error.
    async fn check_status(&self, response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                StoreError::AuthFailed(format!("{status}: {body}"))
            }
            StatusCode::NOT_FOUND => {
                StoreError::NotFound(format!("gist {}", self.config.gist_id))
            }
            _ => StoreError::Api(format!("{status}: {body}")),
        })
    }

    /// Downloads the full content of a file the API reported as truncated.
    async fn fetch_raw(&self, raw_url: &str) -> StoreResult<String> {
        debug!("Gist file truncated, fetching raw content");
        let response = self
            .client
            .get(raw_url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;
        let response = self.check_status(response).await?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl RecordStore for GistStore {
    fn backend_name(&self) -> &'static str {
        "GitHub Gist"
    }

    async fn fetch(&self) -> StoreResult<LicenseDb> {
        // Timestamp query defeats intermediary caches.
        let nonce = chrono::Utc::now().timestamp_millis().to_string();
        let response = self
            .client
            .get(self.gist_url())
            .header("Authorization", self.auth_header())
            .header("Accept", "application/vnd.github+json")
            .query(&[("t", nonce.as_str())])
            .send()
            .await?;
        let response = self.check_status(response).await?;

        let mut gist: GistResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Api(format!("failed to parse gist response: {e}")))?;

        let file = gist.files.remove(&self.config.file_name).ok_or_else(|| {
            StoreError::NotFound(format!("file {} in gist", self.config.file_name))
        })?;

        let content = match (file.truncated, file.raw_url, file.content) {
            (true, Some(raw_url), _) => self.fetch_raw(&raw_url).await?,
            (_, _, Some(content)) => content,
            _ => {
                return Err(StoreError::Api(format!(
                    "file {} has no content",
                    self.config.file_name
                )));
            }
        };

        let db = LicenseDb::from_json(&content).map_err(|e| StoreError::Document(e.to_string()))?;
        debug!(records = db.len(), "Fetched license document");
        Ok(db)
    }

    async fn persist(&self, db: &LicenseDb) -> StoreResult<()> {
        let content = db
            .to_pretty_json()
            .map_err(|e| StoreError::Document(e.to_string()))?;

        let mut files = HashMap::new();
        files.insert(self.config.file_name.as_str(), GistFileUpdate { content });

        let response = self
            .client
            .patch(self.gist_url())
            .header("Authorization", self.auth_header())
            .header("Accept", "application/vnd.github+json")
            .json(&GistUpdate { files })
            .send()
            .await?;
        self.check_status(response).await?;

        info!(records = db.len(), "License document written back to gist");
        Ok(())
    }
}
