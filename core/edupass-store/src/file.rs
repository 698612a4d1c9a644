//! Local JSON file backend, for development without a Gist.

use crate::error::{StoreError, StoreResult};
use crate::RecordStore;
use async_trait::async_trait;
use edupass_license::LicenseDb;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Record store backed by a JSON file on disk.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store reading and writing `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for FileStore {
    fn backend_name(&self) -> &'static str {
        "local file"
    }

    async fn fetch(&self) -> StoreResult<LicenseDb> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StoreError::NotFound(self.path.display().to_string()),
                _ => StoreError::Io(e),
            })?;
        LicenseDb::from_json(&content).map_err(|e| StoreError::Document(e.to_string()))
    }

    async fn persist(&self, db: &LicenseDb) -> StoreResult<()> {
        let content = db
            .to_pretty_json()
            .map_err(|e| StoreError::Document(e.to_string()))?;

        // Write beside the target, then rename over it.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), "License document written");
        Ok(())
    }
}
