//! Remote license record store for EduPass.
//!
//! The whole license database is a single JSON document. Every validation
//! reads it fresh; an activation rewrites it whole. There is no per-record
//! locking: two clients activating different keys from overlapping snapshots
//! can overwrite each other, last writer wins.
//!
//! Backends:
//! - [`GistStore`]: a named file inside a GitHub Gist (production)
//! - [`FileStore`]: a local JSON file (development)
//! - [`MemoryStore`]: in-process, with call counters and failure injection (tests)
//! - [`UnconfiguredStore`]: always fails, used when credentials are missing

mod error;
mod file;
mod gist;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use gist::{GistConfig, GistStore, DEFAULT_GIST_FILE};
pub use memory::{MemoryStore, UnconfiguredStore};

use async_trait::async_trait;
use edupass_license::LicenseDb;

/// Read and overwrite access to the record document.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the name of the backend, for logs.
    fn backend_name(&self) -> &'static str;

    /// Fetches a fresh snapshot of the whole document.
    async fn fetch(&self) -> StoreResult<LicenseDb>;

    /// Overwrites the whole document.
    async fn persist(&self, db: &LicenseDb) -> StoreResult<()>;
}
