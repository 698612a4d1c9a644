//! In-process backends.

use crate::error::{StoreError, StoreResult};
use crate::RecordStore;
use async_trait::async_trait;
use edupass_license::LicenseDb;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Record store held in memory.
///
/// Counts fetches and successful writes, and can be told to fail either
/// operation, so callers can assert how often the "remote" was touched.
#[derive(Debug, Default)]
pub struct MemoryStore {
    db: RwLock<LicenseDb>,
    fetches: AtomicUsize,
    persists: AtomicUsize,
    fail_fetch: AtomicBool,
    fail_persist: AtomicBool,
}

impl MemoryStore {
    /// Creates a store holding `db`.
    pub fn new(db: LicenseDb) -> Self {
        Self {
            db: RwLock::new(db),
            ..Default::default()
        }
    }

    /// Returns a copy of the current document without counting a fetch.
    pub async fn snapshot(&self) -> LicenseDb {
        self.db.read().await.clone()
    }

    /// Replaces the document, as an operator editing it by hand would.
    pub async fn replace(&self, db: LicenseDb) {
        *self.db.write().await = db;
    }

    /// Number of `fetch` calls so far, including failed ones.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of successful `persist` calls so far.
    pub fn persist_count(&self) -> usize {
        self.persists.load(Ordering::SeqCst)
    }

    /// Makes subsequent fetches fail (or succeed again).
    pub fn set_fetch_failure(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent writes fail (or succeed again).
    pub fn set_persist_failure(&self, fail: bool) {
        self.fail_persist.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn fetch(&self) -> StoreResult<LicenseDb> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(StoreError::Simulated("fetch rejected".to_string()));
        }
        Ok(self.db.read().await.clone())
    }

    async fn persist(&self, db: &LicenseDb) -> StoreResult<()> {
        if self.fail_persist.load(Ordering::SeqCst) {
            return Err(StoreError::Simulated("write rejected".to_string()));
        }
        *self.db.write().await = db.clone();
        self.persists.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Store used when no backend is configured. Every call fails with
/// [`StoreError::Config`], which callers surface as a cloud connection
/// failure instead of crashing.
#[derive(Debug, Clone)]
pub struct UnconfiguredStore {
    reason: String,
}

impl UnconfiguredStore {
    /// Creates a store that reports `reason` on every call.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl RecordStore for UnconfiguredStore {
    fn backend_name(&self) -> &'static str {
        "unconfigured"
    }

    async fn fetch(&self) -> StoreResult<LicenseDb> {
        Err(StoreError::Config(self.reason.clone()))
    }

    async fn persist(&self, _db: &LicenseDb) -> StoreResult<()> {
        Err(StoreError::Config(self.reason.clone()))
    }
}
