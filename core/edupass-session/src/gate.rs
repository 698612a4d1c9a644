//! The license gate: fetch, validate, and activate on first use.

use edupass_license::{
    activate, mask_key, validate, Activation, Grant, KeyShape, LicenseDb, LicenseError,
    LicenseResult,
};
use edupass_store::RecordStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Validates keys for one application against the record store.
pub struct LicenseGate {
    store: Arc<dyn RecordStore>,
    app_scope: String,
    shape: KeyShape,
}

impl LicenseGate {
    /// Creates a gate for the application identified by `app_scope`.
    pub fn new(store: Arc<dyn RecordStore>, app_scope: impl Into<String>) -> Self {
        Self {
            store,
            app_scope: app_scope.into(),
            shape: KeyShape::default(),
        }
    }

    /// Replaces the key shape used to pre-filter typed keys and persisted
    /// credentials.
    pub fn with_shape(mut self, shape: KeyShape) -> Self {
        self.shape = shape;
        self
    }

    /// The application identifier keys are checked against.
    pub fn app_scope(&self) -> &str {
        &self.app_scope
    }

    /// The key shape pre-filter.
    pub fn shape(&self) -> &KeyShape {
        &self.shape
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Validates `key` against a fresh snapshot. Never writes.
    ///
    /// A key that fails the shape check is `KeyNotFound` without a fetch.
    ///
    /// # Errors
    ///
    /// See [`validate`].
    pub async fn check(&self, key: &str) -> LicenseResult<Grant> {
        self.fetch_and_validate(key).await.map(|(grant, _)| grant)
    }

    /// Explicit login: validates `key` and activates it if this is its
    /// first use.
    ///
    /// A failed write-back is logged and tolerated: the login still
    /// succeeds even though the store does not record the activation.
    ///
    /// # Errors
    ///
    /// See [`validate`].
    pub async fn login(&self, key: &str) -> LicenseResult<Grant> {
        let key = key.trim();
        let (grant, snapshot) = self.fetch_and_validate(key).await?;

        if grant.first_use {
            if let Some(mut db) = snapshot {
                match self.activate(&mut db, key).await {
                    Ok(_) => {}
                    Err(LicenseError::PersistFailure(reason)) => {
                        warn!(
                            key = %mask_key(key),
                            backend = self.store.backend_name(),
                            "Activation not persisted, session granted anyway: {}",
                            reason
                        );
                    }
                    Err(e) => warn!(key = %mask_key(key), "Activation skipped: {}", e),
                }
            }
        }

        Ok(grant)
    }

    /// Activates `key` in `db` and writes the whole document back.
    ///
    /// Returns `Ok(None)` without writing if the key is already active. The
    /// write is a plain overwrite: a concurrent activation of another key
    /// from an older snapshot can be lost.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound`/`RecordCorrupt` from the activation itself, or
    /// `PersistFailure` if the store rejected the write. In the latter case
    /// `db` already holds the activated record.
    pub async fn activate(&self, db: &mut LicenseDb, key: &str) -> LicenseResult<Option<Activation>> {
        let Some(activation) = activate(db, key)? else {
            return Ok(None);
        };

        self.store
            .persist(db)
            .await
            .map_err(|e| LicenseError::PersistFailure(e.to_string()))?;

        info!(
            key = %mask_key(key),
            device = %activation.device_id,
            "License activated"
        );
        Ok(Some(activation))
    }

    async fn fetch_and_validate(&self, key: &str) -> LicenseResult<(Grant, Option<LicenseDb>)> {
        let key = key.trim();
        if key.is_empty() {
            return Err(LicenseError::EmptyKey);
        }

        // A key that could never be recalled from the credential cookie is
        // not accepted at login either.
        if !self.shape.matches(key) {
            debug!(key = %mask_key(key), "Key rejected by shape check");
            return Err(LicenseError::KeyNotFound);
        }

        let snapshot = self.store.fetch().await;
        match &snapshot {
            Ok(db) => {
                let malformed = db.malformed_keys().count();
                if malformed > 0 {
                    warn!(malformed, "License document has entries that are not valid records");
                }
            }
            Err(e) => {
                warn!(backend = self.store.backend_name(), "Record store fetch failed: {}", e);
            }
        }

        let grant = validate(key, &self.app_scope, snapshot.as_ref())?;
        debug!(key = %mask_key(key), first_use = grant.first_use, "License validated");
        Ok((grant, snapshot.ok()))
    }
}
