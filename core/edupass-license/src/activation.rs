//! One-time activation of an unused license record.
//!
//! Activation only touches the in-memory document. Writing it back is the
//! caller's job, and a failed write does not undo a login.

use crate::device::DeviceId;
use crate::error::{LicenseError, LicenseResult};
use crate::record::{LicenseDb, RecordStatus};
use serde::{Deserialize, Serialize};

/// Format of `activated_at` in the record document (local time).
pub const ACTIVATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The fields written by an activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    /// Device identifier bound to the record.
    pub device_id: DeviceId,
    /// Activation timestamp as written to the record.
    pub activated_at: String,
}

/// Activates `key` with a fresh device id and the current local time.
///
/// Returns `Ok(None)` if the record is already active; nothing changes in
/// that case.
///
/// # Errors
///
/// Returns `KeyNotFound` if the key is not in the document, or
/// `RecordCorrupt` if its status is unrecognized.
pub fn activate(db: &mut LicenseDb, key: &str) -> LicenseResult<Option<Activation>> {
    let now = chrono::Local::now().format(ACTIVATED_AT_FORMAT).to_string();
    mark_activated(db, key, DeviceId::generate(), now)
}

/// Activates `key` with the given device id and timestamp.
///
/// Only the target record is modified.
///
/// # Errors
///
/// Same as [`activate`].
pub fn mark_activated(
    db: &mut LicenseDb,
    key: &str,
    device_id: DeviceId,
    activated_at: String,
) -> LicenseResult<Option<Activation>> {
    let record = db.lookup_mut(key)?;

    match &record.status {
        Some(RecordStatus::Unused) => {}
        Some(RecordStatus::Active) => return Ok(None),
        Some(RecordStatus::Unrecognized(s)) => return Err(LicenseError::RecordCorrupt(s.clone())),
        None => return Err(LicenseError::RecordCorrupt(String::new())),
    }

    record.status = Some(RecordStatus::Active);
    record.bound_device = Some(device_id.to_string());
    record.activated_at = Some(activated_at.clone());

    Ok(Some(Activation {
        device_id,
        activated_at,
    }))
}
