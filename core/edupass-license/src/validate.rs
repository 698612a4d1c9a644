//! License validation against a record document snapshot.
//!
//! Validation is read-only. Activation of a first-use key is a separate step
//! taken by the caller, and only during an explicit login.

use crate::error::{LicenseError, LicenseResult};
use crate::record::{LicenseDb, LicenseRecord, RecordStatus};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A successful validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Plan label of the record (`type_name`).
    pub plan_name: String,
    /// True if the record is still `UNUSED` and should be activated.
    pub first_use: bool,
}

impl Grant {
    /// Message shown to the user on success.
    #[must_use]
    pub fn message(&self) -> &'static str {
        if self.first_use { "验证通过" } else { "欢迎回来" }
    }
}

/// Validates `key` for the application `expected_scope`.
///
/// `snapshot` is the outcome of fetching the record document; a failed fetch
/// short-circuits to [`LicenseError::StoreUnavailable`] before the key is
/// looked at.
///
/// # Errors
///
/// Returns `EmptyKey`, `StoreUnavailable`, `KeyNotFound`, `ScopeMismatch` or
/// `RecordCorrupt`, checked in that order.
pub fn validate<E: Display>(
    key: &str,
    expected_scope: &str,
    snapshot: Result<&LicenseDb, E>,
) -> LicenseResult<Grant> {
    let key = key.trim();
    if key.is_empty() {
        return Err(LicenseError::EmptyKey);
    }

    let db = snapshot.map_err(|e| LicenseError::StoreUnavailable(e.to_string()))?;
    let record = db.lookup(key)?;
    validate_record(record, expected_scope)
}

/// Validates a single record that has already been looked up.
///
/// # Errors
///
/// Returns `ScopeMismatch` or `RecordCorrupt`.
pub fn validate_record(record: &LicenseRecord, expected_scope: &str) -> LicenseResult<Grant> {
    // Scope is a hard reject regardless of status.
    if !record.app_scope.admits(expected_scope) {
        return Err(LicenseError::ScopeMismatch {
            type_name: record.type_name.clone(),
        });
    }

    let first_use = match &record.status {
        Some(RecordStatus::Unused) => true,
        Some(RecordStatus::Active) => false,
        Some(RecordStatus::Unrecognized(s)) => return Err(LicenseError::RecordCorrupt(s.clone())),
        None => return Err(LicenseError::RecordCorrupt(String::new())),
    };

    Ok(Grant {
        plan_name: record.type_name.clone(),
        first_use,
    })
}

/// Boundary form of a validation outcome: a flag, a message, and the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether access was granted.
    pub granted: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Plan label on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
}

impl From<&LicenseResult<Grant>> for Verdict {
    fn from(outcome: &LicenseResult<Grant>) -> Self {
        match outcome {
            Ok(grant) => Self {
                granted: true,
                message: grant.message().to_string(),
                plan_name: Some(grant.plan_name.clone()),
            },
            Err(e) => Self {
                granted: false,
                message: e.user_message(),
                plan_name: None,
            },
        }
    }
}

impl From<LicenseResult<Grant>> for Verdict {
    fn from(outcome: LicenseResult<Grant>) -> Self {
        Self::from(&outcome)
    }
}
