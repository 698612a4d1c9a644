//! License records, validation and activation for EduPass.
//!
//! This crate handles:
//! - The license record schema stored in the remote JSON document
//! - Cheap key shape checks used before any remote lookup
//! - Validation of a key against a store snapshot
//! - One-time activation of an unused key (status, device binding, timestamp)
//!
//! Everything here is pure: fetching and persisting the document lives in
//! `edupass-store`, and the validate → activate → persist sequence lives in
//! `edupass-session`.
//!
//! # Record Document
//!
//! The document is a JSON object keyed by license key:
//!
//! ```json
//! {
//!   "EDU-ABC123": {
//!     "status": "UNUSED",
//!     "app_scope": "ALL",
//!     "type_name": "月卡"
//!   }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use edupass_license::{validate, LicenseDb};
//!
//! let db = LicenseDb::from_json(
//!     r#"{"EDU-ABC123":{"status":"UNUSED","app_scope":"ALL","type_name":"月卡"}}"#,
//! )
//! .unwrap();
//!
//! let grant = validate("EDU-ABC123", "diet", Ok::<_, String>(&db)).unwrap();
//! assert_eq!(grant.plan_name, "月卡");
//! assert!(grant.first_use);
//! ```

mod activation;
mod device;
mod error;
mod key;
mod record;
mod validate;

pub use activation::{activate, mark_activated, Activation, ACTIVATED_AT_FORMAT};
pub use device::DeviceId;
pub use error::{LicenseError, LicenseResult};
pub use key::{mask_key, KeyShape, DEFAULT_KEY_PREFIX, DEFAULT_MIN_KEY_LEN};
pub use record::{LicenseDb, LicenseRecord, RecordStatus, Scope, ALL_SCOPE};
pub use validate::{validate, validate_record, Grant, Verdict};
