//! Shared test helpers for license tests.

#![allow(dead_code)]

use edupass_license::{LicenseDb, LicenseRecord, RecordStatus, Scope};

/// Builds an unused record.
pub fn unused(scope: &str, type_name: &str) -> LicenseRecord {
    LicenseRecord::new(Scope::from(scope.to_string()), type_name)
}

/// Builds an active record.
pub fn active(scope: &str, type_name: &str) -> LicenseRecord {
    unused(scope, type_name).with_status(RecordStatus::Active)
}

/// Builds a document from `(key, record)` pairs.
pub fn db_of(records: Vec<(&str, LicenseRecord)>) -> LicenseDb {
    records
        .into_iter()
        .map(|(k, r)| (k.to_string(), r))
        .collect()
}

/// The monthly-card document used across scenarios.
pub fn monthly_card_db() -> LicenseDb {
    LicenseDb::from_json(
        r#"{"EDU-ABC123": {"status":"UNUSED","app_scope":"ALL","type_name":"月卡"}}"#,
    )
    .unwrap()
}

/// A key scoped to another application.
pub fn foreign_scope_db() -> LicenseDb {
    LicenseDb::from_json(
        r#"{"EDU-X":{"status":"ACTIVE","app_scope":"shennong","type_name":"问诊卡"}}"#,
    )
    .unwrap()
}

/// One valid record next to three entries that are not valid records.
pub fn mixed_db() -> LicenseDb {
    LicenseDb::from_json(
        r#"{
            "EDU-GOOD-00001": {"status":"UNUSED","app_scope":"ALL","type_name":"月卡"},
            "EDU-TYPO-00002": {"status":1,"app_scope":"ALL","type_name":"月卡"},
            "EDU-NULL-00003": {"status":"ACTIVE","app_scope":null,"type_name":"年卡"},
            "EDU-TEXT-00004": "not a record"
        }"#,
    )
    .unwrap()
}
