//! Shared test helpers for session tests.

#![allow(dead_code)]

use edupass_license::LicenseDb;
use edupass_session::LicenseGate;
use edupass_store::MemoryStore;
use std::sync::Arc;

pub const APP: &str = "tutor";

/// A document with one key in each interesting state.
pub fn sample_db() -> LicenseDb {
    LicenseDb::from_json(
        r#"{
            "EDU-MONTH-0001": {"status":"UNUSED","app_scope":"ALL","type_name":"月卡"},
            "EDU-YEAR-00002": {"status":"ACTIVE","app_scope":"tutor","type_name":"年卡","bound_device":"d-1","activated_at":"2025-03-01 09:30:00"},
            "EDU-DIET-00003": {"status":"UNUSED","app_scope":"diet","type_name":"问诊卡"},
            "EDU-BROKEN-004": {"status":"FROZEN","app_scope":"ALL","type_name":"月卡"}
        }"#,
    )
    .unwrap()
}

/// A gate over an in-memory store seeded with [`sample_db`].
pub fn gate() -> (LicenseGate, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new(sample_db()));
    let gate = LicenseGate::new(store.clone(), APP);
    (gate, store)
}
