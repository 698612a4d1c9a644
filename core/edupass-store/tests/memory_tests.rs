use edupass_license::{LicenseDb, LicenseRecord, Scope};
use edupass_store::{MemoryStore, RecordStore, StoreError, UnconfiguredStore};

fn one_key() -> LicenseDb {
    let mut db = LicenseDb::new();
    db.insert("EDU-ABC123", LicenseRecord::new(Scope::All, "月卡"));
    db
}

// ── MemoryStore ─────────────────────────────────────────────────

#[tokio::test]
async fn fetch_returns_document_and_counts() {
    let store = MemoryStore::new(one_key());
    assert_eq!(store.fetch_count(), 0);

    let db = store.fetch().await.unwrap();
    assert!(db.contains("EDU-ABC123"));
    assert_eq!(store.fetch_count(), 1);
}

#[tokio::test]
async fn snapshot_does_not_count_as_fetch() {
    let store = MemoryStore::new(one_key());
    let _ = store.snapshot().await;
    assert_eq!(store.fetch_count(), 0);
}

#[tokio::test]
async fn persist_replaces_document() {
    let store = MemoryStore::new(one_key());
    store.persist(&LicenseDb::new()).await.unwrap();
    assert!(store.snapshot().await.is_empty());
    assert_eq!(store.persist_count(), 1);
}

#[tokio::test]
async fn injected_fetch_failure() {
    let store = MemoryStore::new(one_key());
    store.set_fetch_failure(true);
    assert!(matches!(store.fetch().await, Err(StoreError::Simulated(_))));
    assert_eq!(store.fetch_count(), 1);

    store.set_fetch_failure(false);
    assert!(store.fetch().await.is_ok());
}

#[tokio::test]
async fn injected_persist_failure_keeps_document() {
    let store = MemoryStore::new(one_key());
    store.set_persist_failure(true);
    assert!(store.persist(&LicenseDb::new()).await.is_err());
    assert!(store.snapshot().await.contains("EDU-ABC123"));
    assert_eq!(store.persist_count(), 0);
}

#[tokio::test]
async fn replace_simulates_operator_edit() {
    let store = MemoryStore::new(one_key());
    store.replace(LicenseDb::new()).await;
    assert!(store.fetch().await.unwrap().is_empty());
}

// ── UnconfiguredStore ───────────────────────────────────────────

#[tokio::test]
async fn unconfigured_store_always_fails() {
    let store = UnconfiguredStore::new("GIST_ID not configured");
    assert_eq!(store.backend_name(), "unconfigured");

    let err = store.fetch().await.unwrap_err();
    assert!(matches!(err, StoreError::Config(ref m) if m == "GIST_ID not configured"));
    assert!(store.persist(&LicenseDb::new()).await.is_err());
}
