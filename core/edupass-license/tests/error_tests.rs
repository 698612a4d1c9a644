use edupass_license::LicenseError;

#[test]
fn error_display_store_unavailable() {
    let err = LicenseError::StoreUnavailable("timeout".into());
    let msg = format!("{err}");
    assert!(msg.contains("store unavailable"));
    assert!(msg.contains("timeout"));
}

#[test]
fn error_display_scope_mismatch_names_plan() {
    let err = LicenseError::ScopeMismatch {
        type_name: "问诊卡".into(),
    };
    assert!(format!("{err}").contains("问诊卡"));
}

#[test]
fn error_display_record_corrupt() {
    let err = LicenseError::RecordCorrupt("LOCKED".into());
    assert!(format!("{err}").contains("LOCKED"));
}

#[test]
fn user_message_store_unavailable_is_cloud_failure() {
    let err = LicenseError::StoreUnavailable("401 Bad credentials".into());
    assert_eq!(err.user_message(), "云端连接失败: 401 Bad credentials");
}

#[test]
fn user_message_not_found() {
    assert_eq!(LicenseError::KeyNotFound.user_message(), "卡密不存在");
}

#[test]
fn user_message_empty_key() {
    assert_eq!(LicenseError::EmptyKey.user_message(), "请输入卡密");
}

#[test]
fn user_message_scope_mismatch() {
    let err = LicenseError::ScopeMismatch {
        type_name: "问诊卡".into(),
    };
    assert_eq!(err.user_message(), "这张卡是【问诊卡】，不能用于本项目！");
}

#[test]
fn store_failures_are_classified() {
    assert!(LicenseError::StoreUnavailable("x".into()).is_store_failure());
    assert!(LicenseError::PersistFailure("x".into()).is_store_failure());
    assert!(!LicenseError::KeyNotFound.is_store_failure());
}

#[test]
fn error_from_serde_json() {
    let serde_err: Result<serde_json::Value, _> = serde_json::from_str("not json");
    let license_err: LicenseError = serde_err.unwrap_err().into();
    assert!(format!("{license_err}").contains("serialization"));
}
