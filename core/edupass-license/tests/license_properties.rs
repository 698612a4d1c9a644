//! Property-based tests for validation and activation.
//!
//! These hold for any document and any key:
//! - Absent keys are `KeyNotFound` and validation never changes the document
//! - Foreign-scoped keys are rejected and the rejection names the plan
//! - `ALL`-scoped keys are accepted by any application
//! - Activation happens at most once

mod common;

use common::{active, unused};
use edupass_license::{activate, validate, LicenseDb, LicenseError, LicenseRecord};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("EDU-[A-Z0-9]{4,12}").unwrap()
}

fn scope_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,10}").unwrap()
}

fn plan_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["月卡", "年卡", "体验卡", "问诊卡"]).prop_map(String::from)
}

fn record_strategy() -> impl Strategy<Value = LicenseRecord> {
    (
        prop_oneof![Just("ALL".to_string()), scope_strategy()],
        plan_strategy(),
        any::<bool>(),
    )
        .prop_map(|(scope, plan, is_active)| {
            if is_active {
                active(&scope, &plan)
            } else {
                unused(&scope, &plan)
            }
        })
}

fn db_strategy() -> impl Strategy<Value = LicenseDb> {
    prop::collection::btree_map(key_strategy(), record_strategy(), 0..20)
        .prop_map(|m| m.into_iter().collect())
}

// =============================================================================
// VALIDATION PROPERTIES
// =============================================================================

proptest! {
    /// Keys absent from the document are never found, and lookups never mutate it
    #[test]
    fn absent_key_is_not_found(db in db_strategy(), key in key_strategy(), scope in scope_strategy()) {
        prop_assume!(!db.contains(&key));
        let before = db.clone();

        let result = validate(&key, &scope, Ok::<_, String>(&db));

        prop_assert_eq!(result, Err(LicenseError::KeyNotFound));
        prop_assert_eq!(db, before);
    }

    /// Records scoped to another application are rejected with their plan name
    #[test]
    fn foreign_scope_rejected(
        key in key_strategy(),
        record_scope in scope_strategy(),
        caller in scope_strategy(),
        plan in plan_strategy(),
        is_active in any::<bool>(),
    ) {
        prop_assume!(record_scope != caller);
        let record = if is_active { active(&record_scope, &plan) } else { unused(&record_scope, &plan) };
        let db: LicenseDb = vec![(key.clone(), record)].into_iter().collect();

        let err = validate(&key, &caller, Ok::<_, String>(&db)).unwrap_err();

        prop_assert!(matches!(err, LicenseError::ScopeMismatch { .. }), "expected ScopeMismatch");
        prop_assert!(err.user_message().contains(&plan));
    }

    /// `ALL` is accepted by whichever application asks
    #[test]
    fn all_scope_accepted_everywhere(key in key_strategy(), caller in scope_strategy(), plan in plan_strategy()) {
        let db: LicenseDb = vec![(key.clone(), unused("ALL", &plan))].into_iter().collect();

        let grant = validate(&key, &caller, Ok::<_, String>(&db)).unwrap();

        prop_assert_eq!(grant.plan_name, plan);
        prop_assert!(grant.first_use);
    }

    /// A second activation never changes the document
    #[test]
    fn activation_is_once_only(db in db_strategy()) {
        let mut db = db;
        let keys: Vec<String> = db.iter().map(|(k, _)| k.to_string()).collect();
        for key in &keys {
            activate(&mut db, key).unwrap();
        }
        let settled = db.clone();
        for key in &keys {
            prop_assert!(activate(&mut db, key).unwrap().is_none());
        }
        prop_assert_eq!(db, settled);
    }
}
