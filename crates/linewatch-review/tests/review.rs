//! Aggregation behavior of the activity reviewer.

use linewatch_model::{
    ActivityBlock, ObservedValue, OrgId, ProjectConfig, ReviewStatus, RuleKey, Severity,
    ThresholdRule,
};
use linewatch_review::{ActivityReviewer, FieldBundle};
use linewatch_store::{MemoryRuleStore, RuleStore, StoreError};

fn org() -> OrgId {
    OrgId::from("org-1")
}

fn topsoil_activity() -> ActivityBlock {
    ActivityBlock::new("topsoil", "RPT-014")
}

#[test]
fn clean_activity_passes_with_no_notification() {
    let store = MemoryRuleStore::new();
    let reviewer = ActivityReviewer::new(&store);
    let result = reviewer.review(
        &org(),
        &topsoil_activity(),
        &FieldBundle::default(),
        &ProjectConfig::default(),
    );

    assert_eq!(result.overall_status(), ReviewStatus::Pass);
    assert_eq!(result.alert_count(), 0);
    assert_eq!(result.warning_count(), 0);
    assert!(!result.notification_required());
    assert!(result.recipient.is_none());
    // Every condition and advisory evaluated and passed.
    assert_eq!(result.passed_count(), 10);
    assert!(!result.degraded);
}

#[test]
fn medium_condition_yields_warning_status() {
    let store = MemoryRuleStore::new();
    let reviewer = ActivityReviewer::new(&store);
    let mut bundle = FieldBundle::default();
    bundle.soil.stockpile_separation_m = ObservedValue::Number(0.4);

    let result = reviewer.review(
        &org(),
        &topsoil_activity(),
        &bundle,
        &ProjectConfig::default(),
    );

    assert_eq!(result.overall_status(), ReviewStatus::Warning);
    assert_eq!(result.warning_count(), 1);
    assert_eq!(result.warnings[0].source_key, "stockpile_separation_shortfall");
    assert!(!result.notification_required());
}

#[test]
fn critical_condition_yields_alert_and_notification() {
    let store = MemoryRuleStore::new();
    let reviewer = ActivityReviewer::new(&store);
    let mut bundle = FieldBundle::default();
    bundle.soil.admixture_percent = ObservedValue::Number(22.0);

    let mut project = ProjectConfig::default();
    project.notifications.environmental_lead = "env@spread4.example".to_string();
    let result = reviewer.review(&org(), &topsoil_activity(), &bundle, &project);

    assert_eq!(result.overall_status(), ReviewStatus::Alert);
    assert_eq!(result.alerts[0].source_key, "excess_admixture");
    assert_eq!(result.alerts[0].severity, Severity::Critical);
    assert!(result.notification_required());
    assert_eq!(result.recipient.as_deref(), Some("env@spread4.example"));
}

#[test]
fn malformed_field_skips_one_condition_and_keeps_the_rest() {
    let store = MemoryRuleStore::new();
    let reviewer = ActivityReviewer::new(&store);
    let mut bundle = FieldBundle::default();
    bundle.soil.waterbody_buffer_m = ObservedValue::Text("approx ten".to_string());
    bundle.soil.admixture_percent = ObservedValue::Number(22.0);

    let result = reviewer.review(
        &org(),
        &topsoil_activity(),
        &bundle,
        &ProjectConfig::default(),
    );

    // The malformed buffer field is skipped entirely: neither triggered
    // nor passed. The admixture condition still fires.
    assert_eq!(result.overall_status(), ReviewStatus::Alert);
    assert_eq!(result.alerts[0].source_key, "excess_admixture");
    assert!(
        !result
            .passed
            .iter()
            .any(|key| key == "waterbody_buffer_encroachment")
    );
    assert_eq!(result.passed_count(), 8);
}

#[test]
fn stored_rules_evaluate_against_activity_observations() {
    let store = MemoryRuleStore::new();
    store
        .upsert(
            &ThresholdRule::new(
                org(),
                linewatch_model::ActivityScope::of("topsoil"),
                "admixture_percent",
                Severity::Critical,
                "Topsoil admixture above limit",
            )
            .with_max(15.0)
            .with_message("Admixture of {value}% exceeds the {max}% limit"),
        )
        .expect("seed rule");

    let activity = topsoil_activity()
        .with_observation("admixture_percent", ObservedValue::Number(18.0));
    let reviewer = ActivityReviewer::new(&store);
    let result = reviewer.review(
        &org(),
        &activity,
        &FieldBundle::default(),
        &ProjectConfig::default(),
    );

    assert_eq!(result.overall_status(), ReviewStatus::Alert);
    let rule_alert = result
        .alerts
        .iter()
        .find(|alert| alert.source_key == "admixture_percent")
        .expect("rule violation recorded");
    assert!(rule_alert.message.contains("18"));
    assert!(rule_alert.message.contains("15"));
}

#[test]
fn wildcard_kp_rule_checks_the_block_chainage() {
    let store = MemoryRuleStore::new();
    store
        .upsert(
            &ThresholdRule::new(
                org(),
                linewatch_model::ActivityScope::All,
                "kp_start",
                Severity::Critical,
                "Work reported outside contract KP limits",
            )
            .with_min(12.35)
            .with_max(48.0),
        )
        .expect("seed rule");

    let inside = ActivityBlock::new("welding", "RPT-020").with_kp(20.0, 20.6);
    let outside = ActivityBlock::new("welding", "RPT-021").with_kp(51.2, 51.9);
    let reviewer = ActivityReviewer::new(&store);

    let ok = reviewer.review(
        &org(),
        &inside,
        &FieldBundle::default(),
        &ProjectConfig::default(),
    );
    assert_eq!(ok.overall_status(), ReviewStatus::Pass);
    assert!(ok.passed.iter().any(|key| key == "kp_start"));

    let bad = reviewer.review(
        &org(),
        &outside,
        &FieldBundle::default(),
        &ProjectConfig::default(),
    );
    assert_eq!(bad.overall_status(), ReviewStatus::Alert);
}

#[test]
fn store_failure_degrades_the_result_instead_of_failing() {
    struct FailingStore;

    impl RuleStore for FailingStore {
        fn upsert(&self, _rule: &ThresholdRule) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }

        fn get(
            &self,
            _org: &OrgId,
            _key: &RuleKey,
        ) -> Result<Option<ThresholdRule>, StoreError> {
            Err(StoreError::Poisoned)
        }

        fn active_rules(&self, _org: &OrgId) -> Result<Vec<ThresholdRule>, StoreError> {
            Err(StoreError::Poisoned)
        }

        fn deactivate(&self, _org: &OrgId, _key: &RuleKey) -> Result<bool, StoreError> {
            Err(StoreError::Poisoned)
        }
    }

    let mut bundle = FieldBundle::default();
    bundle.soil.horizon_mixing_observed = Some(true);
    let reviewer = ActivityReviewer::new(&FailingStore);
    let result = reviewer.review(
        &org(),
        &topsoil_activity(),
        &bundle,
        &ProjectConfig::default(),
    );

    // Conditions computed before the store failure are still delivered.
    assert!(result.degraded);
    assert_eq!(result.overall_status(), ReviewStatus::Alert);
    assert_eq!(result.alerts[0].source_key, "horizon_mixing");
}
