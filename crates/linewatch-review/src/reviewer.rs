//! The alert aggregator: one activity block in, one review result out.

use tracing::{debug, info, warn};

use linewatch_model::{ActivityBlock, OrgId, ProjectConfig, ReviewResult};
use linewatch_store::RuleStore;

use crate::conditions::{ADVISORY_CHECKS, ConditionCheck, FieldBundle, HIGH_RISK_CONDITIONS};
use crate::evaluator::{Outcome, evaluate};

/// Runs an activity's observations through the condition tables and the
/// stored threshold rules.
///
/// Called as a best-effort side process after a report section is saved:
/// it never fails the save. Internal failures are logged and surface as
/// a degraded result carrying whatever was computed before the failure.
pub struct ActivityReviewer<'a> {
    store: &'a dyn RuleStore,
}

impl<'a> ActivityReviewer<'a> {
    pub fn new(store: &'a dyn RuleStore) -> Self {
        Self { store }
    }

    pub fn review(
        &self,
        org: &OrgId,
        activity: &ActivityBlock,
        bundle: &FieldBundle,
        project: &ProjectConfig,
    ) -> ReviewResult {
        let mut result = ReviewResult::new(&activity.activity_type, &activity.report_id);

        apply_checks(HIGH_RISK_CONDITIONS, bundle, &mut result);
        apply_checks(ADVISORY_CHECKS, bundle, &mut result);
        self.apply_threshold_rules(org, activity, &mut result);

        if result.notification_required() {
            result.recipient = Some(project.notifications.environmental_lead.clone());
        }

        info!(
            org = %org,
            report = %activity.report_id,
            status = %result.overall_status(),
            alerts = result.alert_count(),
            warnings = result.warning_count(),
            passed = result.passed_count(),
            "activity review complete"
        );
        result
    }

    fn apply_threshold_rules(
        &self,
        org: &OrgId,
        activity: &ActivityBlock,
        result: &mut ReviewResult,
    ) {
        let rules = match self.store.rules_for_activity(org, &activity.activity_type) {
            Ok(rules) => rules,
            Err(error) => {
                warn!(org = %org, %error, "could not load threshold rules; review degraded");
                result.degraded = true;
                return;
            }
        };

        for rule in rules {
            if !rule.has_bounds() {
                continue;
            }
            let value = activity.observed(&rule.key.field_key);
            match evaluate(&rule, &value) {
                Outcome::Violation(alert) => result.record(alert),
                Outcome::Pass => result.record_pass(rule.key.field_key.clone()),
                Outcome::NotMeasured => {
                    debug!(rule = %rule.key, "field not measured; rule skipped");
                }
            }
        }
    }
}

fn apply_checks(checks: &[ConditionCheck], bundle: &FieldBundle, result: &mut ReviewResult) {
    for check in checks {
        match (check.predicate)(bundle) {
            Ok(true) => result.record(check.alert()),
            Ok(false) => result.record_pass(check.key),
            Err(error) => {
                // One unreadable field must not abort the other checks.
                warn!(condition = check.key, %error, "condition check skipped");
            }
        }
    }
}
