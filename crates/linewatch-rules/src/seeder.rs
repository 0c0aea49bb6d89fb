//! The refresh pass reconciling the rule store with current adapter output.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use linewatch_model::{OrgId, RuleKey, ThresholdRule};
use linewatch_store::RuleStore;

use crate::adapters::{contract_rules, spec_rules};
use crate::catalog::default_rules;
use crate::sources::{ConfigSource, SourceError};

/// Counts reported by one refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    pub upserted: usize,
    pub deactivated: usize,
}

/// Reconciles one organization's rule set against its sources.
///
/// Best-effort throughout: a failed source contributes zero rules, a
/// failed upsert skips that rule, and a failed deactivation sweep leaves
/// stale rules for the next pass. Running the pass twice against
/// unchanged configuration produces the same active rule set and no
/// further deactivations.
pub struct RuleSeeder<'a> {
    store: &'a dyn RuleStore,
    source: &'a dyn ConfigSource,
}

impl<'a> RuleSeeder<'a> {
    pub fn new(store: &'a dyn RuleStore, source: &'a dyn ConfigSource) -> Self {
        Self { store, source }
    }

    pub fn refresh(&self, org: &OrgId) -> RefreshOutcome {
        let mut candidates = Vec::new();
        candidates.extend(adapter_output(
            "weld_specifications",
            spec_rules(self.source, org),
        ));
        candidates.extend(adapter_output(
            "contract_configuration",
            contract_rules(self.source, org),
        ));
        candidates.extend(default_rules(org));

        let candidate_keys: BTreeSet<RuleKey> =
            candidates.iter().map(|rule| rule.key.clone()).collect();

        let seeded_at = Utc::now().to_rfc3339();
        let mut upserted = 0usize;
        for mut rule in candidates {
            rule.seeded_at = Some(seeded_at.clone());
            match self.store.upsert(&rule) {
                Ok(()) => upserted += 1,
                Err(error) => {
                    warn!(org = %org, rule = %rule.key, %error, "rule upsert failed; continuing");
                }
            }
        }

        // Deactivation must observe the upserts from this same pass, so
        // the active set is read only after all writes above.
        let mut deactivated = 0usize;
        match self.store.active_rules(org) {
            Ok(active) => {
                for rule in active {
                    if !rule.is_auto_seeded() || candidate_keys.contains(&rule.key) {
                        continue;
                    }
                    match self.store.deactivate(org, &rule.key) {
                        Ok(true) => deactivated += 1,
                        Ok(false) => {}
                        Err(error) => {
                            warn!(org = %org, rule = %rule.key, %error, "rule deactivation failed");
                        }
                    }
                }
            }
            Err(error) => {
                warn!(org = %org, %error, "could not load active rules; skipping deactivation sweep");
            }
        }

        info!(org = %org, upserted, deactivated, "rule refresh complete");
        RefreshOutcome {
            upserted,
            deactivated,
        }
    }
}

fn adapter_output(
    bucket: &str,
    result: Result<Vec<ThresholdRule>, SourceError>,
) -> Vec<ThresholdRule> {
    match result {
        Ok(rules) => rules,
        Err(error) => {
            warn!(source = bucket, %error, "rule source unavailable; contributing no rules");
            Vec::new()
        }
    }
}
