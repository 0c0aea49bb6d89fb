//! Durable storage for threshold rules.
//!
//! The store is the only stateful piece of the engine. Everything is
//! keyed by `(organization, activity scope, field key)`, so refresh
//! passes for different organizations never interfere. Backends are
//! synchronous per call; implementations backed by a remote service
//! should bound call latency themselves and surface a timeout as a
//! [`StoreError`] so callers can apply the usual log-and-degrade policy.

mod error;
mod json;
mod memory;

pub use error::StoreError;
pub use json::JsonRuleStore;
pub use memory::MemoryRuleStore;

use linewatch_model::{OrgId, RuleKey, ThresholdRule};

/// Upsert/select/deactivate interface over one rules table.
pub trait RuleStore: Send + Sync {
    /// Insert the rule, or overwrite every field of the stored rule with
    /// the same identity (last writer wins).
    fn upsert(&self, rule: &ThresholdRule) -> Result<(), StoreError>;

    /// Fetch one rule by identity, active or not.
    fn get(&self, org: &OrgId, key: &RuleKey) -> Result<Option<ThresholdRule>, StoreError>;

    /// All active rules for an organization.
    fn active_rules(&self, org: &OrgId) -> Result<Vec<ThresholdRule>, StoreError>;

    /// Mark a rule inactive without removing it. Returns whether a rule
    /// with that identity existed.
    fn deactivate(&self, org: &OrgId, key: &RuleKey) -> Result<bool, StoreError>;

    /// Active rules applicable to one activity type, wildcard scope
    /// included.
    fn rules_for_activity(
        &self,
        org: &OrgId,
        activity_type: &str,
    ) -> Result<Vec<ThresholdRule>, StoreError> {
        let rules = self.active_rules(org)?;
        Ok(rules
            .into_iter()
            .filter(|rule| rule.matches_activity(activity_type))
            .collect())
    }
}
