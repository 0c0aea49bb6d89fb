//! In-memory rule store for tests and ephemeral runs.

use std::collections::BTreeMap;
use std::sync::Mutex;

use linewatch_model::{OrgId, RuleKey, ThresholdRule};

use crate::{RuleStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryRuleStore {
    rules: Mutex<BTreeMap<(OrgId, RuleKey), ThresholdRule>>,
}

impl MemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored rules across organizations, active or not.
    pub fn len(&self) -> usize {
        self.rules.lock().map(|rules| rules.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RuleStore for MemoryRuleStore {
    fn upsert(&self, rule: &ThresholdRule) -> Result<(), StoreError> {
        let mut rules = self.rules.lock().map_err(|_| StoreError::Poisoned)?;
        rules.insert((rule.org.clone(), rule.key.clone()), rule.clone());
        Ok(())
    }

    fn get(&self, org: &OrgId, key: &RuleKey) -> Result<Option<ThresholdRule>, StoreError> {
        let rules = self.rules.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(rules.get(&(org.clone(), key.clone())).cloned())
    }

    fn active_rules(&self, org: &OrgId) -> Result<Vec<ThresholdRule>, StoreError> {
        let rules = self.rules.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(rules
            .values()
            .filter(|rule| &rule.org == org && rule.active)
            .cloned()
            .collect())
    }

    fn deactivate(&self, org: &OrgId, key: &RuleKey) -> Result<bool, StoreError> {
        let mut rules = self.rules.lock().map_err(|_| StoreError::Poisoned)?;
        match rules.get_mut(&(org.clone(), key.clone())) {
            Some(rule) => {
                rule.active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
