//! Directory-based JSON rule store.
//!
//! One pretty-printed JSON file per organization, named after the
//! normalized organization id. Every call is a read-modify-write of that
//! file, which keeps the backend trivially inspectable and matches the
//! per-call semantics of the trait.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use linewatch_model::{OrgId, RuleKey, ThresholdRule};

use crate::{RuleStore, StoreError};

const RULE_SET_VERSION: &str = "1.0";

#[derive(Debug, Clone)]
pub struct JsonRuleStore {
    base_dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredRuleSet {
    #[serde(default = "default_version")]
    version: String,
    rules: Vec<ThresholdRule>,
}

fn default_version() -> String {
    RULE_SET_VERSION.to_string()
}

impl JsonRuleStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|source| StoreError::CreateDir {
            path: base_dir.clone(),
            source,
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Every stored rule for an organization, deactivated ones included.
    pub fn all_rules(&self, org: &OrgId) -> Result<Vec<ThresholdRule>, StoreError> {
        self.load_set(org)
    }

    fn org_path(&self, org: &OrgId) -> PathBuf {
        self.base_dir.join(format!("{}.json", normalize_id(org.as_str())))
    }

    fn load_set(&self, org: &OrgId) -> Result<Vec<ThresholdRule>, StoreError> {
        let path = self.org_path(org);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        let stored: StoredRuleSet =
            serde_json::from_str(&contents).map_err(|error| StoreError::Parse {
                path: path.clone(),
                message: error.to_string(),
            })?;
        Ok(stored.rules)
    }

    fn save_set(&self, org: &OrgId, mut rules: Vec<ThresholdRule>) -> Result<(), StoreError> {
        rules.sort_by(|a, b| a.key.cmp(&b.key));
        let path = self.org_path(org);
        let stored = StoredRuleSet {
            version: default_version(),
            rules,
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|error| StoreError::Parse {
            path: path.clone(),
            message: error.to_string(),
        })?;
        fs::write(&path, format!("{json}\n")).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })
    }
}

impl RuleStore for JsonRuleStore {
    fn upsert(&self, rule: &ThresholdRule) -> Result<(), StoreError> {
        let mut rules = self.load_set(&rule.org)?;
        match rules.iter_mut().find(|stored| stored.key == rule.key) {
            Some(stored) => *stored = rule.clone(),
            None => rules.push(rule.clone()),
        }
        self.save_set(&rule.org, rules)
    }

    fn get(&self, org: &OrgId, key: &RuleKey) -> Result<Option<ThresholdRule>, StoreError> {
        let rules = self.load_set(org)?;
        Ok(rules.into_iter().find(|rule| &rule.key == key))
    }

    fn active_rules(&self, org: &OrgId) -> Result<Vec<ThresholdRule>, StoreError> {
        let rules = self.load_set(org)?;
        Ok(rules.into_iter().filter(|rule| rule.active).collect())
    }

    fn deactivate(&self, org: &OrgId, key: &RuleKey) -> Result<bool, StoreError> {
        let mut rules = self.load_set(org)?;
        let Some(rule) = rules.iter_mut().find(|rule| &rule.key == key) else {
            return Ok(false);
        };
        rule.active = false;
        self.save_set(org, rules)?;
        Ok(true)
    }
}

/// Normalize an organization id for use in filenames.
fn normalize_id(id: &str) -> String {
    id.trim()
        .to_uppercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
