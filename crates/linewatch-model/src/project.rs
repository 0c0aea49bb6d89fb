//! Project-level configuration, loaded from `linewatch.toml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Fallback escalation address when a project does not configure one.
pub const DEFAULT_ENVIRONMENTAL_LEAD: &str = "environmental.lead@project.example";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub project: ProjectInfo,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub name: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: "Pipeline project".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Recipient for compliance escalations.
    pub environmental_lead: String,
    /// Additional addresses copied on every escalation.
    pub cc: Vec<String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            environmental_lead: DEFAULT_ENVIRONMENTAL_LEAD.to_string(),
            cc: Vec::new(),
        }
    }
}

impl ProjectConfig {
    /// Load configuration from a TOML file. Missing sections fall back
    /// to defaults; a missing file is the caller's decision to handle.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ModelError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}
