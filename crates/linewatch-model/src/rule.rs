//! Threshold rule records and their identity.
//!
//! A rule is owned by one organization and keyed by `(activity scope,
//! field key)` within it. Rules are logically deleted via the `active`
//! flag so alert history always resolves against a defined rule snapshot.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::severity::Severity;

/// Tenant partition key. Every rule and every store operation is scoped
/// by organization; no rule is shared across organizations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(String);

impl OrgId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrgId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which activity types a rule applies to. The wire form of [`ActivityScope::All`]
/// is the literal `"*"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActivityScope {
    All,
    Only(String),
}

impl ActivityScope {
    /// Parse a scope from its wire form.
    pub fn of(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed == "*" {
            ActivityScope::All
        } else {
            ActivityScope::Only(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ActivityScope::All => "*",
            ActivityScope::Only(activity) => activity,
        }
    }

    pub fn matches(&self, activity_type: &str) -> bool {
        match self {
            ActivityScope::All => true,
            ActivityScope::Only(activity) => activity.eq_ignore_ascii_case(activity_type.trim()),
        }
    }
}

impl fmt::Display for ActivityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActivityScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActivityScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ActivityScope::of(&raw))
    }
}

/// Rule identity within one organization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleKey {
    pub scope: ActivityScope,
    pub field_key: String,
}

impl RuleKey {
    pub fn new(scope: ActivityScope, field_key: impl Into<String>) -> Self {
        Self {
            scope,
            field_key: field_key.into(),
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope, self.field_key)
    }
}

/// The adapter a seeded rule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceBucket {
    WeldSpec,
    Contract,
}

impl SourceBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceBucket::WeldSpec => "weld_spec",
            SourceBucket::Contract => "contract",
        }
    }
}

impl fmt::Display for SourceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of an auto-seeded rule. Hand-authored and built-in default
/// rules carry no origin and are never deactivated by a refresh pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOrigin {
    pub bucket: SourceBucket,
    /// Identifier of the source record, when one exists.
    pub record_id: Option<String>,
}

/// A single unit of compliance configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub org: OrgId,
    pub key: RuleKey,
    /// Inclusive lower bound; values strictly below it violate.
    pub min: Option<f64>,
    /// Inclusive upper bound; values strictly above it violate.
    pub max: Option<f64>,
    pub unit: String,
    pub severity: Severity,
    pub title: String,
    /// Message template with `{value}`, `{min}`, `{max}` placeholders.
    pub message: String,
    /// Recommended-action template, same placeholders.
    pub action: String,
    /// Reference-document citation backing the threshold.
    pub reference: String,
    pub origin: Option<RuleOrigin>,
    pub active: bool,
    /// RFC 3339 timestamp of the refresh pass that last wrote this rule.
    pub seeded_at: Option<String>,
}

impl ThresholdRule {
    pub fn new(
        org: OrgId,
        scope: ActivityScope,
        field_key: impl Into<String>,
        severity: Severity,
        title: impl Into<String>,
    ) -> Self {
        Self {
            org,
            key: RuleKey::new(scope, field_key),
            min: None,
            max: None,
            unit: String::new(),
            severity,
            title: title.into(),
            message: String::new(),
            action: String::new(),
            reference: String::new(),
            origin: None,
            active: true,
            seeded_at: None,
        }
    }

    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    #[must_use]
    pub fn with_origin(mut self, bucket: SourceBucket, record_id: Option<String>) -> Self {
        self.origin = Some(RuleOrigin { bucket, record_id });
        self
    }

    #[must_use]
    pub fn with_seeded_at(mut self, timestamp: impl Into<String>) -> Self {
        self.seeded_at = Some(timestamp.into());
        self
    }

    /// A rule is auto-seeded iff its source bucket is non-null; only
    /// auto-seeded rules are eligible for deactivation during a refresh.
    pub fn is_auto_seeded(&self) -> bool {
        self.origin.is_some()
    }

    /// A rule with neither bound never fires. Adapters must not emit one.
    pub fn has_bounds(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn matches_activity(&self, activity_type: &str) -> bool {
        self.key.scope.matches(activity_type)
    }

    /// Render the alert message for an observed value.
    pub fn render_message(&self, value: f64) -> String {
        render_template(&self.message, value, self.min, self.max)
    }

    /// Render the recommended action for an observed value.
    pub fn render_action(&self, value: f64) -> String {
        render_template(&self.action, value, self.min, self.max)
    }
}

/// Substitute `{value}`, `{min}`, `{max}` placeholders in a rule template.
pub fn render_template(template: &str, value: f64, min: Option<f64>, max: Option<f64>) -> String {
    template
        .replace("{value}", &format_quantity(value))
        .replace("{min}", &format_bound(min))
        .replace("{max}", &format_bound(max))
}

/// Format a measured quantity without trailing `.0` noise.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e12 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn format_bound(bound: Option<f64>) -> String {
    match bound {
        Some(value) => format_quantity(value),
        None => "-".to_string(),
    }
}
