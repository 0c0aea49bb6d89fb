//! Review results produced by evaluating one activity block.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::severity::{Severity, SeverityBucket};

/// Overall status of a reviewed activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewStatus {
    Pass,
    Warning,
    Alert,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pass => "PASS",
            ReviewStatus::Warning => "WARNING",
            ReviewStatus::Alert => "ALERT",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One triggered check, from either a named condition or a stored rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAlert {
    /// Condition key or rule field key that produced this entry.
    pub source_key: String,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    /// Recommended action for the crew or inspector.
    pub action: String,
    pub reference: Option<String>,
}

/// The output of evaluating one activity's observations. Ephemeral: the
/// surrounding application logs the save event and any notification, but
/// the result itself is recomputed on demand rather than persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewResult {
    pub activity_type: String,
    pub report_id: String,
    pub alerts: Vec<ReviewAlert>,
    pub warnings: Vec<ReviewAlert>,
    /// Keys of checks that evaluated and did not trigger.
    pub passed: Vec<String>,
    /// Where an escalation notification should go, when one is required.
    pub recipient: Option<String>,
    /// True when part of the evaluation was skipped after an internal
    /// failure; the lists still hold everything computed before it.
    pub degraded: bool,
}

impl ReviewResult {
    pub fn new(activity_type: impl Into<String>, report_id: impl Into<String>) -> Self {
        Self {
            activity_type: activity_type.into(),
            report_id: report_id.into(),
            ..Self::default()
        }
    }

    /// File a triggered check into the list its severity selects.
    pub fn record(&mut self, alert: ReviewAlert) {
        match alert.severity.bucket() {
            SeverityBucket::Alert => self.alerts.push(alert),
            SeverityBucket::Warning => self.warnings.push(alert),
        }
    }

    pub fn record_pass(&mut self, key: impl Into<String>) {
        self.passed.push(key.into());
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn passed_count(&self) -> usize {
        self.passed.len()
    }

    pub fn overall_status(&self) -> ReviewStatus {
        if !self.alerts.is_empty() {
            ReviewStatus::Alert
        } else if !self.warnings.is_empty() {
            ReviewStatus::Warning
        } else {
            ReviewStatus::Pass
        }
    }

    /// True iff at least one alert is severe enough to page someone.
    pub fn notification_required(&self) -> bool {
        self.alerts.iter().any(|alert| alert.severity.is_alert())
    }

    /// Highest severity present across both lists, if any check triggered.
    pub fn top_severity(&self) -> Option<Severity> {
        self.alerts
            .iter()
            .chain(self.warnings.iter())
            .map(|alert| alert.severity)
            .max()
    }
}
