//! Severity vocabulary shared by threshold rules and condition checks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Urgency of a violated rule or triggered condition, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

/// Which list of a review result a triggered check lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBucket {
    Alert,
    Warning,
}

impl Severity {
    /// Returns the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Parse a severity from configuration text (case-insensitive).
    ///
    /// Accepts the legacy rule vocabulary: `warning`/`warn` map to
    /// [`Severity::Medium`]; anything unrecognized maps to [`Severity::Info`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "CRITICAL" => Severity::Critical,
            "HIGH" => Severity::High,
            "MEDIUM" | "WARNING" | "WARN" => Severity::Medium,
            "LOW" => Severity::Low,
            _ => Severity::Info,
        }
    }

    /// True for severities that warrant immediate escalation.
    pub fn is_alert(&self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }

    /// Classify this severity into the list it contributes to.
    pub fn bucket(&self) -> SeverityBucket {
        if self.is_alert() {
            SeverityBucket::Alert
        } else {
            SeverityBucket::Warning
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
