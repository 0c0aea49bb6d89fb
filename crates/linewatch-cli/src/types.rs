//! Input and output shapes for the CLI commands.

use serde::{Deserialize, Serialize};

use linewatch_model::{ActivityBlock, ReviewResult, ReviewStatus, ThresholdRule};
use linewatch_notify::NotificationOutcome;
use linewatch_review::FieldBundle;
use linewatch_rules::RefreshOutcome;

/// One saved activity block plus its weather/quality bundle, as produced
/// by the report-saving workflow.
#[derive(Debug, Deserialize)]
pub struct ReviewInput {
    pub activity: ActivityBlock,
    #[serde(default)]
    pub bundle: FieldBundle,
}

/// Everything a refresh run produced, for the summary printer.
#[derive(Debug)]
pub struct RefreshRun {
    pub org: String,
    pub outcome: RefreshOutcome,
    pub rules: Vec<ThresholdRule>,
}

/// Everything a review run produced, for the summary printer.
#[derive(Debug)]
pub struct ReviewRun {
    pub org: String,
    pub result: ReviewResult,
    pub notification: Option<NotificationOutcome>,
}

pub const REVIEW_SCHEMA: &str = "linewatch.review-result";
pub const REVIEW_SCHEMA_VERSION: u32 = 1;

/// JSON payload written by `review --report`.
#[derive(Debug, Serialize)]
pub struct ReviewPayload<'a> {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub org: &'a str,
    pub status: ReviewStatus,
    pub alert_count: usize,
    pub warning_count: usize,
    pub passed_count: usize,
    pub notification_required: bool,
    pub result: &'a ReviewResult,
}
