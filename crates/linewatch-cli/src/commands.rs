//! Command implementations behind the CLI surface.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use linewatch_model::{OrgId, ProjectConfig, ReviewResult, ThresholdRule};
use linewatch_notify::{FileOutbox, Notifier};
use linewatch_review::ActivityReviewer;
use linewatch_rules::{CsvConfigSource, RuleSeeder};
use linewatch_store::{JsonRuleStore, RuleStore};

use crate::cli::{RefreshArgs, ReviewArgs, RulesArgs};
use crate::types::{
    REVIEW_SCHEMA, REVIEW_SCHEMA_VERSION, RefreshRun, ReviewInput, ReviewPayload, ReviewRun,
};

pub fn run_refresh(args: &RefreshArgs) -> Result<RefreshRun> {
    let store = JsonRuleStore::new(&args.rules_dir)
        .with_context(|| format!("opening rule store at {}", args.rules_dir.display()))?;
    let source = CsvConfigSource::new(&args.config_dir);
    let org = OrgId::from(args.org.as_str());

    let outcome = RuleSeeder::new(&store, &source).refresh(&org);
    let rules = store
        .active_rules(&org)
        .with_context(|| format!("listing active rules for {org}"))?;

    Ok(RefreshRun {
        org: args.org.clone(),
        outcome,
        rules,
    })
}

pub fn run_review(args: &ReviewArgs) -> Result<ReviewRun> {
    let input = read_review_input(&args.activity_file)?;
    let store = JsonRuleStore::new(&args.rules_dir)
        .with_context(|| format!("opening rule store at {}", args.rules_dir.display()))?;
    let project = match &args.project {
        Some(path) => ProjectConfig::load(path)
            .with_context(|| format!("loading project config from {}", path.display()))?,
        None => ProjectConfig::default(),
    };
    let org = OrgId::from(args.org.as_str());

    let reviewer = ActivityReviewer::new(&store);
    let result = reviewer.review(&org, &input.activity, &input.bundle, &project);

    let notification = if args.notify {
        let outbox = FileOutbox::new(&args.outbox)
            .with_context(|| format!("opening outbox at {}", args.outbox.display()))?;
        Some(Notifier::new(&outbox).dispatch(&result, &project))
    } else {
        None
    };

    if let Some(report_path) = &args.report {
        write_review_payload(report_path, args.org.as_str(), &result)?;
    }

    Ok(ReviewRun {
        org: args.org.clone(),
        result,
        notification,
    })
}

pub fn run_rules(args: &RulesArgs) -> Result<Vec<ThresholdRule>> {
    let store = JsonRuleStore::new(&args.rules_dir)
        .with_context(|| format!("opening rule store at {}", args.rules_dir.display()))?;
    let org = OrgId::from(args.org.as_str());
    let rules = if args.all {
        store.all_rules(&org)
    } else {
        store.active_rules(&org)
    }
    .with_context(|| format!("listing rules for {org}"))?;
    Ok(rules)
}

fn read_review_input(path: &Path) -> Result<ReviewInput> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading activity file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parsing activity file {}", path.display()))
}

fn write_review_payload(path: &Path, org: &str, result: &ReviewResult) -> Result<()> {
    let payload = ReviewPayload {
        schema: REVIEW_SCHEMA,
        schema_version: REVIEW_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        org,
        status: result.overall_status(),
        alert_count: result.alert_count(),
        warning_count: result.warning_count(),
        passed_count: result.passed_count(),
        notification_required: result.notification_required(),
        result,
    };
    let json = serde_json::to_string_pretty(&payload).context("serializing review payload")?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("writing review payload to {}", path.display()))?;
    Ok(())
}
