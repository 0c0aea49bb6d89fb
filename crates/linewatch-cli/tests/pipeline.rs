//! End-to-end refresh + review through the command layer.

use std::fs;
use std::path::Path;

use linewatch_cli::cli::{RefreshArgs, ReviewArgs, RulesArgs};
use linewatch_cli::commands::{run_refresh, run_review, run_rules};
use linewatch_model::ReviewStatus;

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write fixture");
}

fn seed_config(dir: &Path) {
    write_file(
        &dir.join("weld_specs.csv"),
        "Org,Spec ID,WPS Number,Min Preheat C,Wall Min mm,Wall Max mm,OD Min mm,OD Max mm,Active\n\
         org-1,WS-1,WPS-104-A,65,7.1,9.5,,,true\n",
    );
    write_file(
        &dir.join("contracts.csv"),
        "Org,Contract ID,KP Start,KP End,Workday Hours\n\
         org-1,CT-2024-01,12+350,48+000,10\n",
    );
}

#[test]
fn refresh_then_review_flags_an_out_of_spec_activity() {
    let workspace = tempfile::tempdir().expect("tempdir");
    let config_dir = workspace.path().join("config");
    let rules_dir = workspace.path().join("rules");
    fs::create_dir_all(&config_dir).expect("config dir");
    seed_config(&config_dir);

    let refresh = run_refresh(&RefreshArgs {
        org: "org-1".to_string(),
        config_dir: config_dir.clone(),
        rules_dir: rules_dir.clone(),
    })
    .expect("refresh run");
    // 12 defaults + preheat + wall thickness + KP bounds + workday hours.
    assert_eq!(refresh.outcome.upserted, 16);
    assert_eq!(refresh.outcome.deactivated, 0);
    assert_eq!(refresh.rules.len(), 16);

    // A welding block with cold preheat, inside the contract section.
    let activity_file = workspace.path().join("activity.json");
    write_file(
        &activity_file,
        r#"{
  "activity": {
    "activity_type": "welding",
    "report_id": "RPT-051",
    "kp_start": 20.0,
    "kp_end": 20.4,
    "observations": {
      "preheat_temp_c": 48,
      "wall_thickness_mm": "8.2"
    }
  },
  "bundle": {
    "weather": { "precipitation_mm": 2.0, "temperature_min_c": 4.0 }
  }
}"#,
    );

    let report_path = workspace.path().join("review.json");
    let review = run_review(&ReviewArgs {
        activity_file,
        org: "org-1".to_string(),
        rules_dir: rules_dir.clone(),
        project: None,
        notify: true,
        outbox: workspace.path().join("outbox"),
        report: Some(report_path.clone()),
    })
    .expect("review run");

    let result = &review.result;
    assert_eq!(result.overall_status(), ReviewStatus::Alert);
    assert!(result.alerts.iter().any(|a| a.source_key == "preheat_temp_c"));
    assert!(result.passed.iter().any(|key| key == "wall_thickness_mm"));
    assert!(result.passed.iter().any(|key| key == "kp_start"));
    assert!(result.notification_required());

    let notification = review.notification.as_ref().expect("notification outcome");
    assert!(notification.attempted);
    assert!(notification.delivered);
    let outbox_messages = fs::read_dir(workspace.path().join("outbox"))
        .expect("outbox dir")
        .count();
    assert_eq!(outbox_messages, 1);

    let payload: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("report written"))
            .expect("report parses");
    assert_eq!(payload["schema"], "linewatch.review-result");
    assert_eq!(payload["status"], "ALERT");
    assert_eq!(payload["notification_required"], true);

    // The rules command sees what refresh seeded.
    let rules = run_rules(&RulesArgs {
        org: "org-1".to_string(),
        rules_dir,
        all: false,
    })
    .expect("rules run");
    assert_eq!(rules.len(), 16);
}

#[test]
fn review_with_no_rules_still_reports_conditions() {
    let workspace = tempfile::tempdir().expect("tempdir");
    let activity_file = workspace.path().join("activity.json");
    write_file(
        &activity_file,
        r#"{
  "activity": { "activity_type": "topsoil", "report_id": "RPT-052" },
  "bundle": {
    "weather": { "precipitation_mm": 30.0 },
    "soil": { "admixture_percent": "18", "stockpile_stabilized": false }
  }
}"#,
    );

    let review = run_review(&ReviewArgs {
        activity_file,
        org: "org-9".to_string(),
        rules_dir: workspace.path().join("rules"),
        project: None,
        notify: false,
        outbox: workspace.path().join("outbox"),
        report: None,
    })
    .expect("review run");

    let result = &review.result;
    assert_eq!(result.overall_status(), ReviewStatus::Alert);
    assert!(result.alerts.iter().any(|a| a.source_key == "excess_admixture"));
    assert!(
        result
            .alerts
            .iter()
            .any(|a| a.source_key == "rain_on_unstabilized_stockpile")
    );
    assert!(result.warnings.iter().any(|a| a.source_key == "heavy_rain"));
    assert!(review.notification.is_none());
}
