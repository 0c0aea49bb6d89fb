pub mod error;
pub mod kp;
pub mod observation;
pub mod project;
pub mod review;
pub mod rule;
pub mod severity;

pub use error::{ModelError, Result};
pub use kp::{format_kp, parse_kp};
pub use observation::{ActivityBlock, ObservedValue};
pub use project::{DEFAULT_ENVIRONMENTAL_LEAD, NotificationConfig, ProjectConfig, ProjectInfo};
pub use review::{ReviewAlert, ReviewResult, ReviewStatus};
pub use rule::{
    ActivityScope, OrgId, RuleKey, RuleOrigin, SourceBucket, ThresholdRule, format_quantity,
    render_template,
};
pub use severity::{Severity, SeverityBucket};

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(key: &str, severity: Severity) -> ReviewAlert {
        ReviewAlert {
            source_key: key.to_string(),
            severity,
            title: key.to_string(),
            message: String::new(),
            action: String::new(),
            reference: None,
        }
    }

    #[test]
    fn severity_buckets_and_ordering() {
        assert!(Severity::Critical.is_alert());
        assert!(Severity::High.is_alert());
        assert!(!Severity::Medium.is_alert());
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::Medium > Severity::Info);
        assert_eq!(Severity::parse("warning"), Severity::Medium);
        assert_eq!(Severity::parse("CRITICAL"), Severity::Critical);
        assert_eq!(Severity::parse("unknown"), Severity::Info);
    }

    #[test]
    fn review_result_status_and_counts() {
        let mut result = ReviewResult::new("topsoil", "RPT-001");
        assert_eq!(result.overall_status(), ReviewStatus::Pass);
        assert!(!result.notification_required());

        result.record(alert("depth_variance", Severity::Medium));
        assert_eq!(result.overall_status(), ReviewStatus::Warning);
        assert_eq!(result.warning_count(), 1);
        assert!(!result.notification_required());

        result.record(alert("admixture_percent", Severity::Critical));
        assert_eq!(result.overall_status(), ReviewStatus::Alert);
        assert_eq!(result.alert_count(), 1);
        assert!(result.notification_required());
        assert_eq!(result.top_severity(), Some(Severity::Critical));
    }

    #[test]
    fn template_rendering_substitutes_placeholders() {
        let rule = ThresholdRule::new(
            OrgId::from("org-1"),
            ActivityScope::of("topsoil"),
            "admixture_percent",
            Severity::Critical,
            "Admixture above limit",
        )
        .with_max(15.0)
        .with_message("Admixture {value}% exceeds the {max}% limit");
        assert_eq!(
            rule.render_message(18.0),
            "Admixture 18% exceeds the 15% limit"
        );
    }

    #[test]
    fn activity_scope_wildcard() {
        assert!(ActivityScope::of("*").matches("welding"));
        assert!(ActivityScope::of("topsoil").matches("Topsoil"));
        assert!(!ActivityScope::of("topsoil").matches("welding"));
        let json = serde_json::to_string(&ActivityScope::All).expect("serialize scope");
        assert_eq!(json, "\"*\"");
    }

    #[test]
    fn observed_value_normalization() {
        assert_eq!(ObservedValue::Number(12.5).as_number(), Some(12.5));
        assert_eq!(ObservedValue::Text(" 12.5 ".to_string()).as_number(), Some(12.5));
        assert_eq!(ObservedValue::Text("n/a".to_string()).as_number(), None);
        assert_eq!(ObservedValue::Missing.as_number(), None);
        assert_eq!(ObservedValue::Number(f64::NAN).as_number(), None);
        assert_eq!(ObservedValue::Text("yes".to_string()).as_flag(), Some(true));
    }

    #[test]
    fn observed_value_lenient_json() {
        let parsed: ObservedValue = serde_json::from_str("18").expect("number");
        assert_eq!(parsed, ObservedValue::Number(18.0));
        let parsed: ObservedValue = serde_json::from_str("\"18\"").expect("string");
        assert_eq!(parsed.as_number(), Some(18.0));
        let parsed: ObservedValue = serde_json::from_str("null").expect("null");
        assert!(parsed.is_missing());
        let parsed: ObservedValue = serde_json::from_str("true").expect("bool");
        assert_eq!(parsed.as_flag(), Some(true));
    }

    #[test]
    fn kp_parsing() {
        assert_eq!(parse_kp("12+350"), Some(12.35));
        assert_eq!(parse_kp("KP 12+350"), Some(12.35));
        assert_eq!(parse_kp("12.35"), Some(12.35));
        assert_eq!(parse_kp("garbage"), None);
        assert_eq!(format_kp(12.35), "12+350");
    }

    #[test]
    fn kp_observation_falls_back_to_block_bounds() {
        let block = ActivityBlock::new("welding", "RPT-002").with_kp(10.2, 10.9);
        assert_eq!(block.observed("kp_start").as_number(), Some(10.2));
        assert_eq!(block.observed("kp_end").as_number(), Some(10.9));
        assert!(block.observed("preheat_temp_c").is_missing());
    }
}
