//! Adapters turning raw configuration records into threshold rules.
//!
//! One adapter per origin. Each emitted rule carries the adapter's
//! source bucket and the originating record id, which is what makes it
//! eligible for automatic deactivation once the source record stops
//! producing it.

use tracing::debug;

use linewatch_model::{ActivityScope, OrgId, Severity, SourceBucket, ThresholdRule};

use crate::catalog::activity;
use crate::sources::{ConfigSource, SourceError};

/// Rules derived from the active weld specification register: up to
/// three per specification, one per populated parameter group.
pub fn spec_rules(
    source: &dyn ConfigSource,
    org: &OrgId,
) -> Result<Vec<ThresholdRule>, SourceError> {
    let specs = source.weld_specs(org)?;
    if specs.is_empty() {
        debug!(org = %org, "no active weld specifications; skipping spec-derived rules");
        return Ok(Vec::new());
    }

    let mut rules = Vec::new();
    for spec in &specs {
        let welding_rule = |field: &str, severity: Severity, title: &str| {
            ThresholdRule::new(
                org.clone(),
                ActivityScope::of(activity::WELDING),
                field,
                severity,
                title,
            )
            .with_reference(format!("WPS {}", spec.wps_number))
            .with_origin(SourceBucket::WeldSpec, Some(spec.id.clone()))
        };

        if let Some(min_preheat) = spec.min_preheat_c {
            rules.push(
                welding_rule(
                    "preheat_temp_c",
                    Severity::Critical,
                    "Preheat temperature below WPS minimum",
                )
                .with_min(min_preheat)
                .with_unit("C")
                .with_message("Preheat of {value} C is below the WPS minimum of {min} C")
                .with_action("Stop welding and reheat the joint to at least {min} C"),
            );
        }

        if spec.wall_min_mm.is_some() || spec.wall_max_mm.is_some() {
            let mut rule = welding_rule(
                "wall_thickness_mm",
                Severity::Critical,
                "Wall thickness outside WPS range",
            )
            .with_unit("mm")
            .with_message("Measured wall thickness {value} mm is outside the {min}-{max} mm range")
            .with_action("Verify the joint against the mill certificates before welding");
            rule.min = spec.wall_min_mm;
            rule.max = spec.wall_max_mm;
            rules.push(rule);
        }

        if spec.diameter_min_mm.is_some() || spec.diameter_max_mm.is_some() {
            let mut rule = welding_rule(
                "pipe_diameter_mm",
                Severity::Medium,
                "Pipe diameter outside WPS range",
            )
            .with_unit("mm")
            .with_message("Measured diameter {value} mm is outside the {min}-{max} mm range")
            .with_action("Confirm the pipe heat against the spread's material records");
            rule.min = spec.diameter_min_mm;
            rule.max = spec.diameter_max_mm;
            rules.push(rule);
        }
    }
    Ok(rules)
}

/// Rules derived from contract configuration: KP bounds over all
/// activity types, and the standard workday length when configured.
pub fn contract_rules(
    source: &dyn ConfigSource,
    org: &OrgId,
) -> Result<Vec<ThresholdRule>, SourceError> {
    let Some(terms) = source.contract(org)? else {
        debug!(org = %org, "no contract configuration; skipping contract-derived rules");
        return Ok(Vec::new());
    };

    let mut rules = Vec::new();

    if terms.kp_start.is_some() || terms.kp_end.is_some() {
        let mut rule = ThresholdRule::new(
            org.clone(),
            ActivityScope::All,
            "kp_start",
            Severity::Critical,
            "Work reported outside contract KP limits",
        )
        .with_unit("km")
        .with_message("Reported KP {value} is outside the contract section ({min} to {max})")
        .with_action("Confirm the reported chainage against the contract alignment sheets")
        .with_reference("Contract scope schedule")
        .with_origin(SourceBucket::Contract, terms.id.clone());
        rule.min = terms.kp_start;
        rule.max = terms.kp_end;
        rules.push(rule);
    }

    if let Some(hours) = terms.standard_workday_hours {
        rules.push(
            ThresholdRule::new(
                org.clone(),
                ActivityScope::All,
                "workday_hours",
                Severity::Medium,
                "Workday exceeds contract standard",
            )
            .with_max(hours)
            .with_unit("h")
            .with_message("Reported workday of {value} h exceeds the standard {max} h")
            .with_action("Record the overtime justification in the daily report")
            .with_reference("Contract schedule of working hours")
            .with_origin(SourceBucket::Contract, terms.id.clone()),
        );
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{ContractTerms, StaticConfigSource, WeldSpec};

    fn org() -> OrgId {
        OrgId::from("org-1")
    }

    #[test]
    fn spec_adapter_emits_one_rule_per_populated_group() {
        let mut spec = WeldSpec::new("WS-7", "WPS-104-A");
        spec.min_preheat_c = Some(65.0);
        spec.wall_min_mm = Some(7.1);
        spec.wall_max_mm = Some(9.5);
        let source = StaticConfigSource::new().with_spec(org(), spec);

        let rules = spec_rules(&source, &org()).expect("spec rules");
        assert_eq!(rules.len(), 2);

        let preheat = &rules[0];
        assert_eq!(preheat.key.field_key, "preheat_temp_c");
        assert_eq!(preheat.min, Some(65.0));
        assert_eq!(preheat.severity, Severity::Critical);
        assert!(preheat.is_auto_seeded());
        assert_eq!(
            preheat.origin.as_ref().and_then(|o| o.record_id.as_deref()),
            Some("WS-7")
        );

        let wall = &rules[1];
        assert_eq!(wall.key.field_key, "wall_thickness_mm");
        assert_eq!(wall.min, Some(7.1));
        assert_eq!(wall.max, Some(9.5));
    }

    #[test]
    fn spec_adapter_is_quiet_without_specs() {
        let source = StaticConfigSource::new();
        assert!(spec_rules(&source, &org()).expect("spec rules").is_empty());
    }

    #[test]
    fn contract_adapter_scopes_kp_rule_to_all_activities() {
        let terms = ContractTerms {
            id: Some("CT-2024-01".to_string()),
            kp_start: Some(12.35),
            kp_end: Some(48.0),
            standard_workday_hours: Some(10.0),
        };
        let source = StaticConfigSource::new().with_contract(org(), terms);

        let rules = contract_rules(&source, &org()).expect("contract rules");
        assert_eq!(rules.len(), 2);

        let kp = &rules[0];
        assert_eq!(kp.key.scope, ActivityScope::All);
        assert_eq!(kp.key.field_key, "kp_start");
        assert_eq!(kp.min, Some(12.35));
        assert_eq!(kp.max, Some(48.0));
        assert_eq!(kp.severity, Severity::Critical);

        let workday = &rules[1];
        assert_eq!(workday.key.field_key, "workday_hours");
        assert_eq!(workday.max, Some(10.0));
        assert_eq!(workday.severity, Severity::Medium);
    }

    #[test]
    fn contract_adapter_is_quiet_without_contract() {
        let source = StaticConfigSource::new();
        assert!(
            contract_rules(&source, &org())
                .expect("contract rules")
                .is_empty()
        );
    }
}
