//! Built-in industry-default threshold rules.
//!
//! These cover the checks every pipeline spread needs regardless of
//! project configuration. They carry no provenance, so a refresh pass
//! never deactivates them.

use linewatch_model::{ActivityScope, OrgId, Severity, ThresholdRule};

/// Activity type vocabulary used by the default catalog.
pub mod activity {
    pub const CLEARING: &str = "clearing";
    pub const TOPSOIL: &str = "topsoil";
    pub const BENDING: &str = "bending";
    pub const WELDING: &str = "welding";
    pub const BACKFILL: &str = "backfill";
    pub const CROSSINGS: &str = "crossings";
}

/// The fixed default rule catalog for one organization.
///
/// Pure: no I/O, no clock. The refresh pass stamps `seeded_at` before
/// writing these to the store.
pub fn default_rules(org: &OrgId) -> Vec<ThresholdRule> {
    let rule = |scope: &str, field: &str, severity: Severity, title: &str| {
        ThresholdRule::new(org.clone(), ActivityScope::of(scope), field, severity, title)
    };

    vec![
        rule(
            activity::CROSSINGS,
            "grout_volume_variance_percent",
            Severity::Medium,
            "Grout volume variance above limit",
        )
        .with_max(10.0)
        .with_unit("%")
        .with_message("Grout take variance of {value}% exceeds the {max}% allowance")
        .with_action("Reconcile grout volumes against the bore log before the next shift")
        .with_reference("Crossing design specification"),
        rule(
            activity::BENDING,
            "bend_angle_deg",
            Severity::Medium,
            "Field bend angle above limit",
        )
        .with_max(18.0)
        .with_unit("deg")
        .with_message("Bend angle {value} deg exceeds the {max} deg limit for a single field bend")
        .with_action("Re-check the bend against the bending crew's approved procedure")
        .with_reference("CSA Z662-19 Cl. 6.2.4"),
        rule(
            activity::BENDING,
            "ovality_percent",
            Severity::Critical,
            "Pipe ovality above limit",
        )
        .with_max(2.5)
        .with_unit("%")
        .with_message("Ovality of {value}% exceeds the {max}% acceptance limit")
        .with_action("Quarantine the joint and notify the chief inspector")
        .with_reference("CSA Z662-19 Cl. 6.2.5"),
        rule(
            activity::BACKFILL,
            "cover_depth_m",
            Severity::Critical,
            "Cover depth below minimum",
        )
        .with_min(0.6)
        .with_unit("m")
        .with_message("Cover depth {value} m is below the {min} m minimum")
        .with_action("Survey the section and restore cover before final cleanup")
        .with_reference("CSA Z662-19 Table 4.9"),
        rule(
            activity::BACKFILL,
            "compaction_percent",
            Severity::Medium,
            "Compaction below specification",
        )
        .with_min(95.0)
        .with_unit("%")
        .with_message("Compaction of {value}% is below the specified {min}%")
        .with_action("Re-compact the lift and retest before placing the next lift")
        .with_reference("Project earthworks specification"),
        rule(
            activity::TOPSOIL,
            "admixture_percent",
            Severity::Critical,
            "Topsoil admixture above limit",
        )
        .with_max(15.0)
        .with_unit("%")
        .with_message("Admixture of {value}% exceeds the {max}% limit")
        .with_action("Stop stripping and re-establish the horizon boundary with the inspector")
        .with_reference("Environmental Protection Plan s.4.2"),
        rule(
            activity::TOPSOIL,
            "stockpile_separation_m",
            Severity::Medium,
            "Stockpile separation below minimum",
        )
        .with_min(1.0)
        .with_unit("m")
        .with_message("Stockpile separation of {value} m is below the {min} m minimum")
        .with_action("Rework the windrow to restore separation between soil horizons")
        .with_reference("Soil handling procedure"),
        rule(
            activity::WELDING,
            "root_opening_mm",
            Severity::Critical,
            "Root opening outside WPS range",
        )
        .with_min(1.0)
        .with_max(3.0)
        .with_unit("mm")
        .with_message("Root opening {value} mm is outside the {min}-{max} mm range")
        .with_action("Re-fit the joint to the qualified procedure before welding")
        .with_reference("API 1104 s.7.2"),
        rule(
            activity::WELDING,
            "hi_lo_mm",
            Severity::Critical,
            "Hi-lo misalignment above limit",
        )
        .with_max(1.6)
        .with_unit("mm")
        .with_message("Hi-lo of {value} mm exceeds the {max} mm limit")
        .with_action("Re-align the joint; do not bridge misalignment with weld metal")
        .with_reference("API 1104 s.7.8"),
        rule(
            activity::CROSSINGS,
            "foreign_line_clearance_m",
            Severity::Critical,
            "Foreign line clearance below minimum",
        )
        .with_min(0.3)
        .with_unit("m")
        .with_message("Clearance of {value} m to the foreign line is below the {min} m minimum")
        .with_action("Hold work at the crossing and confirm clearance with the line owner")
        .with_reference("CSA Z662-19 Cl. 4.13"),
        rule(
            activity::CLEARING,
            "access_width_m",
            Severity::Medium,
            "Cleared width above permitted workspace",
        )
        .with_max(32.0)
        .with_unit("m")
        .with_message("Cleared width of {value} m exceeds the permitted {max} m")
        .with_action("Stake the workspace boundary and report the overage to environment")
        .with_reference("Permit conditions - workspace width"),
        rule(
            activity::CROSSINGS,
            "bore_length_m",
            Severity::Medium,
            "Bore length above design",
        )
        .with_max(250.0)
        .with_unit("m")
        .with_message("Bore length of {value} m exceeds the {max} m design length")
        .with_action("Confirm entry/exit stationing against the crossing drawings")
        .with_reference("Crossing design drawings"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_rules_are_well_formed() {
        let rules = default_rules(&OrgId::from("org-1"));
        assert_eq!(rules.len(), 12);
        for rule in &rules {
            assert!(rule.has_bounds(), "{} has no bounds", rule.key);
            assert!(!rule.is_auto_seeded(), "{} must carry no provenance", rule.key);
            assert!(!rule.reference.is_empty(), "{} has no citation", rule.key);
            assert!(rule.active);
        }
    }
}
