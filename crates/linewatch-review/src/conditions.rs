//! Fixed high-risk conditions and advisories over the field bundle.
//!
//! The condition table is an explicit list of tagged records iterated
//! uniformly by the reviewer. A predicate that cannot read its inputs
//! returns an error and is skipped for that activity only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use linewatch_model::{ObservedValue, ReviewAlert, Severity};

/// Rainfall that makes an unstabilized stockpile a handling risk.
pub const RAIN_TRIGGER_MM: f64 = 10.0;

/// Rainfall at which soil handling should stop regardless of stockpile state.
pub const HEAVY_RAIN_MM: f64 = 25.0;

/// Admixture above this fraction means horizons are being mixed.
pub const MAX_ADMIXTURE_PERCENT: f64 = 15.0;

/// Minimum undisturbed buffer to any waterbody.
pub const MIN_WATERBODY_BUFFER_M: f64 = 30.0;

/// Minimum separation between topsoil and subsoil windrows.
pub const MIN_STOCKPILE_SEPARATION_M: f64 = 1.0;

/// Allowed deviation between planned and actual stripping depth.
pub const STRIP_DEPTH_TOLERANCE_CM: f64 = 10.0;

/// Weather snapshot for the report day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConditions {
    pub precipitation_mm: Option<f64>,
    pub temperature_min_c: Option<f64>,
    pub temperature_max_c: Option<f64>,
}

/// Soil-handling quality answers from the report form.
///
/// The measured fields stay as [`ObservedValue`] because they arrive as
/// free text; a present-but-unreadable entry is a malformed observation,
/// which is different from a field nobody filled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilChecks {
    pub admixture_percent: ObservedValue,
    pub waterbody_buffer_m: ObservedValue,
    pub stockpile_separation_m: ObservedValue,
    pub planned_strip_depth_cm: ObservedValue,
    pub actual_strip_depth_cm: ObservedValue,
    pub stockpile_stabilized: Option<bool>,
    pub stockpile_marked: Option<bool>,
    pub horizon_boundary_clear: Option<bool>,
    pub horizon_mixing_observed: Option<bool>,
}

/// The flat weather/quality record supplied by the report-saving flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldBundle {
    pub weather: WeatherConditions,
    pub soil: SoilChecks,
}

#[derive(Debug, Error)]
pub enum ConditionError {
    #[error("field {field} holds an unreadable value: {raw}")]
    Malformed { field: &'static str, raw: String },
}

/// One named check over the field bundle.
pub struct ConditionCheck {
    pub key: &'static str,
    pub severity: Severity,
    pub title: &'static str,
    pub message: &'static str,
    pub action: &'static str,
    pub predicate: fn(&FieldBundle) -> Result<bool, ConditionError>,
}

impl ConditionCheck {
    pub fn alert(&self) -> ReviewAlert {
        ReviewAlert {
            source_key: self.key.to_string(),
            severity: self.severity,
            title: self.title.to_string(),
            message: self.message.to_string(),
            action: self.action.to_string(),
            reference: None,
        }
    }
}

/// Named high-risk conditions. Severities of `High`/`Critical` land in
/// the alerts list, the rest in warnings.
pub const HIGH_RISK_CONDITIONS: &[ConditionCheck] = &[
    ConditionCheck {
        key: "rain_on_unstabilized_stockpile",
        severity: Severity::High,
        title: "Rain on unstabilized stockpile",
        message: "Measurable rain fell on a stockpile that has not been stabilized",
        action: "Stabilize the stockpile and check windrow drainage before further stripping",
        predicate: rain_on_unstabilized_stockpile,
    },
    ConditionCheck {
        key: "excess_admixture",
        severity: Severity::Critical,
        title: "Excess topsoil admixture",
        message: "Reported admixture exceeds the allowable limit",
        action: "Stop stripping and re-establish the horizon boundary with the inspector",
        predicate: excess_admixture,
    },
    ConditionCheck {
        key: "waterbody_buffer_encroachment",
        severity: Severity::Critical,
        title: "Waterbody buffer encroachment",
        message: "Work is inside the undisturbed waterbody buffer",
        action: "Pull equipment back and notify the environmental lead immediately",
        predicate: waterbody_buffer_encroachment,
    },
    ConditionCheck {
        key: "strip_depth_variance",
        severity: Severity::Medium,
        title: "Stripping depth off plan",
        message: "Actual stripping depth deviates from the soil survey plan",
        action: "Re-check the survey stakes and adjust the stripping depth",
        predicate: strip_depth_variance,
    },
    ConditionCheck {
        key: "stockpile_separation_shortfall",
        severity: Severity::Medium,
        title: "Stockpile separation shortfall",
        message: "Topsoil and subsoil windrows are closer than the minimum separation",
        action: "Rework the windrow to restore separation between soil horizons",
        predicate: stockpile_separation_shortfall,
    },
    ConditionCheck {
        key: "horizon_mixing",
        severity: Severity::High,
        title: "Soil horizon mixing observed",
        message: "The inspector reported visible mixing of soil horizons",
        action: "Hold soil handling and segregate the affected material",
        predicate: horizon_mixing,
    },
];

/// Supplementary advisories outside the named-condition table. These
/// only ever contribute warnings.
pub const ADVISORY_CHECKS: &[ConditionCheck] = &[
    ConditionCheck {
        key: "heavy_rain",
        severity: Severity::Medium,
        title: "Heavy rain advisory",
        message: "Rainfall is heavy enough that soil handling should pause",
        action: "Suspend stripping until conditions and trafficability recover",
        predicate: heavy_rain,
    },
    ConditionCheck {
        key: "frost_conditions",
        severity: Severity::Low,
        title: "Frost conditions advisory",
        message: "Overnight frost was recorded on the spread",
        action: "Confirm frozen lifts are not being placed or stripped",
        predicate: frost_conditions,
    },
    ConditionCheck {
        key: "unmarked_stockpile",
        severity: Severity::Low,
        title: "Unmarked stockpile advisory",
        message: "A stockpile is missing its identification signage",
        action: "Sign the stockpile before the next shift change",
        predicate: unmarked_stockpile,
    },
    ConditionCheck {
        key: "unclear_horizon_boundary",
        severity: Severity::Medium,
        title: "Unclear horizon boundary advisory",
        message: "The topsoil/subsoil boundary could not be clearly identified",
        action: "Have the soils inspector confirm the boundary before stripping resumes",
        predicate: unclear_horizon_boundary,
    },
];

fn rain_on_unstabilized_stockpile(bundle: &FieldBundle) -> Result<bool, ConditionError> {
    let Some(precipitation) = bundle.weather.precipitation_mm else {
        return Ok(false);
    };
    Ok(precipitation > RAIN_TRIGGER_MM && bundle.soil.stockpile_stabilized == Some(false))
}

fn excess_admixture(bundle: &FieldBundle) -> Result<bool, ConditionError> {
    Ok(numeric(&bundle.soil.admixture_percent, "admixture_percent")?
        .is_some_and(|value| value > MAX_ADMIXTURE_PERCENT))
}

fn waterbody_buffer_encroachment(bundle: &FieldBundle) -> Result<bool, ConditionError> {
    Ok(numeric(&bundle.soil.waterbody_buffer_m, "waterbody_buffer_m")?
        .is_some_and(|value| value < MIN_WATERBODY_BUFFER_M))
}

fn strip_depth_variance(bundle: &FieldBundle) -> Result<bool, ConditionError> {
    let planned = numeric(&bundle.soil.planned_strip_depth_cm, "planned_strip_depth_cm")?;
    let actual = numeric(&bundle.soil.actual_strip_depth_cm, "actual_strip_depth_cm")?;
    let (Some(planned), Some(actual)) = (planned, actual) else {
        return Ok(false);
    };
    Ok((actual - planned).abs() > STRIP_DEPTH_TOLERANCE_CM)
}

fn stockpile_separation_shortfall(bundle: &FieldBundle) -> Result<bool, ConditionError> {
    Ok(
        numeric(&bundle.soil.stockpile_separation_m, "stockpile_separation_m")?
            .is_some_and(|value| value < MIN_STOCKPILE_SEPARATION_M),
    )
}

fn horizon_mixing(bundle: &FieldBundle) -> Result<bool, ConditionError> {
    Ok(bundle.soil.horizon_mixing_observed == Some(true))
}

fn heavy_rain(bundle: &FieldBundle) -> Result<bool, ConditionError> {
    Ok(bundle
        .weather
        .precipitation_mm
        .is_some_and(|value| value > HEAVY_RAIN_MM))
}

fn frost_conditions(bundle: &FieldBundle) -> Result<bool, ConditionError> {
    Ok(bundle
        .weather
        .temperature_min_c
        .is_some_and(|value| value < 0.0))
}

fn unmarked_stockpile(bundle: &FieldBundle) -> Result<bool, ConditionError> {
    Ok(bundle.soil.stockpile_marked == Some(false))
}

fn unclear_horizon_boundary(bundle: &FieldBundle) -> Result<bool, ConditionError> {
    Ok(bundle.soil.horizon_boundary_clear == Some(false))
}

/// Read a numeric field, distinguishing "not filled in" from
/// "filled in with something unreadable".
fn numeric(value: &ObservedValue, field: &'static str) -> Result<Option<f64>, ConditionError> {
    if value.is_missing() {
        return Ok(None);
    }
    match value.as_number() {
        Some(reading) => Ok(Some(reading)),
        None => Err(ConditionError::Malformed {
            field,
            raw: format!("{value:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rain_condition_requires_both_rain_and_an_unstabilized_stockpile() {
        let mut bundle = FieldBundle::default();
        bundle.weather.precipitation_mm = Some(12.0);
        assert!(!rain_on_unstabilized_stockpile(&bundle).expect("predicate"));
        bundle.soil.stockpile_stabilized = Some(false);
        assert!(rain_on_unstabilized_stockpile(&bundle).expect("predicate"));
        bundle.weather.precipitation_mm = Some(2.0);
        assert!(!rain_on_unstabilized_stockpile(&bundle).expect("predicate"));
    }

    #[test]
    fn malformed_numeric_field_is_an_error_not_a_trigger() {
        let mut bundle = FieldBundle::default();
        bundle.soil.waterbody_buffer_m = ObservedValue::Text("approx ten".to_string());
        assert!(waterbody_buffer_encroachment(&bundle).is_err());

        bundle.soil.waterbody_buffer_m = ObservedValue::Text("12.5".to_string());
        assert!(waterbody_buffer_encroachment(&bundle).expect("predicate"));

        bundle.soil.waterbody_buffer_m = ObservedValue::Missing;
        assert!(!waterbody_buffer_encroachment(&bundle).expect("predicate"));
    }

    #[test]
    fn strip_depth_variance_needs_both_depths() {
        let mut bundle = FieldBundle::default();
        bundle.soil.planned_strip_depth_cm = ObservedValue::Number(30.0);
        assert!(!strip_depth_variance(&bundle).expect("predicate"));
        bundle.soil.actual_strip_depth_cm = ObservedValue::Number(45.0);
        assert!(strip_depth_variance(&bundle).expect("predicate"));
        bundle.soil.actual_strip_depth_cm = ObservedValue::Number(35.0);
        assert!(!strip_depth_variance(&bundle).expect("predicate"));
    }
}
