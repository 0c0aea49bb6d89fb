//! Threshold evaluation and activity review for field inspection data.

mod conditions;
mod evaluator;
mod reviewer;

pub use conditions::{
    ADVISORY_CHECKS, ConditionCheck, ConditionError, FieldBundle, HEAVY_RAIN_MM,
    HIGH_RISK_CONDITIONS, MAX_ADMIXTURE_PERCENT, MIN_STOCKPILE_SEPARATION_M,
    MIN_WATERBODY_BUFFER_M, RAIN_TRIGGER_MM, STRIP_DEPTH_TOLERANCE_CM, SoilChecks,
    WeatherConditions,
};
pub use evaluator::{Outcome, evaluate};
pub use reviewer::ActivityReviewer;
