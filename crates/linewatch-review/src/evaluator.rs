//! Threshold rule evaluation.

use linewatch_model::{ObservedValue, ReviewAlert, ThresholdRule};

/// Verdict for one rule against one observed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pass,
    Violation(ReviewAlert),
    /// The field has no numeric reading yet. Never a violation.
    NotMeasured,
}

/// Decide whether an observed value violates a rule.
///
/// Pure: the same rule and value always produce the same outcome.
/// Violations require strict inequality (`value < min` or `value > max`);
/// a value sitting exactly on a bound passes.
pub fn evaluate(rule: &ThresholdRule, value: &ObservedValue) -> Outcome {
    // Explicit decision point: an absent or non-numeric reading means
    // "not yet measured", not a failure.
    let Some(reading) = value.as_number() else {
        return Outcome::NotMeasured;
    };

    let below = rule.min.is_some_and(|min| reading < min);
    let above = rule.max.is_some_and(|max| reading > max);
    if !below && !above {
        return Outcome::Pass;
    }

    Outcome::Violation(ReviewAlert {
        source_key: rule.key.field_key.clone(),
        severity: rule.severity,
        title: rule.title.clone(),
        message: rule.render_message(reading),
        action: rule.render_action(reading),
        reference: (!rule.reference.is_empty()).then(|| rule.reference.clone()),
    })
}
