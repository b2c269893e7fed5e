use crate::domain::models::{Condition, RuleSet, Status};
use crate::store::{ClassifyError, MetricValue};

const LITERAL_OVERRIDES: [(&str, Status); 6] = [
    ("true", Status::Pass),
    ("pass", Status::Pass),
    ("unknown", Status::Warn),
    ("warn", Status::Warn),
    ("false", Status::Fail),
    ("fail", Status::Fail),
];

/// Evaluates a resolved value against a metric's rule set.
///
/// Bands and their conditions are walked in declared order and every
/// satisfied condition overwrites the status with the band's status, so the
/// last matching rule wins. Zero thresholds are evaluated like any other.
///
/// Some sample attributes carry boolean-like strings instead of numbers
/// (a sex-match check reports `"true"`/`"false"`). Those literals map
/// straight to a status after band evaluation, overriding whatever the rules
/// produced.
pub fn evaluate(value: &MetricValue, rules: &RuleSet) -> Result<Status, ClassifyError> {
    let override_status = literal_override(value);
    let mut status = Status::Unknown;

    for band in &rules.bands {
        for condition in &band.conditions {
            let satisfied = match condition {
                Condition::Gt(threshold) => {
                    numeric_operand(value, override_status.is_some())?.map(|v| v > *threshold)
                }
                Condition::Lt(threshold) => {
                    numeric_operand(value, override_status.is_some())?.map(|v| v < *threshold)
                }
                Condition::Eq(threshold) => {
                    numeric_operand(value, override_status.is_some())?.map(|v| v == *threshold)
                }
                Condition::SEq(expected) => Some(value.text_eq(expected)),
            };
            if satisfied.unwrap_or(false) {
                status = band.status;
            }
        }
    }

    Ok(override_status.unwrap_or(status))
}

fn literal_override(value: &MetricValue) -> Option<Status> {
    let text = value.as_text()?;
    LITERAL_OVERRIDES
        .iter()
        .find(|(literal, _)| *literal == text)
        .map(|(_, status)| *status)
}

/// A boolean-like value never satisfies a numeric threshold; any other value
/// that fails to convert is a real type error.
fn numeric_operand(
    value: &MetricValue,
    boolean_like: bool,
) -> Result<Option<f64>, ClassifyError> {
    match value.as_f64() {
        Ok(v) => Ok(Some(v)),
        Err(_) if boolean_like => Ok(None),
        Err(e) => Err(e),
    }
}
