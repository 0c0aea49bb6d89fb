//! Field observations as captured on a daily inspection report.
//!
//! Observed values arrive from loosely-typed form input: numbers, free
//! text, checkboxes, or nothing at all. [`ObservedValue::as_number`] is
//! the single normalization point deciding what counts as a measurable
//! numeric reading; everything downstream works from that decision.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One measured or answered field from an inspection record.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ObservedValue {
    Number(f64),
    Text(String),
    Flag(bool),
    #[default]
    Missing,
}

impl ObservedValue {
    /// The canonical numeric reading of this value, if it has one.
    ///
    /// Numeric text is parsed; non-finite numbers and unparseable text
    /// yield `None` and are treated as "not yet measured", never as a
    /// violation.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ObservedValue::Number(value) => value.is_finite().then_some(*value),
            ObservedValue::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
            }
            ObservedValue::Flag(_) | ObservedValue::Missing => None,
        }
    }

    /// The boolean reading of this value, if it has one. Accepts the
    /// yes/no spellings that field forms produce.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ObservedValue::Flag(value) => Some(*value),
            ObservedValue::Text(raw) => match raw.trim().to_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => Some(true),
                "false" | "no" | "n" | "0" => Some(false),
                _ => None,
            },
            ObservedValue::Number(_) | ObservedValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            ObservedValue::Missing => true,
            ObservedValue::Text(raw) => raw.trim().is_empty(),
            _ => false,
        }
    }
}

impl Serialize for ObservedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ObservedValue::Number(value) => serializer.serialize_f64(*value),
            ObservedValue::Text(raw) => serializer.serialize_str(raw),
            ObservedValue::Flag(value) => serializer.serialize_bool(*value),
            ObservedValue::Missing => serializer.serialize_none(),
        }
    }
}

struct ObservedValueVisitor;

impl<'de> Visitor<'de> for ObservedValueVisitor {
    type Value = ObservedValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number, string, boolean, or null")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(ObservedValue::Number(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(ObservedValue::Number(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(ObservedValue::Number(value as f64))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(ObservedValue::Flag(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        if value.trim().is_empty() {
            Ok(ObservedValue::Missing)
        } else {
            Ok(ObservedValue::Text(value.to_string()))
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ObservedValue::Missing)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ObservedValue::Missing)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(ObservedValueVisitor)
    }
}

impl<'de> Deserialize<'de> for ObservedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ObservedValueVisitor)
    }
}

/// One saved activity block from a daily report, with its observations.
///
/// Observations are immutable once the report section is saved; edits
/// produce a new block, not engine state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityBlock {
    pub activity_type: String,
    pub report_id: String,
    #[serde(default)]
    pub kp_start: Option<f64>,
    #[serde(default)]
    pub kp_end: Option<f64>,
    #[serde(default)]
    pub observations: BTreeMap<String, ObservedValue>,
}

impl ActivityBlock {
    pub fn new(activity_type: impl Into<String>, report_id: impl Into<String>) -> Self {
        Self {
            activity_type: activity_type.into(),
            report_id: report_id.into(),
            kp_start: None,
            kp_end: None,
            observations: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_kp(mut self, start: f64, end: f64) -> Self {
        self.kp_start = Some(start);
        self.kp_end = Some(end);
        self
    }

    #[must_use]
    pub fn with_observation(mut self, field_key: impl Into<String>, value: ObservedValue) -> Self {
        self.observations.insert(field_key.into(), value);
        self
    }

    /// Look up the observed value for a rule's field key. The block's KP
    /// bounds stand in for the `kp_start`/`kp_end` fields so location
    /// rules evaluate without duplicating them into the observation map.
    pub fn observed(&self, field_key: &str) -> ObservedValue {
        match field_key {
            "kp_start" => {
                if let Some(kp) = self.kp_start {
                    return ObservedValue::Number(kp);
                }
                self.lookup(field_key)
            }
            "kp_end" => {
                if let Some(kp) = self.kp_end {
                    return ObservedValue::Number(kp);
                }
                self.lookup(field_key)
            }
            _ => self.lookup(field_key),
        }
    }

    fn lookup(&self, field_key: &str) -> ObservedValue {
        self.observations
            .get(field_key)
            .cloned()
            .unwrap_or(ObservedValue::Missing)
    }
}
