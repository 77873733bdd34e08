//! Chassis intrusion sensors (`intrusion*`).

use super::parse_flag;
use crate::raw::RawAttributes;
use serde::Serialize;

/// A sensor that detects whether the chassis has been opened.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IntrusionSensor {
    /// Instance prefix, e.g. `intrusion0`.
    pub name: String,
    /// Whether an intrusion was detected.
    pub alarm: bool,
}

impl IntrusionSensor {
    pub(crate) fn parse(name: &str, raw: &RawAttributes) -> Self {
        Self {
            name: name.to_string(),
            alarm: raw.get("alarm").is_some_and(|value| parse_flag(value)),
        }
    }
}
