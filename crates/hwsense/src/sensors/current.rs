//! Current sensors (`curr*`).

use super::{parse_flag, parse_scaled};
use crate::raw::RawAttributes;
use crate::Result;
use serde::Serialize;

/// Raw currents are reported in milliamperes.
const MILLIAMPERES: f64 = 1000.0;

/// A sensor that measures electric current in amperes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CurrentSensor {
    /// Instance prefix, e.g. `curr1`.
    pub name: String,
    /// What the sensor is monitoring.
    pub label: Option<String>,
    /// Current draw in amperes.
    pub current: f64,
    /// Maximum current threshold.
    pub maximum: f64,
    /// Whether the current is outside its limits.
    pub alarm: bool,
    /// Whether the chip beeps on an alarm.
    pub beep: bool,
}

impl CurrentSensor {
    pub(crate) fn parse(name: &str, raw: &RawAttributes) -> Result<Self> {
        let mut sensor = Self {
            name: name.to_string(),
            ..Self::default()
        };

        for (attribute, value) in raw {
            match attribute.as_str() {
                "input" => sensor.current = parse_scaled(name, attribute, value, MILLIAMPERES)?,
                "max" => sensor.maximum = parse_scaled(name, attribute, value, MILLIAMPERES)?,
                "alarm" => sensor.alarm = parse_flag(value),
                "beep" => sensor.beep = parse_flag(value),
                "label" => sensor.label = Some(value.clone()),
                _ => {}
            }
        }

        Ok(sensor)
    }
}
