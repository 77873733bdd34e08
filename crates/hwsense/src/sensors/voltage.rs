//! Voltage sensors (`in*`).

use super::{parse_flag, parse_scaled};
use crate::raw::RawAttributes;
use crate::Result;
use serde::Serialize;

/// Raw voltages are reported in millivolts.
const MILLIVOLTS: f64 = 1000.0;

/// A sensor that measures voltage in volts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct VoltageSensor {
    /// Instance prefix, e.g. `in0`.
    pub name: String,
    /// Rail name, e.g. `Vcore`.
    pub label: Option<String>,
    /// Current voltage.
    pub current: f64,
    /// Maximum voltage threshold.
    pub maximum: f64,
    /// Whether the voltage is outside its limits.
    pub alarm: bool,
    /// Whether the chip beeps on an alarm.
    pub beep: bool,
}

impl VoltageSensor {
    pub(crate) fn parse(name: &str, raw: &RawAttributes) -> Result<Self> {
        let mut sensor = Self {
            name: name.to_string(),
            ..Self::default()
        };

        for (attribute, value) in raw {
            match attribute.as_str() {
                "input" => sensor.current = parse_scaled(name, attribute, value, MILLIVOLTS)?,
                "max" => sensor.maximum = parse_scaled(name, attribute, value, MILLIVOLTS)?,
                "alarm" => sensor.alarm = parse_flag(value),
                "beep" => sensor.beep = parse_flag(value),
                "label" => sensor.label = Some(value.clone()),
                _ => {}
            }
        }

        Ok(sensor)
    }
}
