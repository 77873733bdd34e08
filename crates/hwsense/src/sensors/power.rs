//! Power sensors (`power*`).

use super::{parse_flag, parse_scaled};
use crate::raw::RawAttributes;
use crate::Result;
use serde::Serialize;

/// Raw power values are reported in microwatts.
const MICROWATTS: f64 = 1_000_000.0;

/// A sensor that measures power in watts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PowerSensor {
    /// Instance prefix, e.g. `power1`.
    pub name: String,
    /// What the sensor is monitoring.
    pub label: Option<String>,
    /// Instantaneous power.
    pub current: f64,
    /// Maximum power threshold.
    pub maximum: f64,
    /// Power averaged over the driver's interval.
    pub average: f64,
    /// Whether the power is outside its limits.
    pub alarm: bool,
    /// Whether the chip beeps on an alarm.
    pub beep: bool,
}

impl PowerSensor {
    pub(crate) fn parse(name: &str, raw: &RawAttributes) -> Result<Self> {
        let mut sensor = Self {
            name: name.to_string(),
            ..Self::default()
        };

        for (attribute, value) in raw {
            match attribute.as_str() {
                "input" => sensor.current = parse_scaled(name, attribute, value, MICROWATTS)?,
                "max" => sensor.maximum = parse_scaled(name, attribute, value, MICROWATTS)?,
                "average" => sensor.average = parse_scaled(name, attribute, value, MICROWATTS)?,
                "alarm" => sensor.alarm = parse_flag(value),
                "beep" => sensor.beep = parse_flag(value),
                "label" => sensor.label = Some(value.clone()),
                _ => {}
            }
        }

        Ok(sensor)
    }
}
