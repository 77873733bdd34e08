//! Fan speed sensors (`fan*`).

use super::{parse_count, parse_flag};
use crate::raw::RawAttributes;
use crate::Result;
use serde::Serialize;

/// A sensor that measures fan speed in RPM. Values are not scaled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FanSensor {
    /// Instance prefix, e.g. `fan1`.
    pub name: String,
    /// Current speed.
    pub current: u32,
    /// Minimum speed threshold.
    pub minimum: u32,
    /// Whether the fan is below its minimum speed.
    pub alarm: bool,
    /// Whether the chip beeps on an alarm.
    pub beep: bool,
}

impl FanSensor {
    pub(crate) fn parse(name: &str, raw: &RawAttributes) -> Result<Self> {
        let mut sensor = Self {
            name: name.to_string(),
            ..Self::default()
        };

        for (attribute, value) in raw {
            match attribute.as_str() {
                "input" => sensor.current = parse_count(name, attribute, value)?,
                "min" => sensor.minimum = parse_count(name, attribute, value)?,
                "alarm" => sensor.alarm = parse_flag(value),
                "beep" => sensor.beep = parse_flag(value),
                _ => {}
            }
        }

        Ok(sensor)
    }
}
