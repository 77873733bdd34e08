//! Typed sensors and the dispatch from raw attributes to them.
//!
//! Each sensor instance prefix is classified by its leading non-numeric token
//! (`temp1` → `temp`) and handed to the parser for that class. Prefixes of
//! unknown classes are dropped.

mod current;
mod fan;
mod intrusion;
mod power;
mod temperature;
mod voltage;

pub use current::CurrentSensor;
pub use fan::FanSensor;
pub use intrusion::IntrusionSensor;
pub use power::PowerSensor;
pub use temperature::{TemperatureSensor, TemperatureSensorType};
pub use voltage::VoltageSensor;

use crate::raw::{RawAttributeBag, RawAttributes};
use crate::{Error, Result};
use serde::Serialize;
use tracing::trace;

/// The class of a sensor, derived from its instance prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Temperature,
    Voltage,
    Fan,
    Current,
    Power,
    Intrusion,
}

impl SensorKind {
    /// Classifies a sensor instance prefix such as `temp1` or `in0`.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let token_end = prefix
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(prefix.len());

        match &prefix[..token_end] {
            "temp" => Some(SensorKind::Temperature),
            "in" => Some(SensorKind::Voltage),
            "fan" => Some(SensorKind::Fan),
            "curr" => Some(SensorKind::Current),
            "power" => Some(SensorKind::Power),
            "intrusion" => Some(SensorKind::Intrusion),
            _ => None,
        }
    }

    /// Returns the unit readings of this class are reported in.
    pub fn unit(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "°C",
            SensorKind::Voltage => "V",
            SensorKind::Fan => "RPM",
            SensorKind::Current => "A",
            SensorKind::Power => "W",
            SensorKind::Intrusion => "",
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorKind::Temperature => write!(f, "temperature"),
            SensorKind::Voltage => write!(f, "voltage"),
            SensorKind::Fan => write!(f, "fan"),
            SensorKind::Current => write!(f, "current"),
            SensorKind::Power => write!(f, "power"),
            SensorKind::Intrusion => write!(f, "intrusion"),
        }
    }
}

/// A typed sensor reading.
///
/// New sensor classes may be added, so code outside this crate should keep a
/// wildcard arm when matching.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Sensor {
    Temperature(TemperatureSensor),
    Voltage(VoltageSensor),
    Fan(FanSensor),
    Current(CurrentSensor),
    Power(PowerSensor),
    Intrusion(IntrusionSensor),
}

impl Sensor {
    /// Parses one sensor instance, or returns `None` for an unknown class.
    pub fn parse(prefix: &str, raw: &RawAttributes) -> Result<Option<Self>> {
        let Some(kind) = SensorKind::from_prefix(prefix) else {
            trace!("Ignoring unclassified prefix {}", prefix);
            return Ok(None);
        };

        let sensor = match kind {
            SensorKind::Temperature => Sensor::Temperature(TemperatureSensor::parse(prefix, raw)?),
            SensorKind::Voltage => Sensor::Voltage(VoltageSensor::parse(prefix, raw)?),
            SensorKind::Fan => Sensor::Fan(FanSensor::parse(prefix, raw)?),
            SensorKind::Current => Sensor::Current(CurrentSensor::parse(prefix, raw)?),
            SensorKind::Power => Sensor::Power(PowerSensor::parse(prefix, raw)?),
            SensorKind::Intrusion => Sensor::Intrusion(IntrusionSensor::parse(prefix, raw)),
        };

        Ok(Some(sensor))
    }

    /// Returns the sensor class.
    pub fn kind(&self) -> SensorKind {
        match self {
            Sensor::Temperature(_) => SensorKind::Temperature,
            Sensor::Voltage(_) => SensorKind::Voltage,
            Sensor::Fan(_) => SensorKind::Fan,
            Sensor::Current(_) => SensorKind::Current,
            Sensor::Power(_) => SensorKind::Power,
            Sensor::Intrusion(_) => SensorKind::Intrusion,
        }
    }

    /// Returns the instance prefix the sensor was parsed from, e.g. `temp1`.
    pub fn name(&self) -> &str {
        match self {
            Sensor::Temperature(s) => &s.name,
            Sensor::Voltage(s) => &s.name,
            Sensor::Fan(s) => &s.name,
            Sensor::Current(s) => &s.name,
            Sensor::Power(s) => &s.name,
            Sensor::Intrusion(s) => &s.name,
        }
    }

    /// Returns the human-readable label, if the sensor class has one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Sensor::Temperature(s) => s.label.as_deref(),
            Sensor::Voltage(s) => s.label.as_deref(),
            Sensor::Current(s) => s.label.as_deref(),
            Sensor::Power(s) => s.label.as_deref(),
            Sensor::Fan(_) | Sensor::Intrusion(_) => None,
        }
    }

    /// Returns true if the sensor reports an alarm condition.
    pub fn alarm(&self) -> bool {
        match self {
            Sensor::Temperature(s) => s.alarm || s.critical_alarm,
            Sensor::Voltage(s) => s.alarm,
            Sensor::Fan(s) => s.alarm,
            Sensor::Current(s) => s.alarm,
            Sensor::Power(s) => s.alarm,
            Sensor::Intrusion(s) => s.alarm,
        }
    }
}

/// Parses every classifiable sensor in a raw bag, in prefix order.
///
/// The first malformed numeric attribute aborts parsing.
pub fn parse_sensors(raw: &RawAttributeBag) -> Result<Vec<Sensor>> {
    let mut sensors = Vec::with_capacity(raw.len());
    for (prefix, attributes) in raw {
        if let Some(sensor) = Sensor::parse(prefix, attributes)? {
            sensors.push(sensor);
        }
    }
    Ok(sensors)
}

/// Parses a scaled numeric attribute, e.g. millidegrees into degrees.
pub(crate) fn parse_scaled(
    sensor: &str,
    attribute: &str,
    value: &str,
    divisor: f64,
) -> Result<f64> {
    value
        .parse::<f64>()
        .map(|v| v / divisor)
        .map_err(|_| Error::parse(sensor, attribute, value, "a number"))
}

/// Parses an unscaled unsigned integer attribute.
pub(crate) fn parse_count(sensor: &str, attribute: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| Error::parse(sensor, attribute, value, "an unsigned integer"))
}

/// Decodes an alarm or beep flag: `"0"` is false, anything else is true.
pub(crate) fn parse_flag(value: &str) -> bool {
    value != "0"
}

#[cfg(test)]
pub(crate) fn attributes(pairs: &[(&str, &str)]) -> RawAttributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
