//! Temperature sensors (`temp*`).

use super::{parse_count, parse_flag, parse_scaled};
use crate::raw::RawAttributes;
use crate::Result;
use serde::Serialize;

/// Raw temperatures are reported in millidegrees Celsius.
const MILLIDEGREES: f64 = 1000.0;

/// Sensor technology reported by a `temp*_type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureSensorType {
    /// Type not reported, or a code this crate does not know.
    #[default]
    Unknown,
    /// CPU embedded diode (code 1).
    CpuDiode,
    /// 3904 transistor (code 2).
    Transistor3904,
    /// Thermal diode (code 3).
    ThermalDiode,
    /// Thermistor (code 4).
    Thermistor,
    /// AMD AMDSI (code 5).
    AmdAmdsi,
    /// Intel PECI (code 6).
    IntelPeci,
}

impl TemperatureSensorType {
    /// Decodes a hwmon `temp*_type` code.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => TemperatureSensorType::CpuDiode,
            2 => TemperatureSensorType::Transistor3904,
            3 => TemperatureSensorType::ThermalDiode,
            4 => TemperatureSensorType::Thermistor,
            5 => TemperatureSensorType::AmdAmdsi,
            6 => TemperatureSensorType::IntelPeci,
            _ => TemperatureSensorType::Unknown,
        }
    }
}

impl std::fmt::Display for TemperatureSensorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemperatureSensorType::Unknown => write!(f, "unknown"),
            TemperatureSensorType::CpuDiode => write!(f, "CPU diode"),
            TemperatureSensorType::Transistor3904 => write!(f, "3904 transistor"),
            TemperatureSensorType::ThermalDiode => write!(f, "thermal diode"),
            TemperatureSensorType::Thermistor => write!(f, "thermistor"),
            TemperatureSensorType::AmdAmdsi => write!(f, "AMD AMDSI"),
            TemperatureSensorType::IntelPeci => write!(f, "Intel PECI"),
        }
    }
}

/// A sensor that measures temperature in degrees Celsius.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TemperatureSensor {
    /// Instance prefix, e.g. `temp1`.
    pub name: String,
    /// What the sensor is monitoring, e.g. `Core 0`.
    pub label: Option<String>,
    /// Current temperature.
    pub current: f64,
    /// High threshold.
    pub high: f64,
    /// Critical threshold.
    pub critical: f64,
    /// Whether the temperature is past the critical threshold.
    pub critical_alarm: bool,
    /// Whether the temperature is outside its limits.
    pub alarm: bool,
    /// Whether the chip beeps on an alarm.
    pub beep: bool,
    /// Sensing technology, from the `type` attribute.
    pub sensor_type: TemperatureSensorType,
}

impl TemperatureSensor {
    pub(crate) fn parse(name: &str, raw: &RawAttributes) -> Result<Self> {
        let mut sensor = Self {
            name: name.to_string(),
            ..Self::default()
        };

        for (attribute, value) in raw {
            match attribute.as_str() {
                "input" => sensor.current = parse_scaled(name, attribute, value, MILLIDEGREES)?,
                "max" => sensor.high = parse_scaled(name, attribute, value, MILLIDEGREES)?,
                "crit" => sensor.critical = parse_scaled(name, attribute, value, MILLIDEGREES)?,
                "crit_alarm" => sensor.critical_alarm = parse_flag(value),
                "alarm" => sensor.alarm = parse_flag(value),
                "beep" => sensor.beep = parse_flag(value),
                "label" => sensor.label = Some(value.clone()),
                "type" => {
                    sensor.sensor_type =
                        TemperatureSensorType::from_code(parse_count(name, attribute, value)?)
                }
                _ => {}
            }
        }

        Ok(sensor)
    }
}
