//! Text and JSON rendering of scan results.

use anyhow::{Context, Result};
use hwsense::{Device, Sensor, TemperatureSensorType};
use serde::{Deserialize, Serialize};

/// Output format for scan results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Renders a device list in the requested format.
pub fn render(devices: &[Device], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(devices.iter().map(format_device).collect()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(devices).context("Failed to serialize devices")
        }
    }
}

/// Formats a device header followed by one indented line per sensor.
pub fn format_device(device: &Device) -> String {
    let name = if device.name.is_empty() {
        "(unnamed)"
    } else {
        device.name.as_str()
    };

    let mut out = format!("{} ({})\n", name, device.path.display());
    if device.sensors.is_empty() {
        out.push_str("  (no sensors)\n");
    }
    for sensor in &device.sensors {
        out.push_str("  ");
        out.push_str(&format_sensor(sensor));
        out.push('\n');
    }
    out
}

/// Formats one sensor reading on a single line.
pub fn format_sensor(sensor: &Sensor) -> String {
    let title = match sensor.label() {
        Some(label) => format!("{} ({})", sensor.name(), label),
        None => sensor.name().to_string(),
    };

    let mut line = match sensor {
        Sensor::Temperature(s) => {
            let mut line = format!(
                "{}: {:.1}°C{}",
                title,
                s.current,
                limits(&[("high", s.high), ("crit", s.critical)], "°C", 1)
            );
            if s.sensor_type != TemperatureSensorType::Unknown {
                line.push_str(&format!(" [{}]", s.sensor_type));
            }
            if s.critical_alarm {
                line.push_str(" CRIT");
            }
            line
        }
        Sensor::Voltage(s) => format!(
            "{}: {:.3} V{}",
            title,
            s.current,
            limits(&[("max", s.maximum)], " V", 3)
        ),
        Sensor::Fan(s) => {
            let min = if s.minimum > 0 {
                format!(" (min {} RPM)", s.minimum)
            } else {
                String::new()
            };
            format!("{}: {} RPM{}", title, s.current, min)
        }
        Sensor::Current(s) => format!(
            "{}: {:.3} A{}",
            title,
            s.current,
            limits(&[("max", s.maximum)], " A", 3)
        ),
        Sensor::Power(s) => format!(
            "{}: {:.2} W{}",
            title,
            s.current,
            limits(&[("avg", s.average), ("max", s.maximum)], " W", 2)
        ),
        Sensor::Intrusion(s) => {
            return format!("{}: {}", title, if s.alarm { "ALARM" } else { "ok" });
        }
        _ => return format!("{}: unsupported sensor", title),
    };

    if sensor.alarm() {
        line.push_str(" ALARM");
    }
    if beeps(sensor) {
        line.push_str(" (beep)");
    }
    line
}

fn beeps(sensor: &Sensor) -> bool {
    match sensor {
        Sensor::Temperature(s) => s.beep,
        Sensor::Voltage(s) => s.beep,
        Sensor::Fan(s) => s.beep,
        Sensor::Current(s) => s.beep,
        Sensor::Power(s) => s.beep,
        _ => false,
    }
}

/// Formats non-zero thresholds as ` (high 80.0°C, crit 100.0°C)`.
fn limits(values: &[(&str, f64)], unit: &str, precision: usize) -> String {
    let parts: Vec<String> = values
        .iter()
        .filter(|(_, value)| *value != 0.0)
        .map(|(label, value)| format!("{} {:.*}{}", label, precision, value, unit))
        .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}
