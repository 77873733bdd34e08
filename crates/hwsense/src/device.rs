//! Discovered hardware monitoring devices.

use crate::sensors::Sensor;
use serde::Serialize;
use std::path::PathBuf;

/// One hardware monitoring device and the sensors it exposes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Device {
    /// Contents of the device's `name` file; empty if it had none.
    pub name: String,
    /// Root directory the device was scanned from.
    pub path: PathBuf,
    /// Sensors ordered by instance prefix.
    pub sensors: Vec<Sensor>,
}

impl Device {
    /// Returns the sensor with the given instance prefix.
    pub fn sensor(&self, name: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|sensor| sensor.name() == name)
    }
}
