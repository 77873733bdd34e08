//! hwsense
//!
//! Discovers hardware monitoring devices exposed through Linux sysfs (hwmon)
//! and turns their raw text attributes into typed, unit-converted sensor
//! readings.
//!
//! ```no_run
//! use hwsense::{Scanner, Sensor};
//!
//! let devices = Scanner::new().scan()?;
//! for device in &devices {
//!     for sensor in &device.sensors {
//!         match sensor {
//!             Sensor::Temperature(t) => println!("{} {}: {}°C", device.name, t.name, t.current),
//!             other => println!("{} {}", device.name, other.name()),
//!         }
//!     }
//! }
//! # Ok::<(), hwsense::Error>(())
//! ```

pub mod device;
pub mod error;
pub mod fs;
pub mod pattern;
pub mod raw;
pub mod scanner;
pub mod sensors;

pub use device::Device;
pub use error::{Error, Result};
pub use fs::{EntryKind, Filesystem, HostFilesystem, MemoryFilesystem};
pub use raw::RawAttributeBag;
pub use scanner::{scan, Scanner, DEFAULT_PATTERNS};
pub use sensors::{
    parse_sensors, CurrentSensor, FanSensor, IntrusionSensor, PowerSensor, Sensor, SensorKind,
    TemperatureSensor, TemperatureSensorType, VoltageSensor,
};
