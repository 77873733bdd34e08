//! Device discovery and scanning.
//!
//! A scan expands the discovery patterns into `name` files, walks the
//! directory holding each one, gathers `prefix_suffix` attribute files into a
//! [`RawAttributeBag`] and parses that into typed sensors.

use crate::device::Device;
use crate::fs::{EntryKind, Filesystem, HostFilesystem};
use crate::raw::{split_attribute, RawAttributeBag};
use crate::sensors::parse_sensors;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Locations where hwmon devices live in Linux sysfs.
pub const DEFAULT_PATTERNS: &[&str] = &[
    "/sys/devices/platform/*/name",
    "/sys/devices/platform/*/hwmon/hwmon*/name",
    "/sys/devices/virtual/hwmon/*/name",
];

/// Control files that never hold sensor data. Reading some of them is slow or
/// has side effects.
const SKIPPED_FILES: &[&str] = &[
    "async",
    "autosuspend_delay_ms",
    "control",
    "driver_override",
    "modalias",
    "uevent",
];

/// Returns true if a file should not be read during the walk.
pub fn should_skip(file_name: &str) -> bool {
    file_name.starts_with("runtime_") || SKIPPED_FILES.contains(&file_name)
}

/// Scans a filesystem for hardware monitoring devices.
#[derive(Debug, Clone)]
pub struct Scanner<F = HostFilesystem> {
    fs: F,
    patterns: Vec<String>,
    skip_inaccessible: bool,
}

impl Scanner<HostFilesystem> {
    /// Creates a scanner over the host filesystem with the default patterns.
    pub fn new() -> Self {
        Self::with_filesystem(HostFilesystem::new())
    }
}

impl Default for Scanner<HostFilesystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Filesystem> Scanner<F> {
    /// Creates a scanner over any filesystem with the default patterns.
    pub fn with_filesystem(fs: F) -> Self {
        Self {
            fs,
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            skip_inaccessible: false,
        }
    }

    /// Replaces the discovery patterns.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Skips devices whose root cannot be walked instead of failing the scan.
    pub fn skip_inaccessible(mut self, skip: bool) -> Self {
        self.skip_inaccessible = skip;
        self
    }

    /// Returns the discovery patterns.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Expands every pattern, keeping pattern order then match order.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for pattern in &self.patterns {
            let matches = self.fs.expand(pattern)?;
            trace!("Pattern {} matched {} paths", pattern, matches.len());
            paths.extend(matches);
        }
        Ok(paths)
    }

    /// Scans every discovered device.
    ///
    /// The first error aborts the scan, except for unwalkable device roots
    /// when [`Scanner::skip_inaccessible`] is set.
    pub fn scan(&self) -> Result<Vec<Device>> {
        let paths = self.discover()?;

        let mut devices = Vec::with_capacity(paths.len());
        for path in &paths {
            let root = path.parent().unwrap_or(path.as_path());
            match self.scan_device(root) {
                Ok(device) => devices.push(device),
                Err(Error::Walk { path, source }) if self.skip_inaccessible => {
                    warn!("Skipping inaccessible device {}: {}", path.display(), source);
                }
                Err(e) => return Err(e),
            }
        }

        debug!("Scanned {} devices", devices.len());
        Ok(devices)
    }

    /// Scans the device rooted at `root`.
    pub fn scan_device(&self, root: &Path) -> Result<Device> {
        let (name, raw) = self.read_device(root)?;
        let sensors = parse_sensors(&raw)?;
        debug!(
            "Device {:?} at {} has {} sensors",
            name,
            root.display(),
            sensors.len()
        );

        Ok(Device {
            name,
            path: root.to_path_buf(),
            sensors,
        })
    }

    /// Walks `root` and collects the device name and raw attributes.
    fn read_device(&self, root: &Path) -> Result<(String, RawAttributeBag)> {
        let mut name = String::new();
        let mut raw = RawAttributeBag::new();

        let mut visit = |path: &Path, kind: EntryKind| {
            if kind != EntryKind::File {
                return;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                return;
            };
            if should_skip(file_name) {
                trace!("Skipping control file {}", path.display());
                return;
            }

            let attribute = if file_name == "name" {
                None
            } else {
                match split_attribute(file_name) {
                    Some(attribute) => Some(attribute),
                    None => return,
                }
            };

            let value = match self.fs.read_text(path) {
                Ok(value) => value,
                Err(e) => {
                    debug!("Ignoring unreadable attribute: {}", e);
                    return;
                }
            };

            match attribute {
                Some((prefix, suffix)) => raw.insert(prefix, suffix, value),
                None => name = value,
            }
        };
        self.fs.walk(root, &mut visit)?;

        Ok((name, raw))
    }
}

/// Scans the host for devices using the default patterns.
pub fn scan() -> Result<Vec<Device>> {
    Scanner::new().scan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFilesystem;
    use crate::sensors::{FanSensor, IntrusionSensor, Sensor, TemperatureSensor};

    const CORETEMP: &str = "/sys/devices/platform/coretemp.0";

    fn coretemp() -> MemoryFilesystem {
        MemoryFilesystem::new()
            .file(format!("{CORETEMP}/name"), "coretemp\n")
            .file(format!("{CORETEMP}/temp1_input"), "40000\n")
            .file(format!("{CORETEMP}/temp1_label"), "Core 0\n")
            .file(format!("{CORETEMP}/temp1_max"), "80000\n")
            .file(format!("{CORETEMP}/temp1_crit"), "100000\n")
            .file(format!("{CORETEMP}/temp1_crit_alarm"), "0\n")
    }

    #[test]
    fn test_should_skip() {
        assert!(should_skip("runtime_status"));
        assert!(should_skip("runtime_active_time"));
        assert!(should_skip("uevent"));
        assert!(should_skip("driver_override"));
        assert!(should_skip("autosuspend_delay_ms"));
        assert!(!should_skip("temp1_input"));
        assert!(!should_skip("name"));
        assert!(!should_skip("runtime"));
    }

    #[test]
    fn test_scan_coretemp() {
        let devices = Scanner::with_filesystem(coretemp()).scan().unwrap();

        assert_eq!(
            devices,
            vec![Device {
                name: "coretemp".to_string(),
                path: PathBuf::from(CORETEMP),
                sensors: vec![Sensor::Temperature(TemperatureSensor {
                    name: "temp1".to_string(),
                    label: Some("Core 0".to_string()),
                    current: 40.0,
                    high: 80.0,
                    critical: 100.0,
                    critical_alarm: false,
                    ..TemperatureSensor::default()
                })],
            }]
        );
    }

    #[test]
    fn test_scan_intrusion_and_fan() {
        let fs = MemoryFilesystem::new()
            .file("/sys/devices/platform/it87.656/name", "it8728")
            .file("/sys/devices/platform/it87.656/intrusion0_alarm", "1")
            .file("/sys/devices/platform/it87.656/fan1_input", "1010")
            .file("/sys/devices/platform/it87.656/fan1_min", "10")
            .file("/sys/devices/platform/it87.656/fan1_beep", "1")
            .file("/sys/devices/platform/it87.656/fan1_alarm", "0");

        let devices = Scanner::with_filesystem(fs).scan().unwrap();
        assert_eq!(devices.len(), 1);

        let device = &devices[0];
        assert_eq!(device.name, "it8728");
        assert_eq!(
            device.sensor("intrusion0"),
            Some(&Sensor::Intrusion(IntrusionSensor {
                name: "intrusion0".to_string(),
                alarm: true,
            }))
        );
        assert_eq!(
            device.sensor("fan1"),
            Some(&Sensor::Fan(FanSensor {
                name: "fan1".to_string(),
                current: 1010,
                minimum: 10,
                alarm: false,
                beep: true,
            }))
        );
    }

    #[test]
    fn test_name_only_device() {
        let fs = MemoryFilesystem::new().file("/sys/devices/virtual/hwmon/hwmon0/name", "acpitz");

        let devices = Scanner::with_filesystem(fs).scan().unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, "acpitz");
        assert_eq!(devices[0].path, PathBuf::from("/sys/devices/virtual/hwmon/hwmon0"));
        assert!(devices[0].sensors.is_empty());
    }

    #[test]
    fn test_scan_device_without_name() {
        let root = "/sys/devices/virtual/hwmon/hwmon3";
        let fs = MemoryFilesystem::new().dir(root);

        let device = Scanner::with_filesystem(fs)
            .scan_device(Path::new(root))
            .unwrap();
        assert_eq!(device.name, "");
        assert_eq!(device.path, PathBuf::from(root));
        assert!(device.sensors.is_empty());
    }

    #[test]
    fn test_skipped_and_unshaped_files_stay_out_of_bag() {
        let fs = coretemp()
            .file(format!("{CORETEMP}/uevent"), "DRIVER=coretemp")
            .file(format!("{CORETEMP}/modalias"), "platform:coretemp")
            .file(format!("{CORETEMP}/driver_override"), "(null)")
            .file(format!("{CORETEMP}/autosuspend_delay_ms"), "100")
            .file(format!("{CORETEMP}/runtime_status"), "unsupported")
            .file(format!("{CORETEMP}/power/runtime_enabled"), "disabled")
            .file(format!("{CORETEMP}/power/control"), "auto")
            .file(format!("{CORETEMP}/temp1"), "stray");

        let scanner = Scanner::with_filesystem(fs);
        let (name, raw) = scanner.read_device(Path::new(CORETEMP)).unwrap();

        assert_eq!(name, "coretemp");
        let prefixes: Vec<&str> = raw.iter().map(|(prefix, _)| prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["temp1"]);
        assert_eq!(raw.get("temp1").unwrap().len(), 5);
    }

    #[test]
    fn test_unknown_prefixes_are_ignored() {
        let fs = coretemp()
            .file(format!("{CORETEMP}/pwm1_enable"), "2")
            .file(format!("{CORETEMP}/energy1_input"), "not a number");

        let devices = Scanner::with_filesystem(fs).scan().unwrap();
        assert_eq!(devices[0].sensors.len(), 1);
        assert_eq!(devices[0].sensors[0].name(), "temp1");
    }

    #[test]
    fn test_unreadable_and_special_files_are_absent() {
        let fs = coretemp()
            .unreadable(format!("{CORETEMP}/temp2_input"))
            .file(format!("{CORETEMP}/temp2_label"), "Core 1")
            .unreadable(format!("{CORETEMP}/temp1_crit"))
            .special(format!("{CORETEMP}/temp3_input"));

        let devices = Scanner::with_filesystem(fs).scan().unwrap();
        let device = &devices[0];
        assert_eq!(device.sensors.len(), 2);

        match device.sensor("temp1") {
            Some(Sensor::Temperature(sensor)) => {
                assert_eq!(sensor.current, 40.0);
                assert_eq!(sensor.critical, 0.0);
            }
            other => panic!("unexpected sensor: {:?}", other),
        }
        match device.sensor("temp2") {
            Some(Sensor::Temperature(sensor)) => {
                assert_eq!(sensor.label.as_deref(), Some("Core 1"));
                assert_eq!(sensor.current, 0.0);
            }
            other => panic!("unexpected sensor: {:?}", other),
        }
        assert!(device.sensor("temp3").is_none());
    }

    #[test]
    fn test_malformed_value_fails_scan() {
        let fs = coretemp()
            .file("/sys/devices/virtual/hwmon/hwmon0/name", "acpitz")
            .file(format!("{CORETEMP}/temp2_input"), "abc");

        let result = Scanner::with_filesystem(fs).scan();
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_sensors_sorted_by_prefix() {
        let fs = coretemp()
            .file(format!("{CORETEMP}/temp3_input"), "43000")
            .file(format!("{CORETEMP}/in0_input"), "1200")
            .file(format!("{CORETEMP}/temp2_input"), "42000");

        let devices = Scanner::with_filesystem(fs).scan().unwrap();
        let names: Vec<&str> = devices[0].sensors.iter().map(Sensor::name).collect();
        assert_eq!(names, vec!["in0", "temp1", "temp2", "temp3"]);
    }

    #[test]
    fn test_discover_keeps_pattern_order() {
        let fs = MemoryFilesystem::new()
            .file("/sys/devices/virtual/hwmon/hwmon0/name", "acpitz")
            .file("/sys/devices/platform/nct6775.656/hwmon/hwmon3/name", "nct6798")
            .file("/sys/devices/platform/it87.656/name", "it8728")
            .file("/sys/devices/platform/coretemp.0/name", "coretemp");

        let paths = Scanner::with_filesystem(fs).discover().unwrap();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/sys/devices/platform/coretemp.0/name"),
                PathBuf::from("/sys/devices/platform/it87.656/name"),
                PathBuf::from("/sys/devices/platform/nct6775.656/hwmon/hwmon3/name"),
                PathBuf::from("/sys/devices/virtual/hwmon/hwmon0/name"),
            ]
        );
    }

    #[test]
    fn test_custom_patterns() {
        let fs = coretemp().file("/sys/class/hwmon/hwmon1/name", "nvme");

        let scanner = Scanner::with_filesystem(fs).with_patterns(["/sys/class/hwmon/*/name"]);
        assert_eq!(scanner.patterns(), ["/sys/class/hwmon/*/name".to_string()]);

        let devices = scanner.scan().unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, "nvme");
    }

    #[test]
    fn test_malformed_pattern_fails_scan() {
        let scanner = Scanner::with_filesystem(coretemp())
            .with_patterns(["/sys/devices/platform/*/name", "sys/**/name"]);
        assert!(matches!(scanner.scan(), Err(Error::Pattern { .. })));
    }

    #[test]
    fn test_inaccessible_root() {
        let broken = "/sys/devices/virtual/hwmon/hwmon9";
        let fs = coretemp()
            .file(format!("{broken}/name"), "broken")
            .special(broken);

        let scanner = Scanner::with_filesystem(&fs);
        assert!(matches!(scanner.scan(), Err(Error::Walk { .. })));

        let devices = Scanner::with_filesystem(&fs)
            .skip_inaccessible(true)
            .scan()
            .unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, "coretemp");
    }

    #[test]
    fn test_scan_host_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("platform/nct6775.656");
        std::fs::create_dir_all(root.join("power")).unwrap();
        std::fs::write(root.join("name"), "nct6798\n").unwrap();
        std::fs::write(root.join("in0_input"), "1032\n").unwrap();
        std::fs::write(root.join("in0_max"), "1744\n").unwrap();
        std::fs::write(root.join("fan2_input"), "734\n").unwrap();
        std::fs::write(root.join("uevent"), "DRIVER=nct6775\n").unwrap();
        std::fs::write(root.join("power/runtime_status"), "unsupported\n").unwrap();

        let pattern = format!("{}/platform/*/name", tmp.path().display());
        let devices = Scanner::new().with_patterns([pattern]).scan().unwrap();

        assert_eq!(devices.len(), 1);
        let device = &devices[0];
        assert_eq!(device.name, "nct6798");
        assert_eq!(device.path, root);

        let names: Vec<&str> = device.sensors.iter().map(Sensor::name).collect();
        assert_eq!(names, vec!["fan2", "in0"]);
        match device.sensor("in0") {
            Some(Sensor::Voltage(sensor)) => {
                assert_eq!(sensor.current, 1.032);
                assert_eq!(sensor.maximum, 1.744);
            }
            other => panic!("unexpected sensor: {:?}", other),
        }
    }

    #[test]
    fn test_scan_host_nested_hwmon_name() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("platform/nct6775.656");
        std::fs::create_dir_all(root.join("hwmon/hwmon2")).unwrap();
        std::fs::write(root.join("name"), "nct6775\n").unwrap();
        std::fs::write(root.join("hwmon/hwmon2/name"), "nct6798\n").unwrap();
        std::fs::write(root.join("hwmon/hwmon2/temp1_input"), "38000\n").unwrap();

        let pattern = format!("{}/platform/*/name", tmp.path().display());
        let devices = Scanner::new().with_patterns([pattern]).scan().unwrap();

        assert_eq!(devices.len(), 1);
        let device = &devices[0];
        // `name` sorts after `hwmon`, so the parent's name is read last.
        assert_eq!(device.name, "nct6775");
        match device.sensor("temp1") {
            Some(Sensor::Temperature(sensor)) => assert_eq!(sensor.current, 38.0),
            other => panic!("unexpected sensor: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_host_symlinked_root() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("devices/platform/coretemp.0/hwmon/hwmon1");
        let class = tmp.path().join("class/hwmon");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::create_dir_all(&class).unwrap();
        std::fs::write(target.join("name"), "coretemp\n").unwrap();
        std::fs::write(target.join("temp1_input"), "40000\n").unwrap();
        std::os::unix::fs::symlink(&target, class.join("hwmon1")).unwrap();

        let pattern = format!("{}/class/hwmon/*/name", tmp.path().display());
        let devices = Scanner::new().with_patterns([pattern]).scan().unwrap();

        assert_eq!(devices.len(), 1);
        let device = &devices[0];
        assert_eq!(device.name, "coretemp");
        assert_eq!(device.path, class.join("hwmon1"));
        match device.sensor("temp1") {
            Some(Sensor::Temperature(sensor)) => assert_eq!(sensor.current, 40.0),
            other => panic!("unexpected sensor: {:?}", other),
        }
    }
}
