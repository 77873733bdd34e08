//! Raw attribute bags gathered during the tree walk.

use std::collections::btree_map;
use std::collections::BTreeMap;

/// Attribute suffix to trimmed raw value, for one sensor instance.
pub type RawAttributes = BTreeMap<String, String>;

/// Raw attributes of one device, keyed by sensor instance prefix.
///
/// Iteration is ordered by prefix. Every stored prefix has at least one
/// attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAttributeBag {
    sensors: BTreeMap<String, RawAttributes>,
}

impl RawAttributeBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` at `raw[prefix][suffix]`, replacing any earlier value.
    pub fn insert(&mut self, prefix: &str, suffix: &str, value: impl Into<String>) {
        self.sensors
            .entry(prefix.to_string())
            .or_default()
            .insert(suffix.to_string(), value.into());
    }

    /// Returns the attributes stored for one prefix.
    pub fn get(&self, prefix: &str) -> Option<&RawAttributes> {
        self.sensors.get(prefix)
    }

    /// Iterates prefixes and their attributes in prefix order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, RawAttributes> {
        self.sensors.iter()
    }

    /// Returns the number of sensor instances.
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// Returns true if no attribute was stored.
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

impl<'a> IntoIterator for &'a RawAttributeBag {
    type Item = (&'a String, &'a RawAttributes);
    type IntoIter = btree_map::Iter<'a, String, RawAttributes>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Splits an attribute file name on its first underscore.
///
/// `temp1_crit_alarm` becomes `("temp1", "crit_alarm")`. Names without an
/// underscore, or with an empty half, do not belong to a sensor instance.
pub fn split_attribute(file_name: &str) -> Option<(&str, &str)> {
    match file_name.split_once('_') {
        Some((prefix, suffix)) if !prefix.is_empty() && !suffix.is_empty() => {
            Some((prefix, suffix))
        }
        _ => None,
    }
}
