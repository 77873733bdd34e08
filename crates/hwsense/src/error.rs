//! Error types for the hwsense library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scanning for devices.
#[derive(Error, Debug)]
pub enum Error {
    /// A discovery pattern could not be parsed.
    #[error("Invalid path pattern {pattern:?}: {reason}")]
    Pattern {
        pattern: String,
        reason: &'static str,
    },

    /// A device root directory could not be opened for walking.
    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An attribute file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An attribute held a value that is not a valid number.
    #[error("Invalid value {value:?} for {sensor}_{attribute} (expected {expected})")]
    Parse {
        sensor: String,
        attribute: String,
        value: String,
        expected: &'static str,
    },
}

impl Error {
    pub(crate) fn pattern(pattern: &str, reason: &'static str) -> Self {
        Error::Pattern {
            pattern: pattern.to_string(),
            reason,
        }
    }

    pub(crate) fn parse(
        sensor: &str,
        attribute: &str,
        value: &str,
        expected: &'static str,
    ) -> Self {
        Error::Parse {
            sensor: sensor.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}
