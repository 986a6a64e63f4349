//! Error Types for Bus, Sensor and Reading Failures
//!
//! ## Design Philosophy
//!
//! Nothing in the engine is fatal. Every error here is caught at the cycle
//! boundary and turned into something the rest of the system already
//! understands:
//!
//! | error | becomes |
//! |---|---|
//! | [`BusError`] | every tracked sensor moves to ERROR |
//! | [`ReadError`] | that one sensor moves to ERROR, its metrics are absent |
//! | [`ReadingError`] | that one value is dropped to absent |
//! | [`ConfigError`] | rejected before a monitor is built |
//!
//! Conditions that are *not* errors are modelled as states instead: an
//! unplugged sensor is `SensorState::Missing`, a sensor that stopped
//! producing is `SensorState::Stale`, and a short history yields the
//! "Initial reading" trend diagnosis.
//!
//! ## Memory Layout
//!
//! Errors are `Copy`, carry only `&'static str` reasons and small enums, and
//! never allocate, so they can be returned from bus drivers running in
//! interrupt context.
//!
//! ```rust
//! use airscout_core::errors::ReadError;
//! use airscout_core::sensor::SensorId;
//!
//! let err = ReadError::Crc { sensor: SensorId::Co2 };
//! assert_eq!(err.sensor(), SensorId::Co2);
//! ```

use thiserror_no_std::Error;

use crate::sample::Metric;
use crate::sensor::SensorId;

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Bus-level failure while scanning for devices
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The transport itself failed (bus locked up, controller fault)
    #[error("Bus transport failed: {reason}")]
    Transport {
        /// Controller-provided description
        reason: &'static str,
    },

    /// The scan did not complete in time
    #[error("Bus scan timed out")]
    Timeout,
}

/// Failure acquiring a sample from one sensor
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// I/O failure talking to the device
    #[error("Read from {sensor} failed: {reason}")]
    Io {
        /// Sensor that failed
        sensor: SensorId,
        /// Driver-provided description
        reason: &'static str,
    },

    /// Device answered but the payload checksum did not match
    #[error("Checksum mismatch reading {sensor}")]
    Crc {
        /// Sensor that failed
        sensor: SensorId,
    },

    /// A read was attempted on a sensor the bus has no driver for
    #[error("{sensor} is not attached")]
    NotAttached {
        /// Sensor that was requested
        sensor: SensorId,
    },
}

impl ReadError {
    /// Sensor the failure belongs to
    pub fn sensor(&self) -> SensorId {
        match self {
            Self::Io { sensor, .. } | Self::Crc { sensor } | Self::NotAttached { sensor } => *sensor,
        }
    }
}

/// A single reading that cannot be physically right
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ReadingError {
    /// NaN or infinity
    #[error("{metric} reading is not a finite number")]
    NotFinite {
        /// Metric the value was reported for
        metric: Metric,
    },

    /// Value outside what the sensor can physically report
    #[error("{metric} reading {value} outside [{min}, {max}]")]
    OutOfRange {
        /// Metric the value was reported for
        metric: Metric,
        /// The rejected value
        value: f32,
        /// Lowest plausible value
        min: f32,
        /// Highest plausible value
        max: f32,
    },
}

/// Invalid monitor configuration
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero miss limit would drop sensors before they were ever seen
    #[error("Miss limit must be at least 1")]
    ZeroMissLimit,

    /// A threshold or interval is zero, negative or not a number
    #[error("Invalid configuration value: {name}")]
    InvalidValue {
        name: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for BusError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Transport { reason } => defmt::write!(fmt, "Bus transport: {}", reason),
            Self::Timeout => defmt::write!(fmt, "Bus scan timeout"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReadError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Io { sensor, reason } => defmt::write!(fmt, "{} read: {}", sensor.name(), reason),
            Self::Crc { sensor } => defmt::write!(fmt, "{} crc", sensor.name()),
            Self::NotAttached { sensor } => defmt::write!(fmt, "{} not attached", sensor.name()),
        }
    }
}
