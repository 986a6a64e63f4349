//! Time-Related Constants
//!
//! This module defines intervals and durations used by the cycle driver and
//! the sensor lifecycle tracker. All durations are in milliseconds to match
//! [`crate::time::Timestamp`].

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

// ===== POLLING =====

/// Default polling cycle interval (milliseconds).
///
/// One full pass (scan, acquire, lifecycle update, history append, scoring,
/// advice) runs every 1.5 s.
///
/// Source: reference handheld unit refresh rate
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1500;

// ===== SENSOR WARM-UP =====

/// Warm-up period for the CO₂ sensor (milliseconds).
///
/// Photoacoustic NDIR sensors produce their first periodic measurement
/// after ~5 s; 10 s leaves margin for the first valid sample.
///
/// Source: Sensirion SCD4x datasheet (periodic measurement interval 5 s)
pub const CO2_WARMUP_MS: u64 = 10 * MS_PER_SECOND;

/// Warm-up period for the combined climate/gas sensor (milliseconds).
///
/// The MOx gas plate needs time to reach a stable resistance before the
/// VOC proxy means anything.
///
/// Source: Bosch BME688 datasheet (gas sensor burn-in)
pub const CLIMATE_WARMUP_MS: u64 = 60 * MS_PER_SECOND;

/// Warm-up period for the particulate sensor (milliseconds).
///
/// Laser scattering sensors need the fan to reach steady airflow.
///
/// Source: Plantower PMSA003I datasheet (30 s stable data)
pub const PM25_WARMUP_MS: u64 = 30 * MS_PER_SECOND;

/// Warm-up period for the electrochemical CO sensor (milliseconds).
pub const CO_WARMUP_MS: u64 = 60 * MS_PER_SECOND;
