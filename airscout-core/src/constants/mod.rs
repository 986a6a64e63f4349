//! Constants for AirScout Core
//!
//! This module provides centralized constants used throughout the engine.
//! Every threshold, window size and timing value lives here so that the rule
//! code reads as rules, not as magic numbers.
//!
//! ## Organization
//!
//! - **Thresholds**: air quality breakpoints, penalties and score limits
//! - **Sensors**: bus addresses, presence debounce and plausible ranges
//! - **Time**: polling cadence and warm-up periods
//! - **Buffers**: rolling window sizes and collection capacities
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Reference the exposure guideline or datasheet a value comes from
//! 3. Use descriptive names that include units

/// Air quality breakpoints, penalties and score limits.
pub mod thresholds;

/// Sensor bus addresses, presence debounce and plausible reading ranges.
pub mod sensors;

/// Polling cadence and sensor warm-up periods.
pub mod time;

/// Rolling window sizes and collection capacities.
pub mod buffers;

// Re-export commonly used constants for convenience
pub use thresholds::{
    CO_DANGER_PPM, CO_ELEVATED_PPM, CO2_ELEVATED_PPM, PM25_ELEVATED_UGM3,
    VOC_ELEVATED_INDEX, CRITICAL_SCORE_CAP,
};

pub use sensors::MISS_LIMIT;

pub use time::{DEFAULT_POLL_INTERVAL_MS, CO2_WARMUP_MS, CLIMATE_WARMUP_MS};

pub use buffers::{HISTORY_CAPACITY, TREND_MIN_SAMPLES, TREND_HIGH_CONFIDENCE_SAMPLES};
