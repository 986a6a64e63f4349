//! Window Sizes and Collection Capacities
//!
//! This module defines the sizes of every fixed-capacity structure in the
//! engine. Nothing in the hot path allocates, so these numbers are the whole
//! memory budget of a running monitor.

// ===== ROLLING HISTORY =====

/// Number of accepted readings kept per metric.
///
/// At the reference 1.5 s polling cadence this is roughly one minute of data:
/// - 40 samples × 4 bytes = 160 bytes per metric
/// - Six metrics ≈ 1 KB including slot tags
///
/// Source: product behaviour of the handheld survey unit
pub const HISTORY_CAPACITY: usize = 40;

/// Number of past scores kept for the score trend display.
pub const SCORE_HISTORY_CAPACITY: usize = 40;

// ===== TREND ANALYSIS WINDOWS =====

/// Minimum history length before any trend can be classified.
///
/// Below this the analyzer always reports "Initial reading" with low
/// confidence, whatever the current value is.
pub const TREND_MIN_SAMPLES: usize = 5;

/// History length at which trend confidence becomes High.
pub const TREND_HIGH_CONFIDENCE_SAMPLES: usize = 20;

/// Number of most recent samples inspected for "recently elevated".
pub const TREND_RECENT_WINDOW: usize = 5;

// ===== RECOMMENDATION LISTS =====

/// Maximum recommendations attached to a single trend diagnosis.
pub const MAX_TREND_RECOMMENDATIONS: usize = 3;

/// Maximum recommendations produced by one evaluation plus merged advice.
///
/// Worst case today: 5 scoring messages + 5 pattern advisories + 1 PM2.5
/// analysis message. Rounded up to leave room for new rules.
pub const MAX_RECOMMENDATIONS: usize = 16;

/// Maximum pattern advisories from the advice aggregator.
pub const MAX_ADVICE: usize = 8;

/// Suggestions shown in the context summary.
pub const SUMMARY_SUGGESTIONS: usize = 3;

/// Drivers named in the context summary.
pub const SUMMARY_DRIVERS: usize = 2;
