//! Core engine for AirScout indoor air quality monitors
//!
//! Turns raw sensor samples into per-sensor availability, a 0–100 health
//! score with an itemised penalty breakdown, a safety alert level and
//! per-metric trend diagnostics.
//!
//! Key constraints:
//! - Runs without an allocator (`heapless` collections, `&'static str` text)
//! - Single-threaded, one cycle runs to completion before the next
//! - Nothing is fatal: bus and read failures become lifecycle states
//!
//! ```no_run
//! use airscout_core::{Monitor, MonitorConfig};
//! # use airscout_core::{errors::{BusError, ReadError}, sensor::{AddressSet, SensorBus, SensorFrame, SensorId}};
//! # struct Bus;
//! # impl SensorBus for Bus {
//! #     fn scan(&mut self) -> Result<AddressSet, BusError> { Ok(AddressSet::empty()) }
//! #     fn acquire(&mut self, _: SensorId) -> Result<Option<SensorFrame>, ReadError> { Ok(None) }
//! # }
//! # let mut bus = Bus;
//!
//! let mut monitor: Monitor = Monitor::new(MonitorConfig::default())?;
//!
//! // Called every poll interval
//! let report = monitor.run_cycle(&mut bus, 1_500);
//! println!("{} {}/100", report.evaluation.alert, report.evaluation.score);
//! # Ok::<(), airscout_core::errors::ConfigError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod advice;
pub mod buffer;
pub mod config;
pub mod constants;
pub mod errors;
pub mod history;
pub mod lifecycle;
pub mod monitor;
pub mod sample;
pub mod scoring;
pub mod sensor;
pub mod severity;
pub mod summary;
pub mod time;
pub mod trend;
pub mod validation;
pub mod voc;

// Public API
pub use config::MonitorConfig;
pub use errors::{BusError, ConfigError, ConfigResult, ReadError, ReadingError};
pub use history::HistoryStore;
pub use lifecycle::{OverallStatus, SensorManager, SensorState, SensorStatus};
pub use monitor::{CycleReport, Monitor};
pub use sample::{Metric, MetricSample, MetricSet};
pub use scoring::{evaluate, AlertLevel, BreakdownEntry, Evaluation, ScoreBreakdown};
pub use sensor::{AddressSet, SensorBus, SensorFrame, SensorId};
pub use trend::{diagnose, Confidence, TrendDiagnosis};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
