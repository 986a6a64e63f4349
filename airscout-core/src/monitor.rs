//! Polling Cycle Driver
//!
//! ## Overview
//!
//! [`Monitor`] owns all state that survives between cycles: the sensor
//! lifecycle machine, the rolling history and the score history. Everything
//! else is recomputed each cycle and returned in a [`CycleReport`].
//!
//! ## One Cycle
//!
//! ```text
//! bus.scan() ──► lifecycle (attach / debounce / ERROR)
//!      │
//!      ▼
//! bus.acquire(sensor) for each attached, present sensor
//!      │            (others surface their last good frame while installed)
//!      ▼
//! MetricSample ──► plausibility ──► history append
//!                                       │
//!               ┌───────────────────────┼───────────────────────┐
//!               ▼                       ▼                       ▼
//!            evaluate               aggregate               summary
//!      (score, breakdown,        (pattern advice,        (headline,
//!       alert level)              merged unique)          drivers)
//! ```
//!
//! A bus transport error is not fatal: every sensor goes to ERROR, nothing
//! is read, and scoring still runs with no installed metrics (score 100,
//! empty breakdown). The history is left untouched.
//!
//! ## Ownership
//!
//! The monitor is single-threaded and runs each cycle to completion. Only
//! the cycle driver appends to the history, at most once per cycle.
//!
//! ```rust
//! use airscout_core::errors::{BusError, ReadError};
//! use airscout_core::monitor::Monitor;
//! use airscout_core::scoring::AlertLevel;
//! use airscout_core::sensor::{AddressSet, SensorBus, SensorFrame, SensorId};
//!
//! struct OnlyCo2;
//!
//! impl SensorBus for OnlyCo2 {
//!     fn scan(&mut self) -> Result<AddressSet, BusError> {
//!         Ok(AddressSet::from_slice(&[0x62]))
//!     }
//!     fn acquire(&mut self, sensor: SensorId) -> Result<Option<SensorFrame>, ReadError> {
//!         Ok(Some(SensorFrame::Co2 { ppm: 640.0 }))
//!     }
//! }
//!
//! let mut monitor: Monitor = Monitor::default();
//! let report = monitor.run_cycle(&mut OnlyCo2, 0);
//! assert_eq!(report.sample.co2, Some(640.0));
//! assert_eq!(report.evaluation.alert, AlertLevel::Normal);
//! ```

use crate::{
    advice::{aggregate, merge_unique, Advice},
    buffer::CircularBuffer,
    config::MonitorConfig,
    constants::buffers::{HISTORY_CAPACITY, SCORE_HISTORY_CAPACITY},
    errors::ConfigResult,
    history::HistoryStore,
    lifecycle::{Acquired, OverallStatus, SensorManager, SensorState, SensorStatus},
    sample::{Metric, MetricSample, MetricSet},
    scoring::{evaluate_with_co_danger, AlertLevel, Evaluation},
    sensor::{SensorBus, SensorFrame, SensorId},
    summary::ContextSummary,
    time::Timestamp,
    trend::{self, diagnose_with_co_danger, TrendDiagnosis},
    validation::sanitize,
};

/// Everything a cycle produced
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CycleReport {
    /// Cycle number, starting at 1
    pub cycle: u64,
    /// `now` as passed to the cycle
    pub timestamp: Timestamp,
    /// Accepted readings
    pub sample: MetricSample,
    /// Per-sensor state in [`SensorId::ALL`] order
    pub sensors: [SensorStatus; 4],
    /// Readiness of the sensor set
    pub overall: OverallStatus,
    /// Score, breakdown and alert
    pub evaluation: Evaluation,
    /// Pattern advice, already merged into the evaluation's recommendations
    pub advice: Advice,
    /// Headline and top drivers
    pub summary: ContextSummary,
    /// A fresh CO reading reached the danger threshold
    pub co_danger: bool,
}

/// Cycle driver owning lifecycle, history and score history
#[derive(Debug, Clone)]
pub struct Monitor<const N: usize = HISTORY_CAPACITY> {
    config: MonitorConfig,
    sensors: SensorManager,
    history: HistoryStore<N>,
    scores: CircularBuffer<u8, SCORE_HISTORY_CAPACITY>,
    last_sample: MetricSample,
    last_alert: AlertLevel,
    cycle: u64,
    recorded_cycle: Option<u64>,
}

impl<const N: usize> Monitor<N> {
    /// Build a monitor; all sensors start MISSING and all histories empty
    pub fn new(config: MonitorConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            sensors: SensorManager::new(&config),
            config,
            history: HistoryStore::new(),
            scores: CircularBuffer::new(),
            last_sample: MetricSample::empty(),
            last_alert: AlertLevel::Normal,
            cycle: 0,
            recorded_cycle: None,
        })
    }

    /// Run one full polling cycle against `bus`
    pub fn run_cycle<B: SensorBus>(&mut self, bus: &mut B, now: Timestamp) -> CycleReport {
        self.advance_cycle();

        self.sensors.apply_scan(bus.scan(), now);
        let (sample, fresh) = self.acquire(bus, now);
        let (sample, _rejected) = sanitize(&sample);

        self.record_accepted(&sample);
        self.last_sample = sample;

        let installed = self.sensors.installed_metrics();
        let advice = aggregate(&self.history, installed);
        let evaluation = self.evaluate_with(&sample, installed, &advice);
        let summary = ContextSummary::build(&sample, installed, &evaluation);

        self.scores.push(evaluation.score);
        if evaluation.alert != self.last_alert {
            log_info!("Alert level {} -> {} (score {})", self.last_alert, evaluation.alert, evaluation.score);
            self.last_alert = evaluation.alert;
        }

        let co_danger = fresh.contains(Metric::Co)
            && sample.co.is_some_and(|co| co >= self.config.co_danger_ppm);
        if co_danger {
            log_warn!("CO at danger level: {:?} ppm", sample.co);
        }

        CycleReport {
            cycle: self.cycle,
            timestamp: now,
            sample,
            sensors: self.sensors.states(),
            overall: self.sensors.overall(),
            evaluation,
            advice,
            summary,
            co_danger,
        }
    }

    /// Read every attached sensor and build this cycle's sample
    ///
    /// Returns the sample and the metrics that came from fresh frames.
    fn acquire<B: SensorBus>(&mut self, bus: &mut B, now: Timestamp) -> (MetricSample, MetricSet) {
        let mut sample = MetricSample::empty();
        let mut fresh = MetricSet::empty();

        for id in SensorId::ALL {
            let acquired = if self.sensors.should_acquire(id) {
                self.sensors.record_read(id, bus.acquire(id), now)
            } else {
                self.sensors.surfaced(id)
            };

            if let Some(frame) = acquired.frame() {
                self.fill(&mut sample, frame);
                if let Acquired::Fresh(_) = acquired {
                    for metric in id.metrics() {
                        fresh.insert(*metric);
                    }
                }
            }
        }

        (sample, fresh)
    }

    fn fill(&self, sample: &mut MetricSample, frame: &SensorFrame) {
        let voc_enabled = self.sensors.state(SensorId::Climate) == SensorState::Ready;
        frame.fill(sample, voc_enabled);
    }

    /// Start a new cycle for drivers that build samples themselves
    pub fn advance_cycle(&mut self) -> u64 {
        self.cycle += 1;
        self.cycle
    }

    /// Append a sample's present values to the rolling history
    ///
    /// Only the first call per cycle is accepted; later calls return false
    /// and leave the history unchanged.
    pub fn record_accepted(&mut self, sample: &MetricSample) -> bool {
        if self.recorded_cycle == Some(self.cycle) {
            log_warn!("Sample already recorded for cycle {}", self.cycle);
            return false;
        }
        self.recorded_cycle = Some(self.cycle);
        self.history.record_accepted(sample);
        true
    }

    /// Score a sample against the current lifecycle and history
    pub fn evaluate(&self, sample: &MetricSample) -> Evaluation {
        let installed = self.sensors.installed_metrics();
        let advice = aggregate(&self.history, installed);
        self.evaluate_with(sample, installed, &advice)
    }

    fn evaluate_with(&self, sample: &MetricSample, installed: MetricSet, advice: &Advice) -> Evaluation {
        let mut evaluation =
            evaluate_with_co_danger(sample, installed, &self.history, self.config.co_danger_ppm);
        merge_unique(&mut evaluation.recommendations, advice.iter().copied());
        evaluation
    }

    /// Trend diagnosis for one metric
    ///
    /// Judged against the latest accepted reading. Without one this cycle
    /// the fixed initial diagnosis is returned.
    pub fn diagnose(&self, metric: Metric) -> TrendDiagnosis {
        match self.last_sample.get(metric) {
            Some(current) => diagnose_with_co_danger(
                metric,
                current,
                &self.history.values(metric),
                self.config.co_danger_ppm,
            ),
            None => trend::initial(metric),
        }
    }

    /// Lifecycle snapshot of every sensor
    pub fn current_lifecycle_states(&self) -> [SensorStatus; 4] {
        self.sensors.states()
    }

    /// Device-wide status
    pub fn overall(&self) -> OverallStatus {
        self.sensors.overall()
    }

    /// Past scores, oldest first
    pub fn score_history(&self) -> impl Iterator<Item = u8> + '_ {
        self.scores.iter().copied()
    }

    /// Rolling per-metric windows
    pub fn history(&self) -> &HistoryStore<N> {
        &self.history
    }

    /// Sensor lifecycles
    pub fn sensors(&self) -> &SensorManager {
        &self.sensors
    }

    /// Settings the monitor was built with
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Latest accepted sample
    pub fn last_sample(&self) -> &MetricSample {
        &self.last_sample
    }

    /// Cycles run so far
    pub fn cycles(&self) -> u64 {
        self.cycle
    }
}

impl<const N: usize> Default for Monitor<N> {
    fn default() -> Self {
        Self {
            config: MonitorConfig::default(),
            sensors: SensorManager::default(),
            history: HistoryStore::new(),
            scores: CircularBuffer::new(),
            last_sample: MetricSample::empty(),
            last_alert: AlertLevel::Normal,
            cycle: 0,
            recorded_cycle: None,
        }
    }
}
