//! Sensor Lifecycle Tracking
//!
//! ## State Machine
//!
//! Each tracked sensor moves through five states, driven by bus scans and
//! read results:
//!
//! ```text
//!                present (first time)
//!   MISSING ───────────────────────────► WARMUP ──── warm-up elapsed ───► READY
//!      ▲                                  ▲  ▲        + fresh read          │
//!      │ MISS_LIMIT consecutive           │  │                              │
//!      │ absent scans                     │  └──── present again ───┐       │ absent (< limit)
//!      │                                  │                         │       │ or empty scan
//!   (any attached state)            present again                 STALE ◄───┘
//!                                         │
//!                                       ERROR ◄── transport error / read error
//! ```
//!
//! ## Debouncing
//!
//! A single missed scan never drops a sensor. Each absence bumps a miss
//! counter; only `miss_limit` consecutive absences detach the device, clear
//! its warm-up stamp and forget its last good frame. Below the limit an
//! attached device is marked STALE and keeps its cached frame, so the last
//! known value stays visible. One presence resets the counter.
//!
//! ## Two Failure Paths
//!
//! - Transport error: nothing is known about any device, all go to ERROR.
//! - Successful scan with no addresses: treated as a bus hiccup. READY
//!   devices downgrade to STALE, nothing else changes and no misses are
//!   counted.
//!
//! ## Warm-Up
//!
//! Entering WARMUP stamps the state-entered time unless one is already set.
//! Reads compare elapsed time since the stamp against the per-sensor warm-up
//! duration; a fresh frame after warm-up means READY. Elapsed time uses
//! saturating subtraction, and a missing stamp counts as zero elapsed.

use crate::{
    config::MonitorConfig,
    errors::{BusError, ReadError},
    sample::MetricSet,
    sensor::{AddressSet, SensorFrame, SensorId},
    time::{warmup_elapsed, Timestamp},
    validation::check_frame,
};

/// Availability of one sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum SensorState {
    /// Not present on the bus
    Missing,
    /// Present, waiting for readings to settle
    Warmup,
    /// Producing trusted readings
    Ready,
    /// Present but no fresh readings; last value still shown
    Stale,
    /// Bus or read failure
    Error,
}

impl SensorState {
    /// Whether the sensor counts as installed for scoring and advice
    pub const fn is_installed(&self) -> bool {
        match self {
            SensorState::Warmup | SensorState::Ready | SensorState::Stale => true,
            SensorState::Missing | SensorState::Error => false,
        }
    }

    /// Upper-case label for displays
    pub const fn label(&self) -> &'static str {
        match self {
            SensorState::Missing => "MISSING",
            SensorState::Warmup => "WARMUP",
            SensorState::Ready => "READY",
            SensorState::Stale => "STALE",
            SensorState::Error => "ERROR",
        }
    }

    const fn is_inactive(&self) -> bool {
        matches!(self, SensorState::Missing | SensorState::Error | SensorState::Stale)
    }
}

impl core::fmt::Display for SensorState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Device-wide status shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum OverallStatus {
    /// Core sensors still settling or partly unavailable
    Warmup,
    /// CO₂ reading and climate sensor up
    Ready,
    /// Neither core sensor is available
    Error,
}

/// Snapshot of one sensor's lifecycle for collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SensorStatus {
    /// Which sensor
    pub sensor: SensorId,
    /// Its lifecycle state after this cycle's scan and read
    pub state: SensorState,
    /// When the sensor last entered WARMUP
    pub since: Option<Timestamp>,
    /// Consecutive scans the sensor was absent
    pub misses: u8,
}

/// What a read produced for the current cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Acquired {
    /// New frame from the device
    Fresh(SensorFrame),
    /// No new data; the last good frame is reused
    Cached(SensorFrame),
    /// Nothing to show
    Nothing,
}

impl Acquired {
    /// Frame to surface, fresh or cached
    pub fn frame(&self) -> Option<&SensorFrame> {
        match self {
            Acquired::Fresh(frame) | Acquired::Cached(frame) => Some(frame),
            Acquired::Nothing => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SensorSlot {
    state: SensorState,
    since: Option<Timestamp>,
    misses: u8,
    attached: bool,
    present: bool,
    last_good: Option<SensorFrame>,
}

impl SensorSlot {
    const fn new() -> Self {
        Self {
            state: SensorState::Missing,
            since: None,
            misses: 0,
            attached: false,
            present: false,
            last_good: None,
        }
    }
}

/// Owns the lifecycle of every tracked sensor
#[derive(Debug, Clone)]
pub struct SensorManager {
    slots: [SensorSlot; 4],
    addresses: [heapless::Vec<u8, 4>; 4],
    warmup_ms: [u64; 4],
    miss_limit: u8,
}

impl SensorManager {
    /// All sensors MISSING, nothing attached
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            slots: [SensorSlot::new(); 4],
            addresses: SensorId::ALL.map(|id| config.sensor(id).addresses.clone()),
            warmup_ms: SensorId::ALL.map(|id| config.sensor(id).warmup_ms),
            miss_limit: config.miss_limit,
        }
    }

    /// Feed the result of a bus scan
    pub fn apply_scan(&mut self, scan: Result<AddressSet, BusError>, now: Timestamp) {
        match scan {
            Err(e) => self.on_transport_error(e),
            Ok(addresses) if addresses.is_empty() => self.on_empty_scan(),
            Ok(addresses) => {
                for id in SensorId::ALL {
                    let present = addresses.contains_any(&self.addresses[id.index()]);
                    if present {
                        self.on_present(id, now);
                    } else {
                        self.on_absent(id);
                    }
                }
            }
        }
    }

    fn on_transport_error(&mut self, e: BusError) {
        log_warn!("Bus scan failed: {}", e);
        for id in SensorId::ALL {
            self.slots[id.index()].present = false;
            self.transition(id, SensorState::Error);
        }
    }

    fn on_empty_scan(&mut self) {
        log_debug!("Empty bus scan, treating as transient");
        for id in SensorId::ALL {
            let slot = &mut self.slots[id.index()];
            slot.present = false;
            if slot.attached && slot.state == SensorState::Ready {
                self.transition(id, SensorState::Stale);
            }
        }
    }

    fn on_present(&mut self, id: SensorId, now: Timestamp) {
        let slot = &mut self.slots[id.index()];
        slot.misses = 0;
        slot.present = true;

        if !slot.attached {
            slot.attached = true;
            slot.since = Some(now);
            log_info!("{} attached", id);
            self.transition(id, SensorState::Warmup);
        } else if slot.state.is_inactive() {
            if slot.since.is_none() {
                slot.since = Some(now);
            }
            self.transition(id, SensorState::Warmup);
        }
    }

    fn on_absent(&mut self, id: SensorId) {
        let limit = self.miss_limit;
        let slot = &mut self.slots[id.index()];
        slot.present = false;
        slot.misses = slot.misses.saturating_add(1);

        if slot.misses >= limit {
            if slot.attached {
                log_info!("{} detached after {} missed scans", id, slot.misses);
            }
            slot.attached = false;
            slot.since = None;
            slot.last_good = None;
            self.transition(id, SensorState::Missing);
        } else if slot.attached {
            self.transition(id, SensorState::Stale);
        }
    }

    /// Whether the sensor should be read this cycle
    pub fn should_acquire(&self, id: SensorId) -> bool {
        let slot = &self.slots[id.index()];
        slot.attached && slot.present
    }

    /// Feed the result of reading one sensor
    pub fn record_read(
        &mut self,
        id: SensorId,
        result: Result<Option<SensorFrame>, ReadError>,
        now: Timestamp,
    ) -> Acquired {
        let warmup = self.warmup_ms[id.index()];
        let slot = &mut self.slots[id.index()];
        let elapsed = warmup_elapsed(slot.since, now);
        let warmed = elapsed >= warmup;

        match result {
            Ok(Some(frame)) if frame.sensor() != id => {
                log_warn!("{} returned a frame for {}", id, frame.sensor());
                self.transition(id, SensorState::Error);
                Acquired::Nothing
            }
            Ok(Some(frame)) => match check_frame(&frame) {
                Err(e) => {
                    log_warn!("{} frame rejected: {}", id, e);
                    self.transition(id, SensorState::Error);
                    Acquired::Nothing
                }
                Ok(()) => {
                    slot.last_good = Some(frame);
                    let next = if warmed { SensorState::Ready } else { SensorState::Warmup };
                    self.transition(id, next);
                    Acquired::Fresh(frame)
                }
            },
            Ok(None) => {
                let cached = slot.last_good;
                match cached {
                    None => {
                        self.transition(id, SensorState::Warmup);
                        Acquired::Nothing
                    }
                    Some(frame) => {
                        let next = if warmed { SensorState::Stale } else { SensorState::Warmup };
                        self.transition(id, next);
                        Acquired::Cached(frame)
                    }
                }
            }
            Err(e) => {
                log_warn!("{}", e);
                self.transition(id, SensorState::Error);
                Acquired::Nothing
            }
        }
    }

    /// Last good frame of an attached, installed sensor that was not read
    pub fn surfaced(&self, id: SensorId) -> Acquired {
        let slot = &self.slots[id.index()];
        match slot.last_good {
            Some(frame) if slot.attached && slot.state.is_installed() => Acquired::Cached(frame),
            _ => Acquired::Nothing,
        }
    }

    fn transition(&mut self, id: SensorId, next: SensorState) {
        let slot = &mut self.slots[id.index()];
        if slot.state != next {
            log_debug!("{}: {} -> {}", id, slot.state, next);
            slot.state = next;
        }
    }

    /// Current state of one sensor
    pub fn state(&self, id: SensorId) -> SensorState {
        self.slots[id.index()].state
    }

    /// Snapshot of one sensor
    pub fn status(&self, id: SensorId) -> SensorStatus {
        let slot = &self.slots[id.index()];
        SensorStatus {
            sensor: id,
            state: slot.state,
            since: slot.since,
            misses: slot.misses,
        }
    }

    /// Snapshot of every sensor, in report order
    pub fn states(&self) -> [SensorStatus; 4] {
        SensorId::ALL.map(|id| self.status(id))
    }

    /// Whether the sensor is installed (WARMUP, READY or STALE)
    pub fn is_installed(&self, id: SensorId) -> bool {
        self.state(id).is_installed()
    }

    /// Metrics whose owning sensor is installed
    pub fn installed_metrics(&self) -> MetricSet {
        SensorId::ALL
            .iter()
            .filter(|id| self.is_installed(**id))
            .flat_map(|id| id.metrics().iter().copied())
            .collect()
    }

    /// Device-wide status from the CO₂ and climate sensors
    pub fn overall(&self) -> OverallStatus {
        let co2 = self.state(SensorId::Co2);
        let climate = self.state(SensorId::Climate);
        let down = |s: SensorState| matches!(s, SensorState::Missing | SensorState::Error);

        if co2 == SensorState::Ready && matches!(climate, SensorState::Warmup | SensorState::Ready) {
            OverallStatus::Ready
        } else if down(co2) && down(climate) {
            OverallStatus::Error
        } else {
            OverallStatus::Warmup
        }
    }
}

impl Default for SensorManager {
    fn default() -> Self {
        Self::new(&MonitorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::time::CO2_WARMUP_MS;

    const CO2: u8 = 0x62;
    const CLIMATE: u8 = 0x77;

    fn scan(addrs: &[u8]) -> Result<AddressSet, BusError> {
        Ok(AddressSet::from_slice(addrs))
    }

    fn co2_frame() -> SensorFrame {
        SensorFrame::Co2 { ppm: 612.0 }
    }

    #[test]
    fn starts_missing() {
        let manager = SensorManager::default();
        for status in manager.states() {
            assert_eq!(status.state, SensorState::Missing);
            assert_eq!(status.since, None);
        }
        assert!(manager.installed_metrics().is_empty());
        assert_eq!(manager.overall(), OverallStatus::Error);
    }

    #[test]
    fn first_presence_enters_warmup() {
        let mut manager = SensorManager::default();
        manager.apply_scan(scan(&[CO2]), 1_000);

        let status = manager.status(SensorId::Co2);
        assert_eq!(status.state, SensorState::Warmup);
        assert_eq!(status.since, Some(1_000));
        assert!(manager.should_acquire(SensorId::Co2));
        assert!(!manager.should_acquire(SensorId::Climate));
    }

    #[test]
    fn fresh_read_after_warmup_is_ready() {
        let mut manager = SensorManager::default();
        manager.apply_scan(scan(&[CO2]), 0);

        let early = manager.record_read(SensorId::Co2, Ok(Some(co2_frame())), 1_000);
        assert_eq!(early, Acquired::Fresh(co2_frame()));
        assert_eq!(manager.state(SensorId::Co2), SensorState::Warmup);

        manager.record_read(SensorId::Co2, Ok(Some(co2_frame())), CO2_WARMUP_MS);
        assert_eq!(manager.state(SensorId::Co2), SensorState::Ready);
    }

    #[test]
    fn no_new_data_reuses_cache() {
        let mut manager = SensorManager::default();
        manager.apply_scan(scan(&[CO2]), 0);

        // Nothing cached yet
        assert_eq!(manager.record_read(SensorId::Co2, Ok(None), 100), Acquired::Nothing);
        assert_eq!(manager.state(SensorId::Co2), SensorState::Warmup);

        manager.record_read(SensorId::Co2, Ok(Some(co2_frame())), 200);
        let later = manager.record_read(SensorId::Co2, Ok(None), CO2_WARMUP_MS + 1);
        assert_eq!(later, Acquired::Cached(co2_frame()));
        assert_eq!(manager.state(SensorId::Co2), SensorState::Stale);
    }

    #[test]
    fn implausible_frame_not_cached() {
        let mut manager = SensorManager::default();
        manager.apply_scan(scan(&[CO2]), 0);
        manager.record_read(SensorId::Co2, Ok(Some(co2_frame())), 100);

        let garbage = SensorFrame::Co2 { ppm: f32::NAN };
        let read = manager.record_read(SensorId::Co2, Ok(Some(garbage)), CO2_WARMUP_MS);
        assert_eq!(read, Acquired::Nothing);
        assert_eq!(manager.state(SensorId::Co2), SensorState::Error);

        // The earlier good frame is still the cached one
        let again = manager.record_read(SensorId::Co2, Ok(None), CO2_WARMUP_MS + 1);
        assert_eq!(again, Acquired::Cached(co2_frame()));
    }

    #[test]
    fn read_error_isolated() {
        let mut manager = SensorManager::default();
        manager.apply_scan(scan(&[CO2, CLIMATE]), 0);

        let err = ReadError::Crc { sensor: SensorId::Co2 };
        assert_eq!(manager.record_read(SensorId::Co2, Err(err), 10), Acquired::Nothing);
        assert_eq!(manager.state(SensorId::Co2), SensorState::Error);
        assert_eq!(manager.state(SensorId::Climate), SensorState::Warmup);
    }

    #[test]
    fn mismatched_frame_is_error() {
        let mut manager = SensorManager::default();
        manager.apply_scan(scan(&[CO2]), 0);

        let wrong = SensorFrame::Co { ppm: 4.0 };
        assert_eq!(manager.record_read(SensorId::Co2, Ok(Some(wrong)), 10), Acquired::Nothing);
        assert_eq!(manager.state(SensorId::Co2), SensorState::Error);
    }

    #[test]
    fn absence_debounced() {
        let mut manager = SensorManager::default();
        manager.apply_scan(scan(&[CO2, CLIMATE]), 0);
        manager.record_read(SensorId::Co2, Ok(Some(co2_frame())), 0);

        for _ in 0..4 {
            manager.apply_scan(scan(&[CLIMATE]), 100);
        }
        let status = manager.status(SensorId::Co2);
        assert_eq!(status.state, SensorState::Stale);
        assert_eq!(status.misses, 4);
        assert_eq!(status.since, Some(0));
        assert_eq!(manager.surfaced(SensorId::Co2), Acquired::Cached(co2_frame()));

        manager.apply_scan(scan(&[CLIMATE]), 200);
        let status = manager.status(SensorId::Co2);
        assert_eq!(status.state, SensorState::Missing);
        assert_eq!(status.since, None);
        assert_eq!(manager.surfaced(SensorId::Co2), Acquired::Nothing);
    }

    #[test]
    fn presence_resets_misses() {
        let mut manager = SensorManager::default();
        manager.apply_scan(scan(&[CO2, CLIMATE]), 0);

        for _ in 0..4 {
            manager.apply_scan(scan(&[CLIMATE]), 10);
        }
        manager.apply_scan(scan(&[CO2, CLIMATE]), 20);

        let status = manager.status(SensorId::Co2);
        assert_eq!(status.misses, 0);
        assert_eq!(status.state, SensorState::Warmup);
        // Stamp survives a STALE detour
        assert_eq!(status.since, Some(0));
    }

    #[test]
    fn empty_scan_only_downgrades_ready() {
        let mut manager = SensorManager::default();
        manager.apply_scan(scan(&[CO2, CLIMATE]), 0);
        manager.record_read(SensorId::Co2, Ok(Some(co2_frame())), CO2_WARMUP_MS);
        assert_eq!(manager.state(SensorId::Co2), SensorState::Ready);

        manager.apply_scan(scan(&[]), CO2_WARMUP_MS + 1);
        assert_eq!(manager.state(SensorId::Co2), SensorState::Stale);
        assert_eq!(manager.state(SensorId::Climate), SensorState::Warmup);
        assert_eq!(manager.state(SensorId::Particulate), SensorState::Missing);
        assert_eq!(manager.status(SensorId::Co2).misses, 0);
        assert!(!manager.should_acquire(SensorId::Co2));
    }

    #[test]
    fn transport_error_marks_everything() {
        let mut manager = SensorManager::default();
        manager.apply_scan(scan(&[CO2, CLIMATE]), 0);
        manager.apply_scan(Err(BusError::Transport { reason: "arbitration lost" }), 10);

        for status in manager.states() {
            assert_eq!(status.state, SensorState::Error);
        }
        assert!(manager.installed_metrics().is_empty());

        // Recovery re-enters warm-up without re-stamping
        manager.apply_scan(scan(&[CO2]), 500);
        assert_eq!(manager.state(SensorId::Co2), SensorState::Warmup);
        assert_eq!(manager.status(SensorId::Co2).since, Some(0));
    }

    #[test]
    fn overall_status() {
        let mut manager = SensorManager::default();
        manager.apply_scan(scan(&[CO2, CLIMATE]), 0);
        assert_eq!(manager.overall(), OverallStatus::Warmup);

        manager.record_read(SensorId::Co2, Ok(Some(co2_frame())), CO2_WARMUP_MS);
        assert_eq!(manager.overall(), OverallStatus::Ready);
    }

    #[test]
    fn installed_follows_state() {
        assert!(SensorState::Stale.is_installed());
        assert!(!SensorState::Error.is_installed());

        let mut manager = SensorManager::default();
        manager.apply_scan(scan(&[CLIMATE]), 0);
        let metrics = manager.installed_metrics();
        assert!(metrics.contains(crate::sample::Metric::Voc));
        assert!(!metrics.contains(crate::sample::Metric::Co2));
    }
}
