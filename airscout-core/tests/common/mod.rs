//! Common test utilities for integration tests
//!
//! This module provides:
//! - A scripted [`SensorBus`] whose presence and per-sensor responses can be
//!   changed between cycles
//! - Frame generators that produce exact sample values after unit conversion
//! - A configuration with short warm-ups and an addressable CO sensor

#![allow(dead_code)]

pub mod generators;

use airscout_core::{
    errors::{BusError, ReadError},
    sensor::{AddressSet, SensorBus, SensorFrame, SensorId},
    time::Timestamp,
    CycleReport, Monitor, MonitorConfig, SensorState,
};

/// Poll interval used by cycle helpers
pub const CYCLE_MS: u64 = 1_500;

/// Short warm-up so tests reach READY in a few cycles
pub const TEST_WARMUP_MS: u64 = 3_000;

pub const CO2_ADDR: u8 = 0x62;
pub const CLIMATE_ADDR: u8 = 0x77;
pub const PM25_ADDR: u8 = 0x12;
pub const CO_ADDR: u8 = 0x50;

/// How a sensor answers `acquire`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Response {
    Frame(SensorFrame),
    NoData,
    Fail,
}

/// Bus whose answers are set by the test
#[derive(Debug, Clone)]
pub struct ScriptedBus {
    pub present: Vec<u8>,
    pub transport_error: Option<BusError>,
    pub responses: [Response; 4],
    pub scans: usize,
    pub reads: [usize; 4],
}

impl ScriptedBus {
    /// Nothing on the bus
    pub fn empty() -> Self {
        Self {
            present: Vec::new(),
            transport_error: None,
            responses: [Response::NoData; 4],
            scans: 0,
            reads: [0; 4],
        }
    }

    /// Every sensor present, answering with `frames`
    pub fn with_frames(frames: &[SensorFrame]) -> Self {
        let mut bus = Self::empty();
        for frame in frames {
            bus.attach(frame.sensor());
            bus.respond(*frame);
        }
        bus
    }

    pub fn attach(&mut self, sensor: SensorId) {
        let addr = address_of(sensor);
        if !self.present.contains(&addr) {
            self.present.push(addr);
        }
    }

    pub fn detach(&mut self, sensor: SensorId) {
        let addr = address_of(sensor);
        self.present.retain(|a| *a != addr);
    }

    pub fn respond(&mut self, frame: SensorFrame) {
        self.responses[slot(frame.sensor())] = Response::Frame(frame);
    }

    pub fn set_response(&mut self, sensor: SensorId, response: Response) {
        self.responses[slot(sensor)] = response;
    }

    pub fn reads_of(&self, sensor: SensorId) -> usize {
        self.reads[slot(sensor)]
    }
}

impl SensorBus for ScriptedBus {
    fn scan(&mut self) -> Result<AddressSet, BusError> {
        self.scans += 1;
        match self.transport_error {
            Some(err) => Err(err),
            None => Ok(AddressSet::from_slice(&self.present)),
        }
    }

    fn acquire(&mut self, sensor: SensorId) -> Result<Option<SensorFrame>, ReadError> {
        self.reads[slot(sensor)] += 1;
        match self.responses[slot(sensor)] {
            Response::Frame(frame) => Ok(Some(frame)),
            Response::NoData => Ok(None),
            Response::Fail => Err(ReadError::Io { sensor, reason: "nack" }),
        }
    }
}

fn slot(sensor: SensorId) -> usize {
    SensorId::ALL.iter().position(|s| *s == sensor).unwrap_or(0)
}

/// Address the test configuration uses for a sensor
pub fn address_of(sensor: SensorId) -> u8 {
    match sensor {
        SensorId::Co2 => CO2_ADDR,
        SensorId::Climate => CLIMATE_ADDR,
        SensorId::Particulate => PM25_ADDR,
        SensorId::Co => CO_ADDR,
    }
}

/// Defaults plus short warm-ups and a CO sensor at [`CO_ADDR`]
pub fn test_config() -> MonitorConfig {
    let mut config = MonitorConfig::default();
    for id in SensorId::ALL {
        config = config.with_warmup_ms(id, TEST_WARMUP_MS);
    }
    config
        .with_addresses(SensorId::Co, &[CO_ADDR])
        .expect("one address fits")
}

pub fn test_monitor() -> Monitor {
    Monitor::new(test_config()).expect("test config is valid")
}

/// Run `cycles` cycles starting at `*now`, advancing it; returns the last report
pub fn run_cycles(
    monitor: &mut Monitor,
    bus: &mut ScriptedBus,
    now: &mut Timestamp,
    cycles: usize,
) -> Option<CycleReport> {
    let mut last = None;
    for _ in 0..cycles {
        last = Some(monitor.run_cycle(bus, *now));
        *now += CYCLE_MS;
    }
    last
}

/// Cycle until every present sensor is READY; panics if it takes too long
pub fn warm_up(monitor: &mut Monitor, bus: &mut ScriptedBus, now: &mut Timestamp) -> CycleReport {
    for _ in 0..20 {
        let report = monitor.run_cycle(bus, *now);
        *now += CYCLE_MS;

        let all_ready = report
            .sensors
            .iter()
            .filter(|s| bus.present.contains(&address_of(s.sensor)))
            .all(|s| s.state == SensorState::Ready);
        if all_ready {
            return report;
        }
    }
    panic!("sensors did not warm up");
}
