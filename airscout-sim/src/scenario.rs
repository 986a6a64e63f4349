//! Scripted sensor bus for the simulator.
//!
//! Each scenario generates synthetic frames that vary with the cycle number,
//! plus bus behaviour (presence, transport errors, failed reads) so the
//! lifecycle machine can be exercised without hardware.

use airscout_core::errors::{BusError, ReadError};
use airscout_core::sensor::{AddressSet, SensorBus, SensorFrame, SensorId};
use clap::ValueEnum;

/// Bus address the simulated CO cell answers on.
pub const SIM_CO_ADDRESS: u8 = 0x50;

const CO2_ADDRESS: u8 = 0x62;
const CLIMATE_ADDRESS: u8 = 0x77;
const PM25_ADDRESS: u8 = 0x12;

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// What the simulated room is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Ventilated room, everything in range
    Normal,
    /// CO builds up from a faulty appliance until it reaches danger levels
    CoLeak,
    /// Noisy bus: transport errors, empty scans and an unplugged particulate sensor
    FlakyBus,
    /// Occupied room with the windows shut: CO₂ and humidity climb
    StuffyRoom,
}

impl Scenario {
    /// Whether the scenario fits a CO sensor
    pub fn has_co_sensor(&self) -> bool {
        matches!(self, Scenario::CoLeak)
    }
}

// ---------------------------------------------------------------------------
// Simulated bus
// ---------------------------------------------------------------------------

/// Bus whose answers are generated from the scenario and the scan count.
pub struct SimBus {
    scenario: Scenario,
    /// Scans so far; one per cycle
    tick: u32,
    noise: u32,
}

impl SimBus {
    pub fn new(scenario: Scenario, seed: u32) -> Self {
        Self { scenario, tick: 0, noise: seed.max(1) }
    }

    /// Small deterministic jitter in `[-amplitude, amplitude]`.
    fn jitter(&mut self, amplitude: f32) -> f32 {
        self.noise ^= self.noise << 13;
        self.noise ^= self.noise >> 17;
        self.noise ^= self.noise << 5;
        let unit = (self.noise >> 8) as f32 / 16_777_216.0;
        (unit * 2.0 - 1.0) * amplitude
    }

    fn t(&self) -> f32 {
        self.tick as f32
    }

    fn co2_ppm(&mut self) -> f32 {
        let t = self.t();
        let base = match self.scenario {
            Scenario::StuffyRoom => (650.0 + 25.0 * t).min(2_200.0),
            _ => 600.0 + 120.0 * (t / 40.0).sin(),
        };
        base + self.jitter(15.0)
    }

    fn climate(&mut self) -> SensorFrame {
        let t = self.t();
        let (temp_c, humidity_pct) = match self.scenario {
            Scenario::StuffyRoom => ((22.0 + 0.08 * t).min(27.5), (48.0 + 0.6 * t).min(72.0)),
            _ => (22.0 + 1.5 * (t / 60.0).sin(), 45.0 + 5.0 * (t / 90.0).cos()),
        };
        // Gas resistance drops as VOCs build up
        let gas_ohms = match self.scenario {
            Scenario::StuffyRoom => (350_000.0 - 6_000.0 * t).max(60_000.0),
            _ => 380_000.0 + 40_000.0 * (t / 25.0).sin(),
        };
        SensorFrame::Climate {
            temp_c: temp_c + self.jitter(0.1),
            humidity_pct: humidity_pct + self.jitter(0.5),
            gas_ohms: Some(gas_ohms),
        }
    }

    fn pm25(&mut self) -> f32 {
        let t = self.t();
        let base = match self.scenario {
            // Cooking burst
            Scenario::FlakyBus if (40..55).contains(&self.tick) => 48.0,
            _ => 6.0 + 3.0 * (t / 30.0).sin(),
        };
        (base + self.jitter(1.5)).max(0.0)
    }

    fn co_ppm(&mut self) -> f32 {
        let t = self.t();
        (0.8 * t - 4.0).clamp(0.0, 120.0) + self.jitter(0.5).abs()
    }

    fn particulate_unplugged(&self) -> bool {
        self.scenario == Scenario::FlakyBus && (20..32).contains(&self.tick)
    }
}

impl SensorBus for SimBus {
    fn scan(&mut self) -> Result<AddressSet, BusError> {
        self.tick += 1;

        if self.scenario == Scenario::FlakyBus {
            if self.tick % 17 == 0 {
                return Err(BusError::Transport { reason: "arbitration lost" });
            }
            if self.tick % 11 == 0 {
                return Ok(AddressSet::empty());
            }
        }

        let mut present = AddressSet::from_slice(&[CO2_ADDRESS, CLIMATE_ADDRESS]);
        if !self.particulate_unplugged() {
            present.insert(PM25_ADDRESS);
        }
        if self.scenario.has_co_sensor() {
            present.insert(SIM_CO_ADDRESS);
        }
        Ok(present)
    }

    fn acquire(&mut self, sensor: SensorId) -> Result<Option<SensorFrame>, ReadError> {
        if self.scenario == Scenario::FlakyBus && sensor == SensorId::Co2 && self.tick % 13 == 0 {
            return Err(ReadError::Crc { sensor });
        }

        let frame = match sensor {
            SensorId::Co2 => {
                // The CO₂ sensor only has a new measurement every other poll
                if self.tick % 2 == 0 {
                    return Ok(None);
                }
                SensorFrame::Co2 { ppm: self.co2_ppm() }
            }
            SensorId::Climate => self.climate(),
            SensorId::Particulate => SensorFrame::Particulate { pm25_ugm3: self.pm25() },
            SensorId::Co if self.scenario.has_co_sensor() => SensorFrame::Co { ppm: self.co_ppm() },
            SensorId::Co => return Err(ReadError::NotAttached { sensor }),
        };
        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_scan_finds_three_sensors() {
        let mut bus = SimBus::new(Scenario::Normal, 7);
        let present = bus.scan().unwrap();
        assert_eq!(present.len(), 3);
        assert!(!present.contains(SIM_CO_ADDRESS));
    }

    #[test]
    fn co_leak_ramps_up() {
        let mut bus = SimBus::new(Scenario::CoLeak, 7);
        let mut last = 0.0;
        for _ in 0..60 {
            bus.scan().unwrap();
            if let Ok(Some(SensorFrame::Co { ppm })) = bus.acquire(SensorId::Co) {
                last = ppm;
            }
        }
        assert!(last >= 35.0);
    }

    #[test]
    fn flaky_bus_fails_transport() {
        let mut bus = SimBus::new(Scenario::FlakyBus, 7);
        let failures = (0..34).filter(|_| bus.scan().is_err()).count();
        assert_eq!(failures, 2);
    }
}
