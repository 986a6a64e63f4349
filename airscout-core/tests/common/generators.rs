//! Frame generators
//!
//! Build raw frames that land on exact sample values after the monitor's
//! unit conversion and VOC mapping.

use airscout_core::{
    constants::sensors::{GAS_OHMS_HIGH, GAS_OHMS_LOW},
    sensor::SensorFrame,
    voc::VOC_PROXY_SCALE,
};

pub fn co2(ppm: f32) -> SensorFrame {
    SensorFrame::Co2 { ppm }
}

pub fn pm25(ugm3: f32) -> SensorFrame {
    SensorFrame::Particulate { pm25_ugm3: ugm3 }
}

pub fn co(ppm: f32) -> SensorFrame {
    SensorFrame::Co { ppm }
}

/// Climate frame reading `temp_f`, `humidity` and VOC proxy `voc`
pub fn climate(temp_f: f32, humidity: f32, voc: f32) -> SensorFrame {
    SensorFrame::Climate {
        temp_c: (temp_f - 32.0) * 5.0 / 9.0,
        humidity_pct: humidity,
        gas_ohms: Some(gas_ohms_for(voc)),
    }
}

/// Gas resistance that maps to VOC proxy `voc`
pub fn gas_ohms_for(voc: f32) -> f32 {
    GAS_OHMS_HIGH - voc / VOC_PROXY_SCALE * (GAS_OHMS_HIGH - GAS_OHMS_LOW)
}

/// Deterministic random number generator for tests
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        // Xorshift
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16_777_216.0
    }

    pub fn gen_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}
