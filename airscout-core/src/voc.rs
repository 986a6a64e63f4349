//! VOC proxy from gas resistance
//!
//! Metal-oxide gas sensors drop in resistance as reducing gases rise. The
//! proxy maps that resistance inversely onto a 0–3 index: 5 kΩ or lower
//! reads 3.0, 500 kΩ or higher reads 0.0, linear in between. It is a relative
//! indicator, not a calibrated concentration.

use crate::constants::sensors::{GAS_OHMS_HIGH, GAS_OHMS_LOW};

/// Top of the proxy scale
pub const VOC_PROXY_SCALE: f32 = 3.0;

/// Map gas resistance in ohms to the 0–3 VOC proxy, two decimals
///
/// Non-positive or non-finite resistance yields 0.0.
pub fn proxy_from_gas_ohms(gas_ohms: f32) -> f32 {
    if !gas_ohms.is_finite() || gas_ohms <= 0.0 {
        return 0.0;
    }

    let g = gas_ohms.clamp(GAS_OHMS_LOW, GAS_OHMS_HIGH);
    let t = (GAS_OHMS_HIGH - g) / (GAS_OHMS_HIGH - GAS_OHMS_LOW);
    round_to(t * VOC_PROXY_SCALE, 2)
}

/// Round half away from zero to `decimals` places
pub(crate) fn round_to(value: f32, decimals: i32) -> f32 {
    let scale = libm::powf(10.0, decimals as f32);
    libm::roundf(value * scale) / scale
}
