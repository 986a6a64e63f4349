//! Sensor Bus Addresses and Physical Limits
//!
//! This module defines where each sensor lives on the I2C bus, how presence is
//! debounced, and which readings are physically plausible for each metric.

// ===== BUS PRESENCE =====

/// Consecutive absent scans before a sensor is declared MISSING.
///
/// A single missed scan on a noisy bus must not drop a sensor; five
/// consecutive misses (~7.5 s at the default cadence) is a real unplug.
pub const MISS_LIMIT: u8 = 5;

/// I2C addresses answered by the CO₂ sensor.
///
/// Source: Sensirion SCD41 datasheet (fixed address 0x62)
pub const CO2_SENSOR_ADDRESSES: &[u8] = &[0x62];

/// I2C addresses answered by the climate sensor.
///
/// The SDO pin selects between the two addresses.
///
/// Source: Bosch BME688 datasheet
pub const CLIMATE_SENSOR_ADDRESSES: &[u8] = &[0x76, 0x77];

/// I2C addresses answered by the particulate sensor.
///
/// Source: Plantower PMSA003I datasheet (fixed address 0x12)
pub const PM25_SENSOR_ADDRESSES: &[u8] = &[0x12];

/// I2C addresses answered by the CO sensor.
///
/// No CO hardware is fitted yet, so nothing on the bus can make it present
/// and it stays MISSING until an address is configured.
pub const CO_SENSOR_ADDRESSES: &[u8] = &[];

/// Highest 7-bit I2C address.
pub const I2C_ADDRESS_MAX: u8 = 0x7F;

// ===== PLAUSIBLE READING RANGES =====

/// CO₂ plausible range (ppm).
///
/// Source: SCD41 output range 0–40000 ppm
pub const CO2_MIN_PPM: f32 = 0.0;
/// Upper bound of the CO₂ range.
pub const CO2_MAX_PPM: f32 = 40_000.0;

/// PM2.5 plausible range (µg/m³).
///
/// Source: PMSA003I effective range 0–500, max 1000
pub const PM25_MIN_UGM3: f32 = 0.0;
/// Upper bound of the PM2.5 range.
pub const PM25_MAX_UGM3: f32 = 1000.0;

/// VOC proxy range (dimensionless index).
pub const VOC_PROXY_MIN: f32 = 0.0;
/// Upper bound of the VOC proxy.
pub const VOC_PROXY_MAX: f32 = 3.0;

/// CO plausible range (ppm).
///
/// Source: typical electrochemical CO cell full scale
pub const CO_MIN_PPM: f32 = 0.0;
/// Upper bound of the CO range.
pub const CO_MAX_PPM: f32 = 1000.0;

/// Temperature plausible range (°F).
///
/// Source: BME688 operating range -40 °C to 85 °C
pub const TEMP_MIN_F: f32 = -40.0;
/// Upper bound of the temperature range.
pub const TEMP_MAX_F: f32 = 185.0;

/// Relative humidity range (%).
pub const HUMIDITY_MIN_PCT: f32 = 0.0;
/// Upper bound of the humidity range.
pub const HUMIDITY_MAX_PCT: f32 = 100.0;

// ===== VOC PROXY MAPPING =====

/// Gas resistance treated as the dirtiest air (ohms).
pub const GAS_OHMS_LOW: f32 = 5_000.0;

/// Gas resistance treated as the cleanest air (ohms).
pub const GAS_OHMS_HIGH: f32 = 500_000.0;
