//! Monitor configuration
//!
//! Defaults come from [`crate::constants`]. Every field can be overridden
//! with a `with_*` builder, and [`MonitorConfig::validate`] rejects values
//! that would make the lifecycle machine misbehave.
//!
//! ```rust
//! use airscout_core::config::MonitorConfig;
//! use airscout_core::sensor::SensorId;
//!
//! let config = MonitorConfig::default()
//!     .with_miss_limit(3)
//!     .with_warmup_ms(SensorId::Co2, 5_000);
//! assert!(config.validate().is_ok());
//! ```

use crate::{
    constants::{
        sensors::{I2C_ADDRESS_MAX, MISS_LIMIT},
        thresholds::CO_DANGER_PPM,
        time::{CLIMATE_WARMUP_MS, CO2_WARMUP_MS, CO_WARMUP_MS, DEFAULT_POLL_INTERVAL_MS, PM25_WARMUP_MS},
    },
    errors::{ConfigError, ConfigResult},
    sensor::SensorId,
};

/// Most addresses one sensor can be configured to answer on
pub const MAX_SENSOR_ADDRESSES: usize = 4;

/// Per-sensor settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorConfig {
    /// Time from entering WARMUP until fresh reads count as READY
    pub warmup_ms: u64,
    /// Bus addresses that identify the device
    pub addresses: heapless::Vec<u8, MAX_SENSOR_ADDRESSES>,
}

impl SensorConfig {
    fn defaults_for(id: SensorId) -> Self {
        let warmup_ms = match id {
            SensorId::Co2 => CO2_WARMUP_MS,
            SensorId::Climate => CLIMATE_WARMUP_MS,
            SensorId::Particulate => PM25_WARMUP_MS,
            SensorId::Co => CO_WARMUP_MS,
        };

        let mut addresses = heapless::Vec::new();
        for address in id.default_addresses().iter().take(MAX_SENSOR_ADDRESSES) {
            let _ = addresses.push(*address);
        }

        Self { warmup_ms, addresses }
    }
}

/// Settings for one [`crate::monitor::Monitor`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonitorConfig {
    /// Consecutive absent scans before a sensor is dropped
    pub miss_limit: u8,
    /// CO level that counts as dangerous, ppm; drives the CRITICAL alert and the danger trigger
    pub co_danger_ppm: f32,
    /// Cadence of the cycle driver
    pub poll_interval_ms: u64,
    /// CO₂ sensor
    pub co2: SensorConfig,
    /// Temperature, humidity and gas sensor
    pub climate: SensorConfig,
    /// PM2.5 sensor
    pub particulate: SensorConfig,
    /// CO cell; no address by default
    pub co: SensorConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            miss_limit: MISS_LIMIT,
            co_danger_ppm: CO_DANGER_PPM,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            co2: SensorConfig::defaults_for(SensorId::Co2),
            climate: SensorConfig::defaults_for(SensorId::Climate),
            particulate: SensorConfig::defaults_for(SensorId::Particulate),
            co: SensorConfig::defaults_for(SensorId::Co),
        }
    }
}

impl MonitorConfig {
    /// Settings for one sensor
    pub fn sensor(&self, id: SensorId) -> &SensorConfig {
        match id {
            SensorId::Co2 => &self.co2,
            SensorId::Climate => &self.climate,
            SensorId::Particulate => &self.particulate,
            SensorId::Co => &self.co,
        }
    }

    fn sensor_mut(&mut self, id: SensorId) -> &mut SensorConfig {
        match id {
            SensorId::Co2 => &mut self.co2,
            SensorId::Climate => &mut self.climate,
            SensorId::Particulate => &mut self.particulate,
            SensorId::Co => &mut self.co,
        }
    }

    /// Set [`Self::miss_limit`]
    pub fn with_miss_limit(mut self, limit: u8) -> Self {
        self.miss_limit = limit;
        self
    }

    /// Set [`Self::co_danger_ppm`]
    pub fn with_co_danger_ppm(mut self, ppm: f32) -> Self {
        self.co_danger_ppm = ppm;
        self
    }

    /// Set [`Self::poll_interval_ms`]
    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Warm-up for one sensor
    pub fn with_warmup_ms(mut self, id: SensorId, ms: u64) -> Self {
        self.sensor_mut(id).warmup_ms = ms;
        self
    }

    /// Replace a sensor's bus addresses
    pub fn with_addresses(mut self, id: SensorId, addresses: &[u8]) -> ConfigResult<Self> {
        let list = heapless::Vec::from_slice(addresses)
            .map_err(|_| ConfigError::InvalidValue { name: "addresses" })?;
        self.sensor_mut(id).addresses = list;
        Ok(self)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.miss_limit == 0 {
            return Err(ConfigError::ZeroMissLimit);
        }

        if !self.co_danger_ppm.is_finite() || self.co_danger_ppm <= 0.0 {
            return Err(ConfigError::InvalidValue { name: "co_danger_ppm" });
        }

        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue { name: "poll_interval_ms" });
        }

        let bad_address = SensorId::ALL
            .iter()
            .flat_map(|id| self.sensor(*id).addresses.iter())
            .any(|a| *a > I2C_ADDRESS_MAX);
        if bad_address {
            return Err(ConfigError::InvalidValue { name: "addresses" });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MonitorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.miss_limit, 5);
        assert_eq!(config.co2.addresses.as_slice(), &[0x62]);
        assert_eq!(config.climate.addresses.as_slice(), &[0x76, 0x77]);
        assert!(config.co.addresses.is_empty());
        assert_eq!(config.sensor(SensorId::Climate).warmup_ms, 60_000);
    }

    #[test]
    fn zero_miss_limit_rejected() {
        let config = MonitorConfig::default().with_miss_limit(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroMissLimit));
    }

    #[test]
    fn bad_values_rejected() {
        let config = MonitorConfig::default().with_co_danger_ppm(f32::NAN);
        assert_eq!(config.validate(), Err(ConfigError::InvalidValue { name: "co_danger_ppm" }));

        let config = MonitorConfig::default().with_poll_interval_ms(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidValue { name: "poll_interval_ms" }));
    }

    #[test]
    fn address_overrides() {
        let config = MonitorConfig::default()
            .with_addresses(SensorId::Co, &[0x50])
            .expect("fits");
        assert_eq!(config.co.addresses.as_slice(), &[0x50]);

        let too_many = MonitorConfig::default().with_addresses(SensorId::Co, &[1, 2, 3, 4, 5]);
        assert!(too_many.is_err());

        let config = MonitorConfig::default()
            .with_addresses(SensorId::Co, &[0x90])
            .expect("fits");
        assert_eq!(config.validate(), Err(ConfigError::InvalidValue { name: "addresses" }));
    }
}
