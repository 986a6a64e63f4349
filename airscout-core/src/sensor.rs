//! Sensor Identities and the Bus Abstraction
//!
//! ## Overview
//!
//! The engine tracks four physical devices. Each one owns a fixed set of
//! metric keys:
//!
//! | sensor | metrics | default addresses |
//! |---|---|---|
//! | `co2Sensor` | co2 | 0x62 |
//! | `climateSensor` | temp, humidity, voc | 0x76, 0x77 |
//! | `pm25Sensor` | pm25 | 0x12 |
//! | `coSensor` | co | none |
//!
//! The physical transport lives outside the engine. It is reached only
//! through [`SensorBus`], which offers two operations: a presence scan
//! returning the set of responding addresses, and a per-sensor acquisition
//! returning a raw [`SensorFrame`].
//!
//! ## Bus Contract
//!
//! ```text
//! scan()            -> Ok(addresses)   bus healthy, may be empty
//!                   -> Err(BusError)   transport failed, nothing is known
//!
//! acquire(sensor)   -> Ok(Some(frame)) fresh sample
//!                   -> Ok(None)        device present, no new data yet
//!                   -> Err(ReadError)  this device failed, others unaffected
//! ```
//!
//! ## Example Implementation
//!
//! ```rust
//! use airscout_core::errors::{BusError, ReadError};
//! use airscout_core::sensor::{AddressSet, SensorBus, SensorFrame, SensorId};
//!
//! struct BenchBus;
//!
//! impl SensorBus for BenchBus {
//!     fn scan(&mut self) -> Result<AddressSet, BusError> {
//!         Ok(AddressSet::from_slice(&[0x62]))
//!     }
//!
//!     fn acquire(&mut self, sensor: SensorId) -> Result<Option<SensorFrame>, ReadError> {
//!         match sensor {
//!             SensorId::Co2 => Ok(Some(SensorFrame::Co2 { ppm: 540.0 })),
//!             other => Err(ReadError::NotAttached { sensor: other }),
//!         }
//!     }
//! }
//! ```

use core::fmt;

use crate::{
    constants::sensors::{
        CLIMATE_SENSOR_ADDRESSES, CO2_SENSOR_ADDRESSES, CO_SENSOR_ADDRESSES, I2C_ADDRESS_MAX,
        PM25_SENSOR_ADDRESSES,
    },
    errors::{BusError, ReadError},
    sample::{Metric, MetricSample},
    voc::{proxy_from_gas_ohms, round_to},
};

/// Physical device tracked by the lifecycle machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorId {
    /// NDIR CO₂ sensor
    #[cfg_attr(feature = "serde", serde(rename = "co2Sensor"))]
    Co2,
    /// Temperature, humidity and gas-resistance sensor
    #[cfg_attr(feature = "serde", serde(rename = "climateSensor"))]
    Climate,
    /// Particulate counter
    #[cfg_attr(feature = "serde", serde(rename = "pm25Sensor"))]
    Particulate,
    /// Electrochemical CO cell
    #[cfg_attr(feature = "serde", serde(rename = "coSensor"))]
    Co,
}

impl SensorId {
    /// Every tracked sensor, in report order
    pub const ALL: [SensorId; 4] = [
        SensorId::Co2,
        SensorId::Climate,
        SensorId::Particulate,
        SensorId::Co,
    ];

    /// Stable identifier used in reports and logs
    pub const fn name(&self) -> &'static str {
        match self {
            SensorId::Co2 => "co2Sensor",
            SensorId::Climate => "climateSensor",
            SensorId::Particulate => "pm25Sensor",
            SensorId::Co => "coSensor",
        }
    }

    /// Metric keys this sensor produces
    pub const fn metrics(&self) -> &'static [Metric] {
        match self {
            SensorId::Co2 => &[Metric::Co2],
            SensorId::Climate => &[Metric::Temp, Metric::Humidity, Metric::Voc],
            SensorId::Particulate => &[Metric::Pm25],
            SensorId::Co => &[Metric::Co],
        }
    }

    /// Sensor owning a metric
    pub const fn owner_of(metric: Metric) -> SensorId {
        match metric {
            Metric::Co2 => SensorId::Co2,
            Metric::Temp | Metric::Humidity | Metric::Voc => SensorId::Climate,
            Metric::Pm25 => SensorId::Particulate,
            Metric::Co => SensorId::Co,
        }
    }

    /// Bus addresses the device answers on out of the box
    pub const fn default_addresses(&self) -> &'static [u8] {
        match self {
            SensorId::Co2 => CO2_SENSOR_ADDRESSES,
            SensorId::Climate => CLIMATE_SENSOR_ADDRESSES,
            SensorId::Particulate => PM25_SENSOR_ADDRESSES,
            SensorId::Co => CO_SENSOR_ADDRESSES,
        }
    }

    pub(crate) const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw sample as delivered by a device driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorFrame {
    /// CO₂ concentration in ppm
    Co2 {
        /// Concentration, ppm
        ppm: f32,
    },
    /// Climate reading in device units
    Climate {
        /// Air temperature, °C
        temp_c: f32,
        /// Relative humidity, %
        humidity_pct: f32,
        /// Heated-plate gas resistance, ohms (absent while the heater settles)
        gas_ohms: Option<f32>,
    },
    /// PM2.5 mass concentration in µg/m³
    Particulate {
        /// Mass concentration, µg/m³
        pm25_ugm3: f32,
    },
    /// CO concentration in ppm
    Co {
        /// Concentration, ppm
        ppm: f32,
    },
}

impl SensorFrame {
    /// Sensor that produces this kind of frame
    pub const fn sensor(&self) -> SensorId {
        match self {
            SensorFrame::Co2 { .. } => SensorId::Co2,
            SensorFrame::Climate { .. } => SensorId::Climate,
            SensorFrame::Particulate { .. } => SensorId::Particulate,
            SensorFrame::Co { .. } => SensorId::Co,
        }
    }

    /// Write this frame's metrics into `sample`
    ///
    /// Temperature is converted to °F and rounded to one decimal, humidity is
    /// rounded to one decimal. The VOC proxy is only derived when
    /// `voc_enabled` is set, which the driver does once the climate sensor is
    /// READY.
    pub fn fill(&self, sample: &mut MetricSample, voc_enabled: bool) {
        match *self {
            SensorFrame::Co2 { ppm } => sample.set(Metric::Co2, Some(ppm)),
            SensorFrame::Climate { temp_c, humidity_pct, gas_ohms } => {
                sample.set(Metric::Temp, Some(round_to(celsius_to_fahrenheit(temp_c), 1)));
                sample.set(Metric::Humidity, Some(round_to(humidity_pct, 1)));
                let voc = gas_ohms.filter(|_| voc_enabled).map(proxy_from_gas_ohms);
                sample.set(Metric::Voc, voc);
            }
            SensorFrame::Particulate { pm25_ugm3 } => sample.set(Metric::Pm25, Some(pm25_ugm3)),
            SensorFrame::Co { ppm } => sample.set(Metric::Co, Some(ppm)),
        }
    }
}

/// °C to °F
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Set of 7-bit bus addresses that answered a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressSet(u128);

impl AddressSet {
    /// No device answered
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build from a list of addresses; anything above 0x7F is ignored
    pub fn from_slice(addresses: &[u8]) -> Self {
        addresses.iter().copied().collect()
    }

    /// Mark an address present; returns false if it is not a 7-bit address
    pub fn insert(&mut self, address: u8) -> bool {
        if address > I2C_ADDRESS_MAX {
            return false;
        }
        self.0 |= 1u128 << address;
        true
    }

    /// Whether an address answered
    pub const fn contains(&self, address: u8) -> bool {
        address <= I2C_ADDRESS_MAX && self.0 & (1u128 << address) != 0
    }

    /// Whether any of `addresses` answered
    pub fn contains_any(&self, addresses: &[u8]) -> bool {
        addresses.iter().any(|a| self.contains(*a))
    }

    /// True when the scan found nothing
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of responding addresses
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Responding addresses in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=I2C_ADDRESS_MAX).filter(move |a| self.contains(*a))
    }
}

impl FromIterator<u8> for AddressSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::empty();
        for address in iter {
            set.insert(address);
        }
        set
    }
}

/// Physical transport to the sensors
///
/// Implementations must not block indefinitely; a scan that cannot finish
/// should return [`BusError::Timeout`].
pub trait SensorBus {
    /// Scan the bus and report which addresses answered
    fn scan(&mut self) -> Result<AddressSet, BusError>;

    /// Read one sample from an attached sensor
    ///
    /// `Ok(None)` means the device is present but has no new measurement
    /// ready; the previous value should be reused.
    fn acquire(&mut self, sensor: SensorId) -> Result<Option<SensorFrame>, ReadError>;
}

impl<B: SensorBus + ?Sized> SensorBus for &mut B {
    fn scan(&mut self) -> Result<AddressSet, BusError> {
        (**self).scan()
    }

    fn acquire(&mut self, sensor: SensorId) -> Result<Option<SensorFrame>, ReadError> {
        (**self).acquire(sensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_metric_has_one_owner() {
        for metric in Metric::ALL {
            let owner = SensorId::owner_of(metric);
            assert!(owner.metrics().contains(&metric));

            let owners = SensorId::ALL
                .iter()
                .filter(|s| s.metrics().contains(&metric))
                .count();
            assert_eq!(owners, 1);
        }
    }

    #[test]
    fn address_set_bounds() {
        let mut set = AddressSet::empty();
        assert!(set.is_empty());
        assert!(set.insert(0x62));
        assert!(set.insert(0x00));
        assert!(set.insert(0x7F));
        assert!(!set.insert(0x80));

        assert_eq!(set.len(), 3);
        assert!(set.contains(0x62));
        assert!(!set.contains(0x63));
        assert!(!set.contains(0xFF));
    }

    #[test]
    fn climate_either_address() {
        let scan = AddressSet::from_slice(&[0x77]);
        assert!(scan.contains_any(SensorId::Climate.default_addresses()));
        assert!(!scan.contains_any(SensorId::Co2.default_addresses()));

        // A sensor with no addresses is never seen
        assert!(!scan.contains_any(SensorId::Co.default_addresses()));
    }

    #[test]
    fn address_iteration_sorted() {
        let set = AddressSet::from_slice(&[0x77, 0x12, 0x62]);
        let addrs: heapless::Vec<u8, 4> = set.iter().collect();
        assert_eq!(addrs.as_slice(), &[0x12, 0x62, 0x77]);
    }

    #[test]
    fn climate_frame_converts_units() {
        let frame = SensorFrame::Climate {
            temp_c: 22.0,
            humidity_pct: 41.26,
            gas_ohms: Some(500_000.0),
        };

        let mut sample = MetricSample::empty();
        frame.fill(&mut sample, false);
        assert_eq!(sample.temp, Some(71.6));
        assert_eq!(sample.humidity, Some(41.3));
        assert_eq!(sample.voc, None);

        frame.fill(&mut sample, true);
        assert_eq!(sample.voc, Some(0.0));
    }

    #[test]
    fn frame_names_its_sensor() {
        assert_eq!(SensorFrame::Co { ppm: 1.0 }.sensor(), SensorId::Co);
        assert_eq!(SensorFrame::Particulate { pm25_ugm3: 4.0 }.sensor(), SensorId::Particulate);
        assert_eq!(SensorId::Particulate.to_string(), "pm25Sensor");
    }
}
