//! Metric samples
//!
//! A [`MetricSample`] is one polling cycle's readings. Every field is an
//! `Option`: `None` means "not measured this cycle", which is never the same
//! as a reading of zero.

use core::fmt;

/// Measured quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Metric {
    /// Carbon monoxide, ppm
    Co = 0,
    /// Carbon dioxide, ppm
    Co2 = 1,
    /// Fine particulate matter, µg/m³
    Pm25 = 2,
    /// VOC proxy index, 0–3
    Voc = 3,
    /// Air temperature, °F
    Temp = 4,
    /// Relative humidity, %
    Humidity = 5,
}

impl Metric {
    /// Every metric, in sample-key order
    pub const ALL: [Metric; 6] = [
        Metric::Co,
        Metric::Co2,
        Metric::Pm25,
        Metric::Voc,
        Metric::Temp,
        Metric::Humidity,
    ];

    /// Short key used by collaborators (`co2`, `pm25`, ...)
    pub const fn key(&self) -> &'static str {
        match self {
            Metric::Co => "co",
            Metric::Co2 => "co2",
            Metric::Pm25 => "pm25",
            Metric::Voc => "voc",
            Metric::Temp => "temp",
            Metric::Humidity => "humidity",
        }
    }

    /// Display name used in breakdown entries
    pub const fn label(&self) -> &'static str {
        match self {
            Metric::Co => "CO",
            Metric::Co2 => "CO₂",
            Metric::Pm25 => "PM2.5",
            Metric::Voc => "VOC",
            Metric::Temp => "Temperature",
            Metric::Humidity => "Humidity",
        }
    }

    /// Unit of measurement
    pub const fn unit(&self) -> &'static str {
        match self {
            Metric::Co | Metric::Co2 => "ppm",
            Metric::Pm25 => "µg/m³",
            Metric::Voc => "",
            Metric::Temp => "°F",
            Metric::Humidity => "%",
        }
    }

    /// Parse a collaborator key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }

    pub(crate) const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One polling cycle's readings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricSample {
    /// Carbon monoxide, ppm
    pub co: Option<f32>,
    /// CO₂, ppm
    pub co2: Option<f32>,
    /// PM2.5, µg/m³
    pub pm25: Option<f32>,
    /// VOC proxy, 0–3
    pub voc: Option<f32>,
    /// Temperature, °F
    pub temp: Option<f32>,
    /// Relative humidity, %
    pub humidity: Option<f32>,
}

impl MetricSample {
    /// Sample with nothing measured
    pub const fn empty() -> Self {
        Self {
            co: None,
            co2: None,
            pm25: None,
            voc: None,
            temp: None,
            humidity: None,
        }
    }

    /// Reading for one metric
    pub fn get(&self, metric: Metric) -> Option<f32> {
        match metric {
            Metric::Co => self.co,
            Metric::Co2 => self.co2,
            Metric::Pm25 => self.pm25,
            Metric::Voc => self.voc,
            Metric::Temp => self.temp,
            Metric::Humidity => self.humidity,
        }
    }

    /// Builder-style setter
    pub fn with(mut self, metric: Metric, value: Option<f32>) -> Self {
        self.set(metric, value);
        self
    }

    pub(crate) fn set(&mut self, metric: Metric, value: Option<f32>) {
        let slot = match metric {
            Metric::Co => &mut self.co,
            Metric::Co2 => &mut self.co2,
            Metric::Pm25 => &mut self.pm25,
            Metric::Voc => &mut self.voc,
            Metric::Temp => &mut self.temp,
            Metric::Humidity => &mut self.humidity,
        };
        *slot = value;
    }

    /// Present readings, in sample-key order
    pub fn readings(&self) -> impl Iterator<Item = (Metric, f32)> + '_ {
        Metric::ALL
            .into_iter()
            .filter_map(move |m| self.get(m).map(|v| (m, v)))
    }

    /// True when no metric was measured
    pub fn is_empty(&self) -> bool {
        self.readings().next().is_none()
    }
}

/// Set of metrics, one bit per [`Metric`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricSet(u8);

impl MetricSet {
    /// No metrics
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every metric
    pub const fn all() -> Self {
        Self(0b11_1111)
    }

    /// Add one metric
    pub fn insert(&mut self, metric: Metric) {
        self.0 |= 1 << metric.index();
    }

    /// Whether `metric` is set
    pub const fn contains(&self, metric: Metric) -> bool {
        self.0 & (1 << metric.index()) != 0
    }

    /// Whether no metric is set
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in [`Metric::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<Metric> for MetricSet {
    fn from_iter<I: IntoIterator<Item = Metric>>(iter: I) -> Self {
        let mut set = Self::empty();
        for metric in iter {
            set.insert(metric);
        }
        set
    }
}
