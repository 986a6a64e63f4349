//! Severity bands and penalty priority
//!
//! Each scored metric maps a reading onto a labelled band with a colour
//! hint for the display and a one-line description. Breakdown labels come
//! from these bands.

use crate::constants::thresholds::{
    CO2_ELEVATED_PPM, CO2_GOOD_PPM, CO_DANGER_PPM, CO_ELEVATED_PPM, HUMIDITY_LOW_PCT,
    HUMIDITY_OPTIMAL_MAX_PCT, PENALTY_MAJOR, PENALTY_MODERATE, PM25_ELEVATED_UGM3,
    PM25_GOOD_UGM3, PM25_POOR_UGM3,
};

/// Display colour hints
pub mod colors {
    /// Green
    pub const GOOD: &str = "#4caf50";
    /// Yellow
    pub const CAUTION: &str = "#ffeb3b";
    /// Orange
    pub const WARNING: &str = "#ff9800";
    /// Red
    pub const DANGER: &str = "#f44336";
    /// Light blue
    pub const LOW: &str = "#03a9f4";
}

/// One severity band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Severity {
    /// Band name, e.g. "Moderate"
    pub label: &'static str,
    /// Display colour hint
    pub color: &'static str,
    /// One-line explanation
    pub description: &'static str,
}

const fn band(label: &'static str, color: &'static str, description: &'static str) -> Severity {
    Severity { label, color, description }
}

/// PM2.5 band, µg/m³
pub fn pm25(value: f32) -> Severity {
    if value <= PM25_GOOD_UGM3 {
        band("Good", colors::GOOD, "Air quality is healthy.")
    } else if value <= PM25_ELEVATED_UGM3 {
        band("Moderate", colors::CAUTION, "Sensitive individuals may be affected.")
    } else if value <= PM25_POOR_UGM3 {
        band("Poor", colors::WARNING, "Unhealthy for sensitive groups.")
    } else {
        band("Unhealthy", colors::DANGER, "Unhealthy for everyone.")
    }
}

/// CO₂ band, ppm
pub fn co2(value: f32) -> Severity {
    if value <= CO2_GOOD_PPM {
        band("Good", colors::GOOD, "Ventilation is adequate.")
    } else if value <= CO2_ELEVATED_PPM {
        band("Elevated", colors::WARNING, "Ventilation could be improved.")
    } else {
        band("High", colors::DANGER, "Fresh air strongly recommended.")
    }
}

/// Relative humidity band, %
pub fn humidity(value: f32) -> Severity {
    if (HUMIDITY_LOW_PCT..=HUMIDITY_OPTIMAL_MAX_PCT).contains(&value) {
        band("Optimal", colors::GOOD, "Comfortable humidity level.")
    } else if value < HUMIDITY_LOW_PCT {
        band("Low", colors::LOW, "May cause dry skin and irritation.")
    } else {
        band("High", colors::WARNING, "May encourage mold growth.")
    }
}

/// CO band, ppm
pub fn co(value: f32) -> Severity {
    if value <= CO_ELEVATED_PPM {
        band("Safe", colors::GOOD, "Carbon monoxide levels are safe.")
    } else if value <= CO_DANGER_PPM {
        band("Elevated", colors::WARNING, "CO detected — investigate sources.")
    } else {
        band("Danger", colors::DANGER, "Dangerous CO levels — ventilate immediately.")
    }
}

/// How much a penalty matters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Priority {
    /// Less than ten points
    Minor,
    /// Ten to nineteen points
    Moderate,
    /// Twenty points or more
    Major,
}

impl Priority {
    /// Priority for a signed point delta
    pub const fn from_delta(delta: i32) -> Self {
        if delta <= PENALTY_MAJOR {
            Priority::Major
        } else if delta <= PENALTY_MODERATE {
            Priority::Moderate
        } else {
            Priority::Minor
        }
    }

    /// Colour hint for the display
    pub const fn color(&self) -> &'static str {
        match self {
            Priority::Major => colors::DANGER,
            Priority::Moderate => colors::WARNING,
            Priority::Minor => colors::CAUTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pm25_band_edges() {
        assert_eq!(pm25(12.0).label, "Good");
        assert_eq!(pm25(12.1).label, "Moderate");
        assert_eq!(pm25(35.0).label, "Moderate");
        assert_eq!(pm25(55.0).label, "Poor");
        assert_eq!(pm25(55.1).color, colors::DANGER);
    }

    #[test]
    fn co2_band_edges() {
        assert_eq!(co2(800.0).label, "Good");
        assert_eq!(co2(1200.0).label, "Elevated");
        assert_eq!(co2(1201.0).label, "High");
    }

    #[test]
    fn humidity_bands() {
        assert_eq!(humidity(30.0).label, "Optimal");
        assert_eq!(humidity(50.0).label, "Optimal");
        assert_eq!(humidity(29.9).color, colors::LOW);
        assert_eq!(humidity(50.1).label, "High");
    }

    #[test]
    fn co_bands() {
        assert_eq!(co(9.0).label, "Safe");
        assert_eq!(co(35.0).label, "Elevated");
        assert_eq!(co(50.0).label, "Danger");
    }

    #[test]
    fn priority_from_delta() {
        assert_eq!(Priority::from_delta(-60), Priority::Major);
        assert_eq!(Priority::from_delta(-20), Priority::Major);
        assert_eq!(Priority::from_delta(-10), Priority::Moderate);
        assert_eq!(Priority::from_delta(-5), Priority::Minor);
        assert_eq!(Priority::Major.color(), "#f44336");
    }
}
