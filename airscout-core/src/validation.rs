//! Reading Plausibility Checks
//!
//! Drivers occasionally hand back values no real sensor can produce: a NaN
//! from a failed conversion, a negative particle count, 65535 ppm from a
//! bus glitch. Scoring such a value would raise a false alarm, so every
//! fresh reading passes through [`check_reading`] first. A rejected value
//! becomes absent for this cycle and never reaches the history.
//!
//! ## Plausible Ranges
//!
//! | metric | min | max | unit |
//! |---|---|---|---|
//! | co | 0 | 1000 | ppm |
//! | co2 | 0 | 40000 | ppm |
//! | pm25 | 0 | 1000 | µg/m³ |
//! | voc | 0 | 3 | index |
//! | temp | -40 | 185 | °F |
//! | humidity | 0 | 100 | % |
//!
//! ```rust
//! use airscout_core::sample::Metric;
//! use airscout_core::validation::check_reading;
//!
//! assert!(check_reading(Metric::Co2, 612.0).is_ok());
//! assert!(check_reading(Metric::Humidity, 140.0).is_err());
//! assert!(check_reading(Metric::Pm25, f32::NAN).is_err());
//! ```

use crate::{
    constants::sensors::{
        CO2_MAX_PPM, CO2_MIN_PPM, CO_MAX_PPM, CO_MIN_PPM, HUMIDITY_MAX_PCT, HUMIDITY_MIN_PCT,
        PM25_MAX_UGM3, PM25_MIN_UGM3, TEMP_MAX_F, TEMP_MIN_F, VOC_PROXY_MAX, VOC_PROXY_MIN,
    },
    errors::ReadingError,
    sample::{Metric, MetricSample},
    sensor::SensorFrame,
};

/// Inclusive plausible range for a metric
pub const fn plausible_range(metric: Metric) -> (f32, f32) {
    match metric {
        Metric::Co => (CO_MIN_PPM, CO_MAX_PPM),
        Metric::Co2 => (CO2_MIN_PPM, CO2_MAX_PPM),
        Metric::Pm25 => (PM25_MIN_UGM3, PM25_MAX_UGM3),
        Metric::Voc => (VOC_PROXY_MIN, VOC_PROXY_MAX),
        Metric::Temp => (TEMP_MIN_F, TEMP_MAX_F),
        Metric::Humidity => (HUMIDITY_MIN_PCT, HUMIDITY_MAX_PCT),
    }
}

/// Check if a value is within the specified range
pub fn check_range(metric: Metric, value: f32, min: f32, max: f32) -> Result<(), ReadingError> {
    if value < min || value > max {
        Err(ReadingError::OutOfRange { metric, value, min, max })
    } else {
        Ok(())
    }
}

/// Check one reading against its metric's plausible range
pub fn check_reading(metric: Metric, value: f32) -> Result<f32, ReadingError> {
    if !value.is_finite() {
        return Err(ReadingError::NotFinite { metric });
    }

    let (min, max) = plausible_range(metric);
    check_range(metric, value, min, max)?;
    Ok(value)
}

/// Check every reading a device frame carries, in sample units
///
/// The lifecycle runs this before a frame may promote its sensor or be
/// cached as the last good value.
pub fn check_frame(frame: &SensorFrame) -> Result<(), ReadingError> {
    let mut sample = MetricSample::empty();
    frame.fill(&mut sample, false);
    for (metric, value) in sample.readings() {
        check_reading(metric, value)?;
    }
    Ok(())
}

/// Drop every implausible value in a sample to absent
///
/// Returns the cleaned sample and how many values were rejected.
pub fn sanitize(sample: &MetricSample) -> (MetricSample, usize) {
    let mut clean = *sample;
    let mut rejected = 0;

    for (metric, value) in sample.readings() {
        if let Err(e) = check_reading(metric, value) {
            log_warn!("Dropping reading: {}", e);
            clean.set(metric, None);
            rejected += 1;
        }
    }

    (clean, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_check() {
        assert!(check_range(Metric::Co2, 5.0, 0.0, 10.0).is_ok());
        assert!(check_range(Metric::Co2, -1.0, 0.0, 10.0).is_err());
        assert!(check_range(Metric::Co2, 11.0, 0.0, 10.0).is_err());

        // Bounds are inclusive
        assert!(check_range(Metric::Co2, 10.0, 0.0, 10.0).is_ok());
    }

    #[test]
    fn non_finite_rejected() {
        assert_eq!(
            check_reading(Metric::Temp, f32::INFINITY),
            Err(ReadingError::NotFinite { metric: Metric::Temp })
        );
        assert!(check_reading(Metric::Voc, f32::NAN).is_err());
    }

    #[test]
    fn frames_checked_in_sample_units() {
        assert!(check_frame(&SensorFrame::Co2 { ppm: 640.0 }).is_ok());
        assert_eq!(
            check_frame(&SensorFrame::Co { ppm: f32::NAN }),
            Err(ReadingError::NotFinite { metric: Metric::Co })
        );

        // 90 °C is 194 °F, above the climate sensor's range
        let hot = SensorFrame::Climate { temp_c: 90.0, humidity_pct: 40.0, gas_ohms: None };
        assert!(matches!(
            check_frame(&hot),
            Err(ReadingError::OutOfRange { metric: Metric::Temp, .. })
        ));

        let damp = SensorFrame::Climate { temp_c: 21.0, humidity_pct: f32::NAN, gas_ohms: Some(200_000.0) };
        assert!(check_frame(&damp).is_err());
    }

    #[test]
    fn negative_particles_rejected() {
        match check_reading(Metric::Pm25, -3.0) {
            Err(ReadingError::OutOfRange { metric, min, .. }) => {
                assert_eq!(metric, Metric::Pm25);
                assert_eq!(min, 0.0);
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn sanitize_keeps_good_values() {
        let sample = MetricSample {
            co2: Some(65_535.0),
            temp: Some(71.6),
            humidity: Some(f32::NAN),
            ..MetricSample::empty()
        };

        let (clean, rejected) = sanitize(&sample);
        assert_eq!(rejected, 2);
        assert_eq!(clean.co2, None);
        assert_eq!(clean.humidity, None);
        assert_eq!(clean.temp, Some(71.6));
    }
}
