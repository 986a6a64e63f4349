//! Plain-language summary of one cycle
//!
//! A headline for the alert level, up to two readings that drive the
//! current state, the score and the top suggestions.

use core::fmt;

use crate::{
    constants::{
        buffers::{SUMMARY_DRIVERS, SUMMARY_SUGGESTIONS},
        thresholds::{CO2_GOOD_PPM, CO_ELEVATED_PPM, PM25_GOOD_UGM3, VOC_MODERATE_INDEX},
    },
    sample::{Metric, MetricSample, MetricSet},
    scoring::{AlertLevel, Evaluation},
};

/// Suggestion shown when there is nothing to do
pub const FALLBACK_SUGGESTION: &str = "Keep monitoring. No changes recommended right now.";

/// A reading pushing the score down
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Driver {
    /// Penalised metric
    pub metric: Metric,
    /// Its current reading
    pub value: f32,
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.metric.unit();
        if unit.is_empty() {
            write!(f, "{} {}", self.metric.label(), self.value)
        } else {
            write!(f, "{} {} {}", self.metric.label(), self.value, unit)
        }
    }
}

/// Headline, drivers and suggestions for the current cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContextSummary {
    /// One sentence keyed on score and alert
    pub headline: &'static str,
    /// Biggest penalties first
    pub drivers: heapless::Vec<Driver, SUMMARY_DRIVERS>,
    /// Score the summary describes
    pub score: u8,
    /// Top recommendations
    pub suggestions: heapless::Vec<&'static str, SUMMARY_SUGGESTIONS>,
}

/// Headline text for an alert level
pub const fn headline(alert: AlertLevel) -> &'static str {
    match alert {
        AlertLevel::Critical => "⛔ Immediate action recommended.",
        AlertLevel::Warning => "⚠ Air quality needs attention.",
        AlertLevel::Normal => "✓ Air quality looks good.",
    }
}

impl ContextSummary {
    /// Summarise a sample and its evaluation
    pub fn build(sample: &MetricSample, installed: MetricSet, evaluation: &Evaluation) -> Self {
        let candidates = [
            (Metric::Co, sample.co.filter(|v| *v >= CO_ELEVATED_PPM)),
            (Metric::Pm25, sample.pm25.filter(|v| *v > PM25_GOOD_UGM3)),
            (Metric::Co2, sample.co2.filter(|v| *v > CO2_GOOD_PPM)),
            (Metric::Voc, sample.voc.filter(|v| *v > VOC_MODERATE_INDEX)),
        ];

        let drivers = candidates
            .into_iter()
            .filter(|(metric, _)| installed.contains(*metric))
            .filter_map(|(metric, value)| value.map(|value| Driver { metric, value }))
            .take(SUMMARY_DRIVERS)
            .collect();

        let mut suggestions = heapless::Vec::new();
        for item in evaluation.recommendations.iter().copied() {
            let item = item.trim();
            if item.is_empty() || suggestions.contains(&item) {
                continue;
            }
            if suggestions.push(item).is_err() {
                break;
            }
        }

        Self {
            headline: headline(evaluation.alert),
            drivers,
            score: evaluation.score,
            suggestions,
        }
    }
}

impl fmt::Display for ContextSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline)?;

        if !self.drivers.is_empty() {
            f.write_str("Drivers: ")?;
            for (i, driver) in self.drivers.iter().enumerate() {
                if i > 0 {
                    f.write_str(" · ")?;
                }
                write!(f, "{}", driver)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "IAQ Score: {}/100", self.score)?;
        writeln!(f)?;
        writeln!(f, "Suggestions:")?;
        if self.suggestions.is_empty() {
            write!(f, "• {}", FALLBACK_SUGGESTION)
        } else {
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                write!(f, "• {}", suggestion)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{history::HistoryStore, scoring::evaluate};

    #[test]
    fn drivers_limited_to_two() {
        let sample = MetricSample {
            co: Some(12.0),
            pm25: Some(20.0),
            co2: Some(900.0),
            voc: Some(1.5),
            ..MetricSample::empty()
        };
        let history: HistoryStore = HistoryStore::new();
        let eval = evaluate(&sample, MetricSet::all(), &history);
        let summary = ContextSummary::build(&sample, MetricSet::all(), &eval);

        assert_eq!(summary.headline, "⚠ Air quality needs attention.");
        assert_eq!(summary.drivers.len(), 2);
        assert_eq!(summary.drivers[0].metric, Metric::Co);
        assert_eq!(summary.drivers[1].metric, Metric::Pm25);
        assert_eq!(summary.suggestions.len(), 3);
    }

    #[test]
    fn uninstalled_never_drive() {
        let sample = MetricSample { co2: Some(1500.0), ..MetricSample::empty() };
        let history: HistoryStore = HistoryStore::new();
        let installed = MetricSet::empty();
        let eval = evaluate(&sample, installed, &history);
        let summary = ContextSummary::build(&sample, installed, &eval);

        assert!(summary.drivers.is_empty());
        assert!(summary.suggestions.is_empty());
        assert_eq!(summary.score, 100);
    }

    #[test]
    fn driver_formatting() {
        let driver = Driver { metric: Metric::Co2, value: 950.0 };
        let voc = Driver { metric: Metric::Voc, value: 1.4 };

        let mut out: heapless::String<32> = heapless::String::new();
        core::fmt::write(&mut out, format_args!("{} / {}", driver, voc)).ok();
        assert_eq!(out.as_str(), "CO₂ 950 ppm / VOC 1.4");
    }

    #[cfg(feature = "std")]
    #[test]
    fn renders_fallback() {
        let sample = MetricSample { co2: Some(600.0), ..MetricSample::empty() };
        let history: HistoryStore = HistoryStore::new();
        let eval = evaluate(&sample, MetricSet::all(), &history);
        let text = ContextSummary::build(&sample, MetricSet::all(), &eval).to_string();

        assert!(text.starts_with("✓ Air quality looks good.\n"));
        assert!(text.contains("IAQ Score: 100/100"));
        assert!(text.ends_with("• Keep monitoring. No changes recommended right now."));
        assert!(!text.contains("Drivers:"));
    }
}
