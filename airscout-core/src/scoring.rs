//! Health Score and Alert Level
//!
//! ## Overview
//!
//! [`evaluate`] turns the current sample into a 0–100 score, an itemised
//! penalty breakdown, a de-duplicated improvement list and an
//! [`AlertLevel`]. Only metrics whose owning sensor is installed and whose
//! reading is present take part. An absent reading is never scored as zero.
//!
//! ## Alert Precedence
//!
//! ```text
//! CRITICAL  co >= 35
//! WARNING   pm25 > 35 | co2 > 1200 | voc > 2.0 | co >= 9
//! NORMAL    otherwise
//! ```
//!
//! ## Penalties
//!
//! | metric | tier 1 | tier 2 |
//! |---|---|---|
//! | pm25 | > 12 → −10 | > 35 → −25 |
//! | co2 | > 800 → −10 | > 1200 → −20 |
//! | voc | > 1.0 → −10 | > 2.0 → −20 |
//! | co | ≥ 9 → −20 | ≥ 35 → −60 |
//!
//! Metrics are scored in the order pm25, co2, voc, co. CO advice goes to the
//! front of the improvement list. A CRITICAL alert caps the score at 30.
//!
//! ```rust
//! use airscout_core::history::HistoryStore;
//! use airscout_core::sample::{MetricSample, MetricSet};
//! use airscout_core::scoring::{evaluate, AlertLevel};
//!
//! let sample = MetricSample { co: Some(50.0), co2: Some(900.0), ..MetricSample::empty() };
//! let history: HistoryStore = HistoryStore::new();
//! let eval = evaluate(&sample, MetricSet::all(), &history);
//!
//! assert_eq!(eval.alert, AlertLevel::Critical);
//! assert!(eval.score <= 30);
//! ```

use crate::{
    advice::{merge_unique, Recommendations},
    constants::thresholds::{
        CO2_ELEVATED_PPM, CO2_GOOD_PPM, CO2_MODERATE_PENALTY, CO2_SEVERE_PENALTY, CO_DANGER_PENALTY,
        CO_DANGER_PPM, CO_ELEVATED_PENALTY, CO_ELEVATED_PPM, CRITICAL_SCORE_CAP,
        PM25_ELEVATED_UGM3, PM25_GOOD_UGM3, PM25_MODERATE_PENALTY, PM25_SEVERE_PENALTY, SCORE_MAX,
        SCORE_MIN, VOC_ELEVATED_INDEX, VOC_MODERATE_INDEX, VOC_MODERATE_PENALTY,
        VOC_SEVERE_PENALTY,
    },
    history::HistoryStore,
    sample::{Metric, MetricSample, MetricSet},
    severity::{self, Priority},
    trend::{diagnose, TrendDiagnosis},
};

/// Discrete safety level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum AlertLevel {
    /// No installed reading elevated
    Normal,
    /// Some reading elevated; improve ventilation
    Warning,
    /// CO at or above the danger level
    Critical,
}

impl AlertLevel {
    /// Upper-case name for display and serialization
    pub const fn label(&self) -> &'static str {
        match self {
            AlertLevel::Normal => "NORMAL",
            AlertLevel::Warning => "WARNING",
            AlertLevel::Critical => "CRITICAL",
        }
    }
}

impl core::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// One penalty line
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BreakdownEntry {
    /// Metric the penalty applies to
    pub metric: Metric,
    /// Signed point delta, always negative
    pub points: i32,
    /// Severity label for the reading
    pub label: &'static str,
    /// How much the penalty matters
    pub priority: Priority,
    /// Trend diagnosis, attached for PM2.5
    pub analysis: Option<TrendDiagnosis>,
}

impl BreakdownEntry {
    fn new(metric: Metric, points: i32, label: &'static str) -> Self {
        Self {
            metric,
            points,
            label,
            priority: Priority::from_delta(points),
            analysis: None,
        }
    }

    /// Display name of the metric
    pub const fn name(&self) -> &'static str {
        self.metric.label()
    }

    /// Colour hint from the penalty priority
    pub const fn color(&self) -> &'static str {
        self.priority.color()
    }
}

/// Penalty breakdown, one optional entry per scored metric
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoreBreakdown {
    /// Fine particulate penalty
    pub pm25: Option<BreakdownEntry>,
    /// CO₂ penalty
    pub co2: Option<BreakdownEntry>,
    /// VOC index penalty
    pub voc: Option<BreakdownEntry>,
    /// Carbon monoxide penalty
    pub co: Option<BreakdownEntry>,
}

impl ScoreBreakdown {
    /// Entries in scoring order
    pub fn iter(&self) -> impl Iterator<Item = &BreakdownEntry> {
        [&self.pm25, &self.co2, &self.voc, &self.co]
            .into_iter()
            .filter_map(|entry| entry.as_ref())
    }

    /// Entry for one metric
    pub fn get(&self, metric: Metric) -> Option<&BreakdownEntry> {
        match metric {
            Metric::Pm25 => self.pm25.as_ref(),
            Metric::Co2 => self.co2.as_ref(),
            Metric::Voc => self.voc.as_ref(),
            Metric::Co => self.co.as_ref(),
            Metric::Temp | Metric::Humidity => None,
        }
    }

    /// Number of penalised metrics
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether nothing was penalised
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all penalties
    pub fn total(&self) -> i32 {
        self.iter().map(|e| e.points).sum()
    }
}

/// Result of scoring one sample
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Evaluation {
    /// 0–100
    pub score: u8,
    /// Penalties that produced the score
    pub breakdown: ScoreBreakdown,
    /// Improvement suggestions, no duplicates
    pub recommendations: Recommendations,
    /// Safety level of the sample
    pub alert: AlertLevel,
}

/// Alert level from current readings of installed sensors
pub fn alert_level(sample: &MetricSample, installed: MetricSet) -> AlertLevel {
    alert_level_with_co_danger(sample, installed, CO_DANGER_PPM)
}

/// [`alert_level`] with CRITICAL raised at `co_danger_ppm`
pub fn alert_level_with_co_danger(
    sample: &MetricSample,
    installed: MetricSet,
    co_danger_ppm: f32,
) -> AlertLevel {
    let reading = |metric: Metric| {
        if installed.contains(metric) {
            sample.get(metric)
        } else {
            None
        }
    };
    let above = |metric: Metric, limit: f32| reading(metric).is_some_and(|v| v > limit);
    let at_least = |metric: Metric, limit: f32| reading(metric).is_some_and(|v| v >= limit);

    if at_least(Metric::Co, co_danger_ppm) {
        AlertLevel::Critical
    } else if above(Metric::Pm25, PM25_ELEVATED_UGM3)
        || above(Metric::Co2, CO2_ELEVATED_PPM)
        || above(Metric::Voc, VOC_ELEVATED_INDEX)
        || at_least(Metric::Co, CO_ELEVATED_PPM)
    {
        AlertLevel::Warning
    } else {
        AlertLevel::Normal
    }
}

/// Score the current sample
///
/// `installed` holds the metrics whose owning sensor is WARMUP, READY or
/// STALE. `history` only feeds the PM2.5 trend attached to its entry.
pub fn evaluate<const N: usize>(
    sample: &MetricSample,
    installed: MetricSet,
    history: &HistoryStore<N>,
) -> Evaluation {
    evaluate_with_co_danger(sample, installed, history, CO_DANGER_PPM)
}

/// [`evaluate`] with the CO danger level at `co_danger_ppm`
///
/// The threshold drives the CRITICAL alert and the danger penalty together.
pub fn evaluate_with_co_danger<const N: usize>(
    sample: &MetricSample,
    installed: MetricSet,
    history: &HistoryStore<N>,
    co_danger_ppm: f32,
) -> Evaluation {
    let reading = |metric: Metric| {
        if installed.contains(metric) {
            sample.get(metric)
        } else {
            None
        }
    };

    let alert = alert_level_with_co_danger(sample, installed, co_danger_ppm);
    let mut breakdown = ScoreBreakdown::default();
    let mut advice: Recommendations = heapless::Vec::new();

    if let Some(pm) = reading(Metric::Pm25) {
        let points = if pm > PM25_ELEVATED_UGM3 {
            PM25_SEVERE_PENALTY
        } else if pm > PM25_GOOD_UGM3 {
            PM25_MODERATE_PENALTY
        } else {
            0
        };

        if points != 0 {
            let analysis = diagnose(Metric::Pm25, pm, &history.values(Metric::Pm25));
            merge_unique(&mut advice, analysis.recommendations.iter().copied());

            let mut entry = BreakdownEntry::new(Metric::Pm25, points, severity::pm25(pm).label);
            entry.analysis = Some(analysis);
            breakdown.pm25 = Some(entry);
        }
    }

    if let Some(co2) = reading(Metric::Co2) {
        let (points, tip) = if co2 > CO2_ELEVATED_PPM {
            (
                CO2_SEVERE_PENALTY,
                Some("Increase fresh air ventilation; consider checking HVAC outside air settings."),
            )
        } else if co2 > CO2_GOOD_PPM {
            (
                CO2_MODERATE_PENALTY,
                Some("Ventilation could be improved (open door/window briefly or increase outside air)."),
            )
        } else {
            (0, None)
        };

        merge_unique(&mut advice, tip);
        if points != 0 {
            breakdown.co2 = Some(BreakdownEntry::new(Metric::Co2, points, severity::co2(co2).label));
        }
    }

    if let Some(voc) = reading(Metric::Voc) {
        let (points, label, tip) = if voc > VOC_ELEVATED_INDEX {
            (
                VOC_SEVERE_PENALTY,
                "High",
                Some("Reduce VOC sources (cleaners/solvents); increase ventilation; consider activated carbon filtration."),
            )
        } else if voc > VOC_MODERATE_INDEX {
            (
                VOC_MODERATE_PENALTY,
                "Elevated",
                Some("Ventilate and reduce VOC sources (fragrances, sprays, harsh cleaners)."),
            )
        } else {
            (0, "", None)
        };

        merge_unique(&mut advice, tip);
        if points != 0 {
            breakdown.voc = Some(BreakdownEntry::new(Metric::Voc, points, label));
        }
    }

    // CO last; its advice leads the list
    let mut recommendations: Recommendations = heapless::Vec::new();
    if let Some(co) = reading(Metric::Co) {
        let (points, tips): (i32, &[&'static str]) = if co >= co_danger_ppm {
            (
                CO_DANGER_PENALTY,
                &[
                    "CO is dangerous — ventilate immediately and shut off combustion sources.",
                    "Evacuate if levels remain high; verify with a calibrated meter.",
                ],
            )
        } else if co >= CO_ELEVATED_PPM {
            (
                CO_ELEVATED_PENALTY,
                &["CO detected — investigate combustion sources and improve ventilation."],
            )
        } else {
            (0, &[])
        };

        merge_unique(&mut recommendations, tips.iter().copied());
        if points != 0 {
            breakdown.co = Some(BreakdownEntry::new(Metric::Co, points, severity::co(co).label));
        }
    }
    merge_unique(&mut recommendations, advice);

    let mut score = SCORE_MAX + breakdown.total();
    if alert == AlertLevel::Critical {
        score = score.min(CRITICAL_SCORE_CAP);
    }
    let score = score.clamp(SCORE_MIN, SCORE_MAX) as u8;

    Evaluation {
        score,
        breakdown,
        recommendations,
        alert,
    }
}
