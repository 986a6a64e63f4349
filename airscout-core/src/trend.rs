//! Trend Analysis over Rolling Windows
//!
//! ## Overview
//!
//! [`diagnose`] classifies the recent behaviour of one metric into a short,
//! structured [`TrendDiagnosis`]: a status label, how confident the call is,
//! a summary, the likely health impact and what to do about it.
//!
//! ## Window Statistics
//!
//! ```text
//! mean       = Σ values / len
//! peaks      = count(v >= threshold)
//! sustained  = peaks / len >= ratio
//! recent     = any(v > threshold) over the newest 5 values
//! swing      = max - min
//! ```
//!
//! Note the asymmetry: peaks count values *at or above* the threshold, the
//! recent check looks for values strictly above it.
//!
//! ## Rule Precedence
//!
//! Checks run in a fixed, metric-specific order and the first match wins.
//! Safety-critical checks come first: CO at danger level is reported as
//! "Dangerous" even when the window also shows a sustained pattern.
//!
//! | metric | threshold | sustained ratio | order |
//! |---|---|---|---|
//! | pm25 | 35 | 0.75 | sustained, spikes (≥5 peaks), recent, mean ≤ 12, moderate |
//! | co2 | 1200 | 0.70 | sustained, current > 1200, recent, current > 800, healthy |
//! | voc | 2.0 | 0.60 | sustained, current > 2.0, recent, mean ≤ 1.0, moderate |
//! | co | 9 | 0.30 | current ≥ 35, sustained, current ≥ 9, safe |
//! | humidity | — | — | mean > 55, mean < 30, optimal |
//! | temp | — | — | mean > 78, mean < 68, swing > 6, comfortable |
//!
//! ## Confidence
//!
//! - fewer than 5 values: "Initial reading", Low, no recommendations
//! - 5 to 19 values: Medium
//! - 20 or more: High
//!
//! ```rust
//! use airscout_core::sample::Metric;
//! use airscout_core::trend::{diagnose, Confidence};
//!
//! let window = [1300.0_f32; 30];
//! let diagnosis = diagnose(Metric::Co2, 1300.0, &window);
//! assert_eq!(diagnosis.status, "Sustained elevation");
//! assert_eq!(diagnosis.confidence, Confidence::High);
//! ```

use crate::{
    constants::{
        buffers::{
            MAX_TREND_RECOMMENDATIONS, TREND_HIGH_CONFIDENCE_SAMPLES, TREND_MIN_SAMPLES,
            TREND_RECENT_WINDOW,
        },
        thresholds::{
            CO2_ELEVATED_PPM, CO2_GOOD_PPM, CO2_SUSTAINED_RATIO, CO_DANGER_PPM, CO_ELEVATED_PPM,
            CO_SUSTAINED_RATIO, HUMIDITY_HIGH_PCT, HUMIDITY_LOW_PCT, PM25_ELEVATED_UGM3,
            PM25_GOOD_UGM3, PM25_SPIKE_COUNT, PM25_SUSTAINED_RATIO, TEMP_COMFORT_MAX_F,
            TEMP_COMFORT_MIN_F, TEMP_MAX_SWING_F, VOC_ELEVATED_INDEX, VOC_MODERATE_INDEX,
            VOC_SUSTAINED_RATIO,
        },
    },
    sample::Metric,
};

/// Window label before enough history exists
pub const WINDOW_INSTANT: &str = "Instant";

/// Window label for a rolling diagnosis
pub const WINDOW_ROLLING: &str = "Rolling (~1 min)";

/// Status label while history is too short
pub const STATUS_INITIAL: &str = "Initial reading";

/// How much history backs a diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Confidence {
    /// Below [`TREND_MIN_SAMPLES`] values
    Low,
    /// Enough for a trend, short of [`TREND_HIGH_CONFIDENCE_SAMPLES`]
    Medium,
    /// At least [`TREND_HIGH_CONFIDENCE_SAMPLES`] values
    High,
}

impl Confidence {
    /// Confidence for a window of `len` values
    pub const fn for_len(len: usize) -> Self {
        if len < TREND_MIN_SAMPLES {
            Confidence::Low
        } else if len < TREND_HIGH_CONFIDENCE_SAMPLES {
            Confidence::Medium
        } else {
            Confidence::High
        }
    }
}

/// Recommendations attached to one diagnosis
pub type TrendRecommendations = heapless::Vec<&'static str, MAX_TREND_RECOMMENDATIONS>;

/// Structured result of analysing one metric
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrendDiagnosis {
    /// Short label such as "Sustained elevation"
    pub status: &'static str,
    /// How far the history supports the label
    pub confidence: Confidence,
    /// One-sentence explanation
    pub summary: &'static str,
    /// Health context for the label
    pub health: &'static str,
    /// Actions for this pattern
    pub recommendations: TrendRecommendations,
    /// Span of history the diagnosis covers
    pub window: &'static str,
}

impl TrendDiagnosis {
    /// True for the fixed short-history diagnosis
    pub fn is_initial(&self) -> bool {
        self.status == STATUS_INITIAL
    }
}

/// Static text of one rule outcome
struct Finding {
    status: &'static str,
    summary: &'static str,
    health: &'static str,
    recommendations: &'static [&'static str],
}

const fn finding(
    status: &'static str,
    summary: &'static str,
    health: &'static str,
    recommendations: &'static [&'static str],
) -> Finding {
    Finding { status, summary, health, recommendations }
}

/// Arithmetic mean, 0.0 for an empty window
pub fn rolling_mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Values at or above `threshold`
pub fn peak_count(values: &[f32], threshold: f32) -> usize {
    values.iter().filter(|v| **v >= threshold).count()
}

/// Whether the share of peaks reaches `ratio`; never for an empty window
pub fn is_sustained(values: &[f32], threshold: f32, ratio: f32) -> bool {
    if values.is_empty() {
        return false;
    }
    peak_count(values, threshold) as f32 / values.len() as f32 >= ratio
}

/// Whether any of the newest values is strictly above `threshold`
pub fn recently_above(values: &[f32], threshold: f32) -> bool {
    let start = values.len().saturating_sub(TREND_RECENT_WINDOW);
    values[start..].iter().any(|v| *v > threshold)
}

/// Spread between the largest and smallest value
pub fn swing(values: &[f32]) -> f32 {
    let (min, max) = values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    if values.is_empty() {
        0.0
    } else {
        max - min
    }
}

/// Fixed diagnosis used until enough history exists
pub fn initial(metric: Metric) -> TrendDiagnosis {
    let (summary, health) = initial_text(metric);
    TrendDiagnosis {
        status: STATUS_INITIAL,
        confidence: Confidence::Low,
        summary,
        health,
        recommendations: heapless::Vec::new(),
        window: WINDOW_INSTANT,
    }
}

/// Diagnose one metric from its current value and rolling history
///
/// `history` is oldest first. With fewer than five values the fixed
/// "Initial reading" diagnosis is returned whatever `current` is.
pub fn diagnose(metric: Metric, current: f32, history: &[f32]) -> TrendDiagnosis {
    diagnose_with_co_danger(metric, current, history, CO_DANGER_PPM)
}

/// [`diagnose`] with CO reported "Dangerous" from `co_danger_ppm`
pub fn diagnose_with_co_danger(
    metric: Metric,
    current: f32,
    history: &[f32],
    co_danger_ppm: f32,
) -> TrendDiagnosis {
    if history.len() < TREND_MIN_SAMPLES {
        return initial(metric);
    }

    let found = match metric {
        Metric::Pm25 => pm25(history),
        Metric::Co2 => co2(current, history),
        Metric::Voc => voc(current, history),
        Metric::Humidity => humidity(history),
        Metric::Temp => temperature(history),
        Metric::Co => co(current, history, co_danger_ppm),
    };

    let mut recommendations = heapless::Vec::new();
    for rec in found.recommendations.iter().take(MAX_TREND_RECOMMENDATIONS) {
        let _ = recommendations.push(*rec);
    }

    TrendDiagnosis {
        status: found.status,
        confidence: Confidence::for_len(history.len()),
        summary: found.summary,
        health: found.health,
        recommendations,
        window: WINDOW_ROLLING,
    }
}

fn initial_text(metric: Metric) -> (&'static str, &'static str) {
    match metric {
        Metric::Pm25 => (
            "Not enough data collected to determine trends yet.",
            "Short-term exposure risk cannot yet be assessed.",
        ),
        Metric::Co2 => (
            "Not enough data collected to determine ventilation trends yet.",
            "Short-term CO₂ exposure at this level cannot yet be assessed.",
        ),
        Metric::Voc => (
            "Not enough data collected to determine VOC trends yet.",
            "Short-term VOC exposure risk cannot yet be assessed.",
        ),
        Metric::Humidity => (
            "Not enough data to determine humidity trends yet.",
            "Short-term comfort impact only.",
        ),
        Metric::Temp => (
            "Not enough data to determine temperature stability yet.",
            "Comfort impact only.",
        ),
        Metric::Co => (
            "Not enough data collected to determine CO patterns yet.",
            "Carbon monoxide exposure risk cannot yet be assessed.",
        ),
    }
}

fn pm25(values: &[f32]) -> Finding {
    let threshold = PM25_ELEVATED_UGM3;

    if is_sustained(values, threshold, PM25_SUSTAINED_RATIO) {
        finding(
            "Sustained elevation",
            "PM2.5 levels have remained consistently elevated over time.",
            "Longer exposure to elevated PM2.5 increases risk of respiratory and cardiovascular stress.",
            &["Continuous filtration with a HEPA purifier is strongly recommended."],
        )
    } else if peak_count(values, threshold) >= PM25_SPIKE_COUNT {
        finding(
            "Repeated spikes",
            "Multiple PM2.5 spikes detected, suggesting intermittent particle sources.",
            "Short-term spikes may aggravate asthma and sensitive individuals.",
            &["Identify intermittent sources such as cooking, candles, or dust disturbance."],
        )
    } else if recently_above(values, threshold) {
        finding(
            "Recently elevated",
            "PM2.5 was elevated recently but is now declining.",
            "Recent exposure may still affect sensitive individuals.",
            &["Continue ventilation or filtration to ensure levels remain low."],
        )
    } else if rolling_mean(values) <= PM25_GOOD_UGM3 {
        finding(
            "Stable / Healthy",
            "PM2.5 levels have remained consistently low.",
            "Air quality is within healthy limits for extended exposure.",
            &[],
        )
    } else {
        finding(
            "Moderate elevation",
            "PM2.5 levels are moderately elevated but not persistently high.",
            "Sensitive individuals may experience irritation or discomfort.",
            &[],
        )
    }
}

fn co2(current: f32, values: &[f32]) -> Finding {
    let threshold = CO2_ELEVATED_PPM;

    if is_sustained(values, threshold, CO2_SUSTAINED_RATIO) {
        finding(
            "Sustained elevation",
            "CO₂ levels have remained consistently elevated, indicating insufficient ventilation.",
            "Prolonged elevated CO₂ may cause fatigue, headaches, and reduced cognitive performance.",
            &[
                "Increase fresh air ventilation (open windows or doors where safe).",
                "Inspect HVAC outside-air intake and damper operation.",
            ],
        )
    } else if current > threshold {
        finding(
            "High",
            "CO₂ is currently elevated, suggesting poor air exchange.",
            "Short-term exposure may reduce concentration and cause drowsiness.",
            &["Ventilate the space to reduce CO₂ buildup."],
        )
    } else if recently_above(values, threshold) {
        finding(
            "Recently elevated",
            "CO₂ levels were elevated recently but are now improving.",
            "Recent exposure may still affect comfort and alertness.",
            &["Continue ventilation to ensure levels remain stable."],
        )
    } else if current > CO2_GOOD_PPM {
        finding(
            "Moderate",
            "CO₂ is moderately elevated and may increase with occupancy.",
            "Sensitive individuals may notice mild fatigue.",
            &[],
        )
    } else {
        finding(
            "Healthy",
            "CO₂ levels indicate adequate ventilation.",
            "Air quality supports comfort and cognitive performance.",
            &[],
        )
    }
}

fn voc(current: f32, values: &[f32]) -> Finding {
    let threshold = VOC_ELEVATED_INDEX;

    if is_sustained(values, threshold, VOC_SUSTAINED_RATIO) {
        finding(
            "Sustained elevation",
            "VOC levels have remained consistently elevated over time.",
            "Prolonged exposure to elevated VOCs may irritate airways and increase headaches or nausea.",
            &[
                "Increase ventilation to remove indoor VOC buildup.",
                "Reduce or eliminate VOC sources (cleaners, fragrances, solvents).",
                "Consider activated carbon or charcoal filtration.",
            ],
        )
    } else if current > threshold {
        finding(
            "High",
            "VOC levels are currently elevated.",
            "Short-term exposure may irritate eyes, throat, or sensitive individuals.",
            &["Ventilate the space and reduce active VOC sources."],
        )
    } else if recently_above(values, threshold) {
        finding(
            "Recently elevated",
            "VOC levels were elevated recently but are now declining.",
            "Recent exposure may still cause mild irritation.",
            &["Continue ventilation until VOC levels stabilize."],
        )
    } else if rolling_mean(values) <= VOC_MODERATE_INDEX {
        finding(
            "Stable / Healthy",
            "VOC levels have remained consistently low.",
            "Air quality supports comfort with minimal chemical exposure.",
            &[],
        )
    } else {
        finding(
            "Moderate elevation",
            "VOC levels are moderately elevated but not persistently high.",
            "Some individuals may experience mild irritation or odor sensitivity.",
            &[],
        )
    }
}

fn humidity(values: &[f32]) -> Finding {
    let mean = rolling_mean(values);

    if mean > HUMIDITY_HIGH_PCT {
        finding(
            "High",
            "Humidity has remained elevated.",
            "High humidity increases mold risk and discomfort.",
            &[
                "Reduce humidity with dehumidification.",
                "Check HVAC condensate drainage and airflow.",
            ],
        )
    } else if mean < HUMIDITY_LOW_PCT {
        finding(
            "Low",
            "Humidity has remained low.",
            "Low humidity may cause dry skin and respiratory irritation.",
            &["Increase humidity using a humidifier or controlled ventilation."],
        )
    } else {
        finding(
            "Optimal",
            "Humidity is within the ideal comfort range.",
            "Supports comfort and respiratory health.",
            &[],
        )
    }
}

fn temperature(values: &[f32]) -> Finding {
    let mean = rolling_mean(values);

    if mean > TEMP_COMFORT_MAX_F {
        finding(
            "Warm",
            "Temperature is consistently above comfort range.",
            "May reduce comfort and increase fatigue.",
            &["Improve cooling or reduce internal heat loads."],
        )
    } else if mean < TEMP_COMFORT_MIN_F {
        finding(
            "Cool",
            "Temperature is consistently below comfort range.",
            "May cause discomfort or cold stress.",
            &["Increase heating or reduce drafts."],
        )
    } else if swing(values) > TEMP_MAX_SWING_F {
        finding(
            "Unstable",
            "Noticeable temperature swings detected.",
            "Fluctuations may reduce comfort.",
            &["Check thermostat placement and HVAC cycling."],
        )
    } else {
        finding(
            "Comfortable",
            "Temperature is stable and within comfort range.",
            "Supports comfort and productivity.",
            &[],
        )
    }
}

fn co(current: f32, values: &[f32], danger_ppm: f32) -> Finding {
    if current >= danger_ppm {
        finding(
            "Dangerous",
            "Carbon monoxide is currently at a dangerous level.",
            "High CO levels can cause dizziness, nausea, confusion, and loss of consciousness.",
            &[
                "Ventilate immediately and shut off combustion sources.",
                "Evacuate the space if levels do not drop quickly.",
                "Verify readings with a calibrated CO meter.",
            ],
        )
    } else if is_sustained(values, CO_ELEVATED_PPM, CO_SUSTAINED_RATIO) {
        finding(
            "Repeated detection",
            "Carbon monoxide has been detected repeatedly over time.",
            "Repeated low-level CO exposure can cause headaches, fatigue, and long-term health risks.",
            &[
                "Inspect combustion appliances and exhaust systems.",
                "Ensure proper ventilation in the space.",
            ],
        )
    } else if current >= CO_ELEVATED_PPM {
        finding(
            "Elevated",
            "Carbon monoxide is currently elevated.",
            "Even moderate CO levels may cause symptoms in sensitive individuals.",
            &["Investigate possible combustion sources and improve ventilation."],
        )
    } else {
        finding(
            "Safe",
            "Carbon monoxide levels are within safe limits.",
            "No health effects expected at current levels.",
            &[],
        )
    }
}
