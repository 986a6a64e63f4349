//! Cross-metric advice from rolling history
//!
//! [`aggregate`] looks at whole windows rather than the current reading and
//! produces advice about persistent patterns. Metrics whose sensor is not
//! installed, and metrics with no history yet, are skipped. A repeated CO
//! pattern always leads the list.

use crate::{
    constants::{
        buffers::{MAX_ADVICE, MAX_RECOMMENDATIONS},
        thresholds::{
            ADVICE_SPIKE_COUNT, CO2_ELEVATED_PPM, CO_ELEVATED_PPM, CO_SUSTAINED_RATIO,
            HUMIDITY_HIGH_PCT, HUMIDITY_LOW_PCT, PM25_ELEVATED_UGM3, VOC_ELEVATED_INDEX,
        },
    },
    history::HistoryStore,
    sample::{Metric, MetricSet},
    trend::{is_sustained, peak_count, rolling_mean},
};

/// Improvement list returned by scoring
pub type Recommendations = heapless::Vec<&'static str, MAX_RECOMMENDATIONS>;

/// Pattern advice returned by [`aggregate`]
pub type Advice = heapless::Vec<&'static str, MAX_ADVICE>;

/// Append items not already present, keeping first occurrences
///
/// Returns how many items were added. Items beyond capacity are dropped.
pub fn merge_unique<const N: usize, I>(target: &mut heapless::Vec<&'static str, N>, items: I) -> usize
where
    I: IntoIterator<Item = &'static str>,
{
    let mut added = 0;
    for item in items {
        if target.contains(&item) {
            continue;
        }
        if target.push(item).is_err() {
            break;
        }
        added += 1;
    }
    added
}

/// Pattern advice over the rolling history of installed metrics
pub fn aggregate<const N: usize>(history: &HistoryStore<N>, installed: MetricSet) -> Advice {
    let window = |metric: Metric| {
        if installed.contains(metric) {
            history.values(metric)
        } else {
            heapless::Vec::new()
        }
    };

    let mut advice = Advice::new();

    let co = window(Metric::Co);
    if is_sustained(&co, CO_ELEVATED_PPM, CO_SUSTAINED_RATIO) {
        merge_unique(
            &mut advice,
            Some("Carbon monoxide has appeared repeatedly; combustion appliances should be inspected even if levels fluctuate."),
        );
    }

    let pm = window(Metric::Pm25);
    if !pm.is_empty() {
        if rolling_mean(&pm) > PM25_ELEVATED_UGM3 {
            merge_unique(
                &mut advice,
                Some("PM2.5 has remained elevated over time, indicating a continuous particle source rather than a brief event."),
            );
        } else if peak_count(&pm, PM25_ELEVATED_UGM3) >= ADVICE_SPIKE_COUNT {
            merge_unique(
                &mut advice,
                Some("Repeated PM2.5 spikes detected, often caused by cooking, candles, or intermittent airflow."),
            );
        }
    }

    let co2 = window(Metric::Co2);
    if !co2.is_empty() && rolling_mean(&co2) > CO2_ELEVATED_PPM {
        merge_unique(
            &mut advice,
            Some("CO₂ has remained elevated over time, suggesting insufficient ventilation for current occupancy."),
        );
    }

    let voc = window(Metric::Voc);
    if peak_count(&voc, VOC_ELEVATED_INDEX) >= ADVICE_SPIKE_COUNT {
        merge_unique(
            &mut advice,
            Some("Repeated VOC spikes detected, commonly linked to cleaners, fragrances, or off-gassing materials."),
        );
    }

    let humidity = window(Metric::Humidity);
    if !humidity.is_empty() {
        let mean = rolling_mean(&humidity);
        if mean > HUMIDITY_HIGH_PCT {
            merge_unique(
                &mut advice,
                Some("Humidity has stayed elevated over time, increasing the risk of mold growth."),
            );
        } else if mean < HUMIDITY_LOW_PCT {
            merge_unique(
                &mut advice,
                Some("Humidity has remained low, which may worsen dryness and respiratory irritation."),
            );
        }
    }

    advice
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(history: &mut HistoryStore, metric: Metric, value: f32, count: usize) {
        for _ in 0..count {
            history.push(metric, value);
        }
    }

    #[test]
    fn merge_keeps_first_occurrence() {
        let mut list: heapless::Vec<&'static str, 4> = heapless::Vec::new();
        assert_eq!(merge_unique(&mut list, ["a", "b", "a"]), 2);
        assert_eq!(merge_unique(&mut list, ["b", "c"]), 1);
        assert_eq!(list.as_slice(), &["a", "b", "c"]);
    }

    #[test]
    fn merge_stops_at_capacity() {
        let mut list: heapless::Vec<&'static str, 2> = heapless::Vec::new();
        assert_eq!(merge_unique(&mut list, ["a", "b", "c"]), 2);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn empty_history_gives_no_advice() {
        let history: HistoryStore = HistoryStore::new();
        assert!(aggregate(&history, MetricSet::all()).is_empty());
    }

    #[test]
    fn co_pattern_leads() {
        let mut history: HistoryStore = HistoryStore::new();
        fill(&mut history, Metric::Co2, 1500.0, 10);
        fill(&mut history, Metric::Co, 12.0, 10);

        let advice = aggregate(&history, MetricSet::all());
        assert_eq!(advice.len(), 2);
        assert!(advice[0].starts_with("Carbon monoxide has appeared repeatedly"));
        assert!(advice[1].starts_with("CO₂ has remained elevated"));
    }

    #[test]
    fn pm25_mean_beats_spikes() {
        let mut history: HistoryStore = HistoryStore::new();
        fill(&mut history, Metric::Pm25, 50.0, 10);
        let advice = aggregate(&history, MetricSet::all());
        assert_eq!(advice.len(), 1);
        assert!(advice[0].starts_with("PM2.5 has remained elevated"));

        let mut spiky: HistoryStore = HistoryStore::new();
        fill(&mut spiky, Metric::Pm25, 5.0, 20);
        fill(&mut spiky, Metric::Pm25, 40.0, 3);
        let advice = aggregate(&spiky, MetricSet::all());
        assert!(advice[0].starts_with("Repeated PM2.5 spikes"));
    }

    #[test]
    fn uninstalled_metrics_skipped() {
        let mut history: HistoryStore = HistoryStore::new();
        fill(&mut history, Metric::Humidity, 20.0, 10);
        fill(&mut history, Metric::Voc, 2.5, 5);

        let installed: MetricSet = [Metric::Co2].into_iter().collect();
        assert!(aggregate(&history, installed).is_empty());

        let advice = aggregate(&history, MetricSet::all());
        assert_eq!(advice.len(), 2);
        assert!(advice[0].starts_with("Repeated VOC spikes"));
        assert!(advice[1].starts_with("Humidity has remained low"));
    }
}
