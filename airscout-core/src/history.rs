//! Rolling per-metric history
//!
//! One [`CircularBuffer`] per metric holding the last `N` accepted values.
//! Only present readings are appended, so the windows of different metrics
//! can have different lengths. The cycle driver is the only writer.

use crate::{
    buffer::CircularBuffer,
    constants::buffers::HISTORY_CAPACITY,
    sample::{Metric, MetricSample},
};

/// Fixed-capacity history windows, one per metric
#[derive(Debug, Clone)]
pub struct HistoryStore<const N: usize = HISTORY_CAPACITY> {
    windows: [CircularBuffer<f32, N>; 6],
}

impl<const N: usize> HistoryStore<N> {
    /// Empty store
    pub const fn new() -> Self {
        Self {
            windows: [
                CircularBuffer::new(),
                CircularBuffer::new(),
                CircularBuffer::new(),
                CircularBuffer::new(),
                CircularBuffer::new(),
                CircularBuffer::new(),
            ],
        }
    }

    /// Append every present value of `sample`; absent values are skipped
    pub fn record_accepted(&mut self, sample: &MetricSample) {
        for (metric, value) in sample.readings() {
            self.push(metric, value);
        }
    }

    /// Append a single value
    pub fn push(&mut self, metric: Metric, value: f32) {
        self.windows[metric.index()].push(value);
    }

    /// Raw window for one metric
    pub fn window(&self, metric: Metric) -> &CircularBuffer<f32, N> {
        &self.windows[metric.index()]
    }

    /// Copy of one metric's window, oldest first
    pub fn values(&self, metric: Metric) -> heapless::Vec<f32, N> {
        let mut out = heapless::Vec::new();
        for value in self.window(metric).iter() {
            // Window length never exceeds N
            let _ = out.push(*value);
        }
        out
    }

    /// Number of stored values for one metric
    pub fn len(&self, metric: Metric) -> usize {
        self.window(metric).len()
    }

    /// Most recent stored value
    pub fn last(&self, metric: Metric) -> Option<f32> {
        self.window(metric).last().copied()
    }

    /// True when no metric has any history
    pub fn is_empty(&self) -> bool {
        self.windows.iter().all(|w| w.is_empty())
    }

    /// Drop all history
    pub fn clear(&mut self) {
        for window in self.windows.iter_mut() {
            window.clear();
        }
    }
}

impl<const N: usize> Default for HistoryStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_not_appended() {
        let mut history: HistoryStore = HistoryStore::new();
        let sample = MetricSample {
            co2: Some(700.0),
            pm25: None,
            ..MetricSample::empty()
        };

        history.record_accepted(&sample);
        assert_eq!(history.len(Metric::Co2), 1);
        assert_eq!(history.len(Metric::Pm25), 0);
        assert!(!history.is_empty());
    }

    #[test]
    fn oldest_dropped_at_capacity() {
        let mut history: HistoryStore = HistoryStore::new();
        for i in 0..=HISTORY_CAPACITY {
            history.push(Metric::Co2, i as f32);
        }

        let values = history.values(Metric::Co2);
        assert_eq!(values.len(), HISTORY_CAPACITY);
        assert_eq!(values[0], 1.0);
        assert_eq!(history.last(Metric::Co2), Some(HISTORY_CAPACITY as f32));
    }

    #[test]
    fn metrics_independent() {
        let mut history = HistoryStore::<4>::new();
        history.push(Metric::Temp, 70.0);
        history.push(Metric::Humidity, 40.0);
        history.push(Metric::Humidity, 41.0);

        assert_eq!(history.values(Metric::Temp).as_slice(), &[70.0]);
        assert_eq!(history.values(Metric::Humidity).as_slice(), &[40.0, 41.0]);

        history.clear();
        assert!(history.is_empty());
    }
}
