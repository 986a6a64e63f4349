//! Rolling Windows
//!
//! Every rolling window in the engine (per-metric history, score history) is
//! a [`CircularBuffer`] of `N` slots sized at compile time. Pushing into a
//! full window evicts the oldest value, which gives the "last N accepted
//! readings" semantics the trend analyzer and advice rules work on.
//!
//! Storage is a [`heapless::Deque`], so a window never allocates and its
//! footprint is known up front:
//!
//! ```text
//! CircularBuffer<f32, 40>  →  40 × 4 bytes + two indices
//! ```
//!
//! ```rust
//! use airscout_core::buffer::CircularBuffer;
//!
//! let mut window: CircularBuffer<f32, 3> = CircularBuffer::new();
//! for ppm in [410.0, 450.0, 480.0, 520.0] {
//!     window.push(ppm);
//! }
//!
//! // 410 was evicted
//! let kept: Vec<f32> = window.iter().copied().collect();
//! assert_eq!(kept, vec![450.0, 480.0, 520.0]);
//! assert_eq!(window.last(), Some(&520.0));
//! ```

use heapless::Deque;

/// Bounded FIFO window, oldest value first
///
/// Not thread-safe; the cycle driver is the only writer.
#[derive(Clone, Debug)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    values: Deque<T, N>,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    /// Empty window
    pub const fn new() -> Self {
        Self { values: Deque::new() }
    }

    /// Append a value, evicting the oldest when full
    pub fn push(&mut self, value: T) {
        if self.values.is_full() {
            self.values.pop_front();
        }
        // Cannot fail: a slot was freed above
        let _ = self.values.push_back(value);
    }

    /// Values held
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was pushed since the last clear
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the next push evicts a value
    pub fn is_full(&self) -> bool {
        self.values.is_full()
    }

    /// Slots, fixed at `N`
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Newest value
    pub fn last(&self) -> Option<&T> {
        self.values.back()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.values.iter()
    }

    /// Drop every value
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
