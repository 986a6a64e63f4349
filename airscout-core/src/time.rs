//! Millisecond clocks
//!
//! The engine never reads a clock itself: the cycle driver is handed `now`
//! and only compares it with the moment a sensor entered warm-up. Any
//! millisecond counter therefore works, from a boot-relative tick on a
//! microcontroller to the host's wall clock.

/// Milliseconds, since boot or since the Unix epoch depending on the source
pub type Timestamp = u64;

/// Something that can tell the cycle driver what time it is
pub trait TimeSource {
    /// Current time
    fn now(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Milliseconds between two timestamps, zero if the clock stepped backwards
pub fn elapsed_ms(earlier: Timestamp, later: Timestamp) -> u64 {
    later.saturating_sub(earlier)
}

/// Time spent warming up; a sensor with no warm-up stamp has spent none
pub fn warmup_elapsed(since: Option<Timestamp>, now: Timestamp) -> u64 {
    since.map_or(0, |since| elapsed_ms(since, now))
}

/// Milliseconds since this value was created
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicTime {
    /// Start counting from zero now
    pub fn new() -> Self {
        Self { origin: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicTime {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }
}

/// Host wall clock, Unix epoch milliseconds
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as Timestamp)
            .unwrap_or(0)
    }
}

/// Clock that only moves when told to
///
/// Drives simulated time in tests and in the simulator's fast mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedTime(Timestamp);

impl FixedTime {
    /// Clock stopped at `start`
    pub const fn new(start: Timestamp) -> Self {
        Self(start)
    }

    /// Move forward one poll interval
    pub fn advance(&mut self, ms: u64) {
        self.0 = self.0.saturating_add(ms);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_moves_by_interval() {
        let mut clock = FixedTime::new(3_000);
        clock.advance(1_500);
        clock.advance(1_500);
        assert_eq!(clock.now(), 6_000);

        clock.advance(u64::MAX);
        assert_eq!(clock.now(), u64::MAX);
    }

    #[test]
    fn backwards_clock_is_no_time() {
        assert_eq!(elapsed_ms(1_000, 2_500), 1_500);
        assert_eq!(elapsed_ms(2_500, 1_000), 0);
    }

    #[test]
    fn unstamped_warmup() {
        assert_eq!(warmup_elapsed(None, 90_000), 0);
        assert_eq!(warmup_elapsed(Some(30_000), 90_000), 60_000);
    }

    #[test]
    fn borrowed_source() {
        let clock = FixedTime::new(42);
        let by_ref: &dyn TimeSource = &clock;
        assert_eq!((&by_ref).now(), 42);
    }

    #[cfg(feature = "std")]
    #[test]
    fn monotonic_starts_near_zero() {
        assert!(MonotonicTime::new().now() < 1_000);
        assert!(SystemTime.now() > 1_600_000_000_000);
    }
}
