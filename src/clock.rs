//! Clock sources used to stamp moments.
//!
//! A counter reads its [`Clock`] exactly once per stored moment. Two
//! implementations are provided:
//!
//! - [`MonotonicClock`] - milliseconds elapsed since the clock was created,
//!   backed by [`std::time::Instant`]. This is the default.
//! - [`ManualClock`] - a settable clock whose clones share the same reading.
//!   Useful in tests and for replaying recorded timelines.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A source of non-decreasing timestamps in fractional milliseconds.
///
/// The epoch is arbitrary; only differences between readings are
/// meaningful. If an implementation goes backwards, counters report the
/// resulting ordering violations instead of hiding them.
pub trait Clock: Debug {
    /// Returns the current reading in milliseconds.
    fn now(&self) -> f64;
}

/// Wall-independent monotonic clock measuring from its creation instant.
///
/// Clones share the same epoch, so counters created from one clone produce
/// comparable timestamps.
///
/// # Examples
///
/// ```rust
/// use momenti::clock::{Clock, MonotonicClock};
///
/// let clock = MonotonicClock::new();
/// let a = clock.now();
/// let b = clock.now();
/// assert!(a <= b);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose epoch is now.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

/// Shared state behind a [`ManualClock`] and all of its clones.
#[derive(Debug, Default)]
struct ManualClockState {
    /// Current reading, stored as `f64` bits.
    millis: AtomicU64,
    /// Number of times `now()` has been called.
    reads: AtomicUsize,
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can hand one clone to a counter
/// and keep another to drive time forward. The clock also counts how many
/// times it has been read.
///
/// # Examples
///
/// ```rust
/// use momenti::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
///
/// handle.set(10.0);
/// assert_eq!(clock.now(), 10.0);
///
/// handle.advance(2.5);
/// assert_eq!(clock.now(), 12.5);
/// assert_eq!(handle.reads(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    state: Arc<ManualClockState>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock with the given initial reading.
    pub fn starting_at(millis: f64) -> Self {
        let clock = Self::new();
        clock.set(millis);
        clock
    }

    /// Sets the current reading.
    ///
    /// Setting a reading lower than a previous one is allowed; it simulates
    /// a misbehaving host clock.
    pub fn set(&self, millis: f64) {
        self.state.millis.store(millis.to_bits(), Ordering::Relaxed);
    }

    /// Moves the reading forward by `millis`.
    pub fn advance(&self, millis: f64) {
        let current = f64::from_bits(self.state.millis.load(Ordering::Relaxed));
        self.set(current + millis);
    }

    /// Returns how many times [`Clock::now`] has been called on this clock
    /// or any of its clones.
    pub fn reads(&self) -> usize {
        self.state.reads.load(Ordering::Relaxed)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.state.reads.fetch_add(1, Ordering::Relaxed);
        f64::from_bits(self.state.millis.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_never_decreases() {
        let clock = MonotonicClock::new();
        let mut last = clock.now();
        for _ in 0..1000 {
            let now = clock.now();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_monotonic_clones_share_epoch() {
        let clock = MonotonicClock::new();
        let copy = clock;
        let a = clock.now();
        let b = copy.now();
        assert!(b >= a);
    }

    #[test]
    fn test_manual_starts_at_zero() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn test_manual_starting_at() {
        let clock = ManualClock::starting_at(100.25);
        assert_eq!(clock.now(), 100.25);
    }

    #[test]
    fn test_manual_can_go_backwards() {
        let clock = ManualClock::starting_at(50.0);
        clock.set(10.0);
        assert_eq!(clock.now(), 10.0);
    }

    #[test]
    fn test_manual_counts_reads_across_clones() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.now();
        other.now();
        other.now();
        assert_eq!(clock.reads(), 3);
    }
}
