#![forbid(unsafe_code)]

//! Count-up tween.
//!
//! Counts a displayed integer from 0 up to `target` over `duration`, ticking
//! every [`TICK`]. Tick `k` of `n = max(1, duration / TICK)` shows
//! `floor(target * k / n)`; the final tick shows exactly `target`.
//!
//! # Invariants
//!
//! 1. Displayed values are non-decreasing and never exceed `target`.
//! 2. The last displayed value is exactly `target`.

use std::time::Duration;

use crate::schedule::TimedEffect;

/// Tick period of the tween.
pub const TICK: Duration = Duration::from_millis(16);

/// Tween length when the caller gives none.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// `duration_ms`, or [`DEFAULT_DURATION`] when absent.
pub fn duration_or_default(duration_ms: Option<u32>) -> Duration {
    duration_ms.map_or(DEFAULT_DURATION, |ms| Duration::from_millis(u64::from(ms)))
}

#[derive(Debug, Clone)]
pub struct CounterTween {
    target: u64,
    /// Tick count for the full tween; fractional like the duration ratio.
    steps: f64,
    ticks: u64,
    displayed: u64,
    done: bool,
}

impl CounterTween {
    pub fn new(target: u64, duration: Duration) -> Self {
        let steps = (duration.as_nanos() as f64 / TICK.as_nanos() as f64).max(1.0);
        Self {
            target,
            steps,
            ticks: 0,
            displayed: 0,
            done: false,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn displayed(&self) -> u64 {
        self.displayed
    }

    pub fn is_complete(&self) -> bool {
        self.done
    }
}

impl TimedEffect for CounterTween {
    /// Value to display after this tick.
    type Output = u64;

    fn pending_delay(&self) -> Option<Duration> {
        (!self.done).then_some(TICK)
    }

    fn fire(&mut self) -> u64 {
        if self.done {
            return self.displayed;
        }
        self.ticks += 1;
        let progress = self.ticks as f64 / self.steps;
        if progress >= 1.0 {
            self.displayed = self.target;
            self.done = true;
        } else {
            let value = (self.target as f64 * progress).floor() as u64;
            self.displayed = value.min(self.target).max(self.displayed);
        }
        self.displayed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_duration_uses_two_seconds() {
        assert_eq!(duration_or_default(None), Duration::from_millis(2000));
        assert_eq!(duration_or_default(Some(500)), Duration::from_millis(500));
        let mut c = CounterTween::new(100, duration_or_default(None));
        assert_eq!(c.fire(), 0);
        assert!(!c.is_complete());
    }

    #[test]
    fn zero_duration_snaps_on_first_tick() {
        let mut c = CounterTween::new(42, Duration::ZERO);
        assert_eq!(c.fire(), 42);
        assert!(c.is_complete());
        assert_eq!(c.pending_delay(), None);
    }

    #[test]
    fn zero_target_finishes_at_zero() {
        let mut c = CounterTween::new(0, Duration::from_millis(160));
        let mut last = u64::MAX;
        while c.pending_delay().is_some() {
            last = c.fire();
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn first_ticks_floor_partial_values() {
        let mut c = CounterTween::new(100, Duration::from_millis(2000));
        assert_eq!(c.fire(), 0);
        assert_eq!(c.fire(), 1);
        assert_eq!(c.fire(), 2);
    }

    #[test]
    fn fractional_step_count_still_lands_on_target() {
        let mut c = CounterTween::new(7, Duration::from_millis(1000));
        let mut n = 0;
        while c.pending_delay().is_some() {
            assert!(c.fire() <= 7);
            n += 1;
        }
        assert_eq!(c.displayed(), 7);
        assert_eq!(n, 63);
    }
}
