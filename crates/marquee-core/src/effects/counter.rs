//! Count-up animation for stat displays.
//!
//! Expressed as a pure step function over elapsed time: the scheduler only
//! decides when to sample, the stepping logic itself needs no timer.

use std::time::Duration;

/// Animates a displayed value from 0 to `target` in fixed-size steps.
///
/// The value increases by `target / (duration / step)` per step and is
/// clamped so it lands exactly on `target`, never past it.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    duration: Duration,
    step: Duration,
}

impl CounterAnimation {
    pub fn new(target: u64, duration: Duration, step: Duration) -> Self {
        Self {
            target,
            duration,
            step,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Displayed value after `elapsed` time
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if self.duration.is_zero() || self.step.is_zero() {
            return self.target;
        }
        let steps = (elapsed.as_millis() / self.step.as_millis()) as f64;
        let increment =
            self.target as f64 * self.step.as_secs_f64() / self.duration.as_secs_f64();
        let value = (increment * steps).floor() as u64;
        value.min(self.target)
    }

    /// True once the displayed value has reached the target
    pub fn is_done(&self, elapsed: Duration) -> bool {
        self.value_at(elapsed) >= self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_counter_ends_exactly_at_target() {
        // target 100 over 2000ms, sampled at 16ms steps
        let counter = CounterAnimation::new(100, ms(2000), ms(16));

        let mut prev = 0;
        let mut t = 0;
        while t <= 4000 {
            let value = counter.value_at(ms(t));
            assert!(value <= 100, "overshoot at t={}: {}", t, value);
            assert!(value >= prev, "not monotonic at t={}", t);
            prev = value;
            t += 16;
        }
        assert_eq!(counter.value_at(ms(2000)), 100);
        assert!(counter.is_done(ms(2000)));
    }

    #[test]
    fn test_counter_starts_at_zero() {
        let counter = CounterAnimation::new(100, ms(2000), ms(16));
        assert_eq!(counter.value_at(ms(0)), 0);
        assert!(!counter.is_done(ms(0)));
    }

    #[test]
    fn test_counter_midpoint() {
        let counter = CounterAnimation::new(100, ms(2000), ms(16));
        let mid = counter.value_at(ms(1000));
        // 62 full steps of 0.8 at t=1000
        assert_eq!(mid, 49);
    }

    #[test]
    fn test_counter_never_exceeds_after_duration() {
        let counter = CounterAnimation::new(7, ms(2000), ms(16));
        assert_eq!(counter.value_at(ms(60_000)), 7);
    }

    #[test]
    fn test_counter_zero_duration_jumps_to_target() {
        let counter = CounterAnimation::new(42, ms(0), ms(16));
        assert_eq!(counter.value_at(ms(0)), 42);
        assert!(counter.is_done(ms(0)));
    }

    #[test]
    fn test_counter_zero_target() {
        let counter = CounterAnimation::new(0, ms(2000), ms(16));
        assert_eq!(counter.value_at(ms(0)), 0);
        assert!(counter.is_done(ms(0)));
    }
}
