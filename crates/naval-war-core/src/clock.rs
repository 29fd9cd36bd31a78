//! Game clock and production cadence.

use serde::{Deserialize, Serialize};

/// Frame time at the target rate of 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Tolerance when comparing game time against a due time, covering the
/// rounding accumulated by summing frame times.
const DUE_SLACK: f64 = 1e-6;

/// Accumulated game time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickClock {
    elapsed: f64,
}

impl TickClock {
    /// Seconds of game time so far.
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Adds `dt` and returns the new elapsed time.
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.elapsed += dt;
        self.elapsed
    }
}

/// Decides on which ticks buildings produce.
///
/// Production fires on the first tick and then once per `interval` seconds
/// of game time. Due times are laid out from the first production tick, so
/// frame quantisation never stretches the period. If a single step skips
/// past more than one due time, production fires once and the schedule
/// restarts from that tick. An interval of zero produces on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductionSchedule {
    interval: f64,
    next_at: f64,
}

impl ProductionSchedule {
    /// Creates a schedule that is due immediately.
    #[must_use]
    pub const fn new(interval: f64) -> Self {
        Self {
            interval,
            next_at: f64::NEG_INFINITY,
        }
    }

    /// Returns whether production is due at `now`, consuming the slot.
    pub fn poll(&mut self, now: f64) -> bool {
        if now + DUE_SLACK < self.next_at {
            return false;
        }
        let following = self.next_at + self.interval;
        self.next_at = if following.is_finite() && following > now {
            following
        } else {
            now + self.interval
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Steps a clock `ticks` times at `dt` and counts due polls.
    fn productions(interval: f64, ticks: usize, dt: f64) -> usize {
        let mut clock = TickClock::default();
        let mut schedule = ProductionSchedule::new(interval);
        (0..ticks)
            .filter(|_| schedule.poll(clock.advance(dt)))
            .count()
    }

    #[test]
    fn clock_accumulates() {
        let mut clock = TickClock::default();
        clock.advance(0.25);
        assert!((clock.advance(0.5) - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_interval_is_every_tick() {
        let mut schedule = ProductionSchedule::new(0.0);
        let due = (0..10).filter(|i| schedule.poll(f64::from(*i) * FIXED_DT)).count();
        assert_eq!(due, 10);
    }

    #[test]
    fn interval_paces_production() {
        let mut schedule = ProductionSchedule::new(0.1);
        let due: Vec<_> = (1..=60)
            .filter(|i| schedule.poll(f64::from(*i) * FIXED_DT))
            .collect();
        assert_eq!(due, vec![1, 7, 13, 19, 25, 31, 37, 43, 49, 55]);
    }

    #[test]
    fn ten_hertz_holds_over_long_runs() {
        assert_eq!(productions(0.1, 6000, FIXED_DT), 1000);
        assert_eq!(productions(0.1, 60_000, FIXED_DT), 10_000);
    }

    #[test]
    fn large_steps_do_not_burst() {
        // Each 0.35 s step spans three intervals but produces once.
        assert_eq!(productions(0.1, 20, 0.35), 20);
    }

    #[test]
    fn first_poll_is_due() {
        let mut schedule = ProductionSchedule::new(5.0);
        assert!(schedule.poll(0.0));
        assert!(!schedule.poll(1.0));
        assert!(schedule.poll(5.0));
    }
}
