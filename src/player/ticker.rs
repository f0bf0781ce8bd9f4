use std::thread;
use std::time::{Duration, Instant};

use crate::error::{CelError, CelResult};

/// Fastest refresh the wall-clock ticker accepts: one tick per millisecond.
pub const MAX_REFRESH_HZ: f64 = 1000.0;

/// Source of display-refresh timestamps, in milliseconds.
///
/// Each call blocks (or pretends to) until the next refresh and returns its
/// timestamp. Timestamps never decrease.
pub trait Ticker {
    fn next_tick(&mut self) -> f64;
}

/// Wall-clock ticker at a fixed refresh rate.
pub struct RefreshTicker {
    start: Instant,
    interval: Duration,
    next: Instant,
}

impl RefreshTicker {
    /// Fails unless `refresh_hz` is within `1..=MAX_REFRESH_HZ`.
    pub fn new(refresh_hz: f64) -> CelResult<Self> {
        if !(1.0..=MAX_REFRESH_HZ).contains(&refresh_hz) {
            return Err(CelError::InvalidRefreshRate(refresh_hz));
        }
        let interval = Duration::from_secs_f64(1.0 / refresh_hz);
        let start = Instant::now();
        Ok(RefreshTicker {
            start,
            interval,
            next: start,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left before the next refresh is due.
    pub fn until_next(&self) -> Duration {
        self.next.saturating_duration_since(Instant::now())
    }

    fn elapsed_ms(&self, at: Instant) -> f64 {
        at.duration_since(self.start).as_secs_f64() * 1000.0
    }
}

impl Ticker for RefreshTicker {
    fn next_tick(&mut self) -> f64 {
        let wait = self.until_next();
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        let now = Instant::now();
        // Skip refreshes we slept through instead of bursting to catch up.
        while self.next <= now {
            self.next += self.interval;
        }
        self.elapsed_ms(now)
    }
}

/// Simulated ticker: `start`, `start + step`, `start + 2 * step`, …
#[derive(Debug, Clone)]
pub struct FixedStepTicker {
    start: f64,
    step: f64,
    count: u64,
}

impl FixedStepTicker {
    pub fn new(start: f64, step: f64) -> Self {
        FixedStepTicker {
            start,
            step,
            count: 0,
        }
    }

    /// A ticker at `hz` refreshes per second, starting at zero.
    pub fn at_hz(hz: f64) -> Self {
        Self::new(0.0, 1000.0 / hz)
    }
}

impl Ticker for FixedStepTicker {
    fn next_tick(&mut self) -> f64 {
        // Multiply instead of accumulating so long runs don't drift.
        let ts = self.start + self.step * self.count as f64;
        self.count += 1;
        ts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_ticks_are_evenly_spaced() {
        let mut t = FixedStepTicker::new(100.0, 10.0);
        let ticks: Vec<_> = (0..4).map(|_| t.next_tick()).collect();
        assert_eq!(ticks, vec![100.0, 110.0, 120.0, 130.0]);
    }

    #[test]
    fn refresh_ticker_is_monotonic() {
        let mut t = RefreshTicker::new(500.0).unwrap();
        let a = t.next_tick();
        let b = t.next_tick();
        assert!(b >= a);
        assert!(t.until_next() <= t.interval());
    }

    #[test]
    fn refresh_ticker_rejects_unusable_rates() {
        for hz in [0.0, 0.5, -60.0, 1e12, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                RefreshTicker::new(hz),
                Err(CelError::InvalidRefreshRate(_))
            ));
        }
    }

    #[test]
    fn fastest_refresh_still_advances() {
        let mut t = RefreshTicker::new(MAX_REFRESH_HZ).unwrap();
        assert_eq!(t.interval(), Duration::from_millis(1));
        let a = t.next_tick();
        let b = t.next_tick();
        assert!(b > a);
    }
}
