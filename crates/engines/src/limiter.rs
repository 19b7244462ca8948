//! Frame-rate cap for the live loop.

use std::time::{Duration, Instant};

/// Sleeps so that successive [`FrameLimiter::wait`] calls are at least one
/// frame period apart. A rate of 0 never sleeps.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    period: Option<Duration>,
    last: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        let period = (fps > 0).then(|| Duration::from_nanos(1_000_000_000 / u64::from(fps)));
        Self { period, last: None }
    }

    pub fn unlimited() -> Self {
        Self::new(0)
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Blocks until one period has passed since the previous call, then
    /// returns the time actually slept.
    pub fn wait(&mut self) -> Duration {
        let Some(period) = self.period else {
            return Duration::ZERO;
        };
        let now = Instant::now();
        let slept = match self.last {
            Some(last) => {
                let elapsed = now.duration_since(last);
                if elapsed < period {
                    let remaining = period - elapsed;
                    std::thread::sleep(remaining);
                    remaining
                } else {
                    Duration::ZERO
                }
            }
            None => Duration::ZERO,
        };
        self.last = Some(Instant::now());
        slept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_never_sleeps() {
        let mut limiter = FrameLimiter::unlimited();
        assert!(limiter.period().is_none());
        for _ in 0..100 {
            assert_eq!(limiter.wait(), Duration::ZERO);
        }
    }

    #[test]
    fn period_matches_rate() {
        let limiter = FrameLimiter::new(50);
        assert_eq!(limiter.period(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn first_wait_returns_immediately() {
        let mut limiter = FrameLimiter::new(1);
        assert_eq!(limiter.wait(), Duration::ZERO);
    }

    #[test]
    fn consecutive_waits_are_spaced_by_the_period() {
        let mut limiter = FrameLimiter::new(100);
        limiter.wait();
        let start = Instant::now();
        limiter.wait();
        limiter.wait();
        assert!(start.elapsed() >= Duration::from_millis(19));
    }
}
