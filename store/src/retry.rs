use std::{num::NonZeroU32, time::Duration};

use rand::Rng;

/// Exponential backoff schedule with jitter for transient store failures.
///
/// The budget is a hard cap: once `max_attempts` is spent the caller gets
/// the final error back and nothing retries on its behalf.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: NonZeroU32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: NonZeroU32::new(10).unwrap(),
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Computes the sleep before retry number `attempt` (zero-based).
    ///
    /// Exponential in the attempt number, capped at `max_delay`, then
    /// jittered to 0.5x-1.5x so simultaneous cold starts don't hammer the
    /// store in lockstep.
    ///
    /// # Arguments
    /// * `attempt` - How many attempts have already failed.
    ///
    /// # Returns
    /// The jittered delay to sleep before the next attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self.initial_delay.as_secs_f64() * self.multiplier.powi(attempt as i32);
        let capped = exp.min(self.max_delay.as_secs_f64());
        let jitter = rand::rng().random_range(0.5..1.5);

        Duration::from_secs_f64(capped * jitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(initial_ms: u64, max_ms: u64) -> RetryPolicy {
        RetryPolicy {
            max_attempts: NonZeroU32::new(5).unwrap(),
            initial_delay: Duration::from_millis(initial_ms),
            max_delay: Duration::from_millis(max_ms),
            multiplier: 2.0,
        }
    }

    #[test]
    fn test_delay_stays_within_jitter_bounds() {
        let policy = policy(100, 30_000);

        for attempt in 0..5 {
            let expected = 100.0 * 2f64.powi(attempt as i32);
            let delay = policy.delay_for(attempt).as_secs_f64() * 1000.0;

            assert!(delay >= expected * 0.5, "attempt {attempt}: {delay}ms");
            assert!(delay <= expected * 1.5, "attempt {attempt}: {delay}ms");
        }
    }

    #[test]
    fn test_delay_is_capped() {
        let policy = policy(100, 400);

        // Attempt 10 would be 102400ms uncapped.
        let delay = policy.delay_for(10).as_secs_f64() * 1000.0;
        assert!(delay <= 400.0 * 1.5);
    }
}
