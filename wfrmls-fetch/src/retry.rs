//! Retry strategies for OData requests.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use wfrmls_core::ApiError;

/// Strategy for retrying transient failures.
///
/// `max_retries` counts retries after the first attempt, so a call makes
/// at most `max_retries + 1` attempts.
#[derive(Debug, Clone)]
pub struct RetryStrategy {
    /// Maximum number of retries.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound for computed backoff delays.
    pub max_delay: Duration,
    /// Random extra delay, as a fraction of the computed delay (0.0 to 1.0).
    pub jitter: f64,
}

impl RetryStrategy {
    /// Creates a new retry strategy.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            jitter: 0.25,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            jitter: 0.0,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the maximum delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the jitter factor, clamped to 0.0..=1.0.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = if jitter.is_finite() { jitter.clamp(0.0, 1.0) } else { 0.0 };
        self
    }

    /// Returns true if another attempt is allowed after `attempt` attempts.
    pub fn can_retry(&self, attempt: u32) -> bool {
        attempt <= self.max_retries
    }

    /// Calculates the backoff for a given attempt number, without jitter.
    ///
    /// Attempt 1 waits `base_delay`, doubling each attempt up to `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Calculates the backoff for a given attempt number with random jitter.
    pub fn jittered_delay(&self, attempt: u32) -> Duration {
        let delay = self.delay_for_attempt(attempt);
        if self.jitter <= 0.0 {
            return delay;
        }
        let factor = rand::thread_rng().gen_range(0.0..=self.jitter);
        (delay + delay.mul_f64(factor)).min(self.max_delay)
    }

    /// Returns how long to wait before retrying after `error`.
    ///
    /// A rate-limit `Retry-After` hint is used as-is; otherwise backoff applies.
    pub fn delay_for(&self, error: &ApiError, attempt: u32) -> Duration {
        error
            .retry_after()
            .unwrap_or_else(|| self.jittered_delay(attempt))
    }
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Parses a `Retry-After` header value: delta-seconds or an HTTP-date.
///
/// Returns `None` for negative, past, or unparseable values.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let trimmed = value.trim();

    if let Ok(seconds) = trimmed.parse::<i64>() {
        return u64::try_from(seconds).ok().map(Duration::from_secs);
    }

    let date = DateTime::parse_from_rfc2822(trimmed).ok()?;
    (date.with_timezone(&Utc) - Utc::now()).to_std().ok()
}
