//! Retry loop with exponential backoff, ceiling and jitter.
//!
//! Every upstream exchange runs inside [`RetryPolicy::run`]. The exchange
//! reports each failure as either [`AttemptError::Abort`] (stop now, the
//! answer is final) or [`AttemptError::Retry`] (transient, try again while
//! attempts remain).

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, error, warn};

use crate::error::{GatewayError, Result, UpstreamError};

/// Outcome of a failed attempt.
#[derive(Debug)]
pub enum AttemptError {
    /// Final answer; returned to the caller without further attempts.
    Abort(GatewayError),
    /// Transient failure; retried while the budget lasts.
    Retry(UpstreamError),
}

impl From<UpstreamError> for AttemptError {
    fn from(err: UpstreamError) -> Self {
        Self::Retry(err)
    }
}

impl From<reqwest::Error> for AttemptError {
    fn from(err: reqwest::Error) -> Self {
        Self::Retry(UpstreamError::Http(err))
    }
}

impl From<serde_json::Error> for AttemptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Retry(UpstreamError::Decode(err))
    }
}

/// Bounded retry policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Wait before the first retry.
    pub base_delay: Duration,
    /// Growth factor applied to the wait after every failed attempt.
    pub multiplier: f64,
    /// Ceiling for any single wait.
    pub max_delay: Duration,
    /// Randomise each wait between 1x and `multiplier`x of its computed value.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(10),
            multiplier: 2.0,
            max_delay: Duration::from_secs(60),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Policy that retries `max_attempts` times without waiting.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            multiplier: 1.0,
            max_delay: Duration::ZERO,
            jitter: false,
        }
    }

    /// Wait after failed attempt `attempt` (1-based), before jitter.
    ///
    /// `base * multiplier^(attempt - 1)`, capped at `max_delay`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let secs = self.base_delay.as_secs_f64() * self.multiplier.powi(exponent);
        self.cap(secs)
    }

    /// Wait after failed attempt `attempt` (1-based), jitter included.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self.backoff(attempt);
        if !self.jitter || !self.multiplier.is_finite() || self.multiplier <= 1.0 || delay.is_zero() {
            return delay;
        }
        let factor = rand::rng().random_range(1.0..self.multiplier);
        self.cap(delay.as_secs_f64() * factor)
    }

    /// Check if another attempt may follow failed attempt `attempt` (1-based).
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Run `attempt` until it succeeds, aborts, or the budget is spent.
    ///
    /// `operation` names the call in logs and in the surfaced failure.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, AttemptError>>,
    {
        let mut number = 1;
        loop {
            debug!("{operation}: attempt {number}/{}", self.max_attempts);

            let cause = match attempt().await {
                Ok(value) => return Ok(value),
                Err(AttemptError::Abort(err)) => return Err(err),
                Err(AttemptError::Retry(cause)) => cause,
            };

            if !self.should_retry(number) {
                error!("{operation} failed after {number} attempts: {cause}");
                return Err(GatewayError::upstream(format!("Failed to {operation}"), cause));
            }

            let delay = self.delay_for_attempt(number);
            warn!("{operation}: attempt {number} failed ({cause}), retrying in {delay:?}");
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            number += 1;
        }
    }

    fn cap(&self, secs: f64) -> Duration {
        let max = self.max_delay.as_secs_f64();
        if secs.is_finite() && secs < max {
            Duration::from_secs_f64(secs.max(0.0))
        } else {
            self.max_delay
        }
    }
}
