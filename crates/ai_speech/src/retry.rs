//! Bounded retry with exponential backoff and additive jitter
//!
//! The policy (`BackoffPolicy::delay`) and the loop (`with_retry_using`) are
//! separate: the loop takes the sleep function as a parameter, so tests can
//! record delays instead of waiting and other runtimes can plug in their own
//! timer. `with_retry` uses `tokio::time::sleep`, which yields to the
//! scheduler while waiting.
//!
//! # Example
//!
//! ```rust,ignore
//! use ai_speech::retry::{BackoffPolicy, with_retry};
//!
//! let outcome = with_retry(&BackoffPolicy::default(), || async {
//!     client.send_once().await
//! })
//! .await;
//! ```

use std::{future::Future, time::Duration};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Retry budget and backoff base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffPolicy {
    /// Total attempts including the first one (default: 5)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base interval in milliseconds (default: 500)
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

const fn default_max_attempts() -> u32 {
    5
}

const fn default_base_delay_ms() -> u64 {
    500
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl BackoffPolicy {
    #[must_use]
    pub const fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
        }
    }

    /// Attempt budget, never less than one
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// `base * 2^attempt`, saturating
    #[must_use]
    pub fn deterministic_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(
            self.base_delay_ms
                .saturating_mul(2_u64.saturating_pow(attempt)),
        )
    }

    /// Delay before retrying after failed attempt `attempt` (0-indexed)
    ///
    /// Lies in `[base * 2^attempt, base * 2^attempt + base)`.
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        self.delay_with_rng(attempt, &mut rand::rng())
    }

    /// Same as [`delay`](Self::delay) with a caller-supplied random source
    #[must_use]
    pub fn delay_with_rng<R: Rng + ?Sized>(&self, attempt: u32, rng: &mut R) -> Duration {
        let jitter = if self.base_delay_ms == 0 {
            0
        } else {
            rng.random_range(0..self.base_delay_ms)
        };
        self.deterministic_delay(attempt)
            .saturating_add(Duration::from_millis(jitter))
    }
}

/// Trait for errors that can be checked for retryability
pub trait Retryable {
    /// Returns true if this error is retryable
    fn is_retryable(&self) -> bool;
}

/// Final outcome plus retry bookkeeping
#[derive(Debug)]
pub struct RetryResult<T, E> {
    /// The result of the last attempt
    pub result: Result<T, E>,
    /// Number of attempts made (1 = no retries)
    pub attempts: u32,
    /// Total time spent including waits
    pub total_duration: Duration,
}

impl<T, E> RetryResult<T, E> {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Convert to standard Result, discarding metadata
    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

/// Run `operation` under `policy`, waiting with `tokio::time::sleep`
pub async fn with_retry<F, Fut, T, E>(policy: &BackoffPolicy, operation: F) -> RetryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    with_retry_using(policy, tokio::time::sleep, operation).await
}

/// Run `operation` under `policy`, waiting with `sleep`
///
/// Stops at the first success, at the first non-retryable error, or when
/// the attempt budget is spent; in the last two cases the last error is
/// returned unchanged.
#[allow(clippy::cast_possible_truncation)]
pub async fn with_retry_using<F, Fut, T, E, S, SFut>(
    policy: &BackoffPolicy,
    mut sleep: S,
    mut operation: F,
) -> RetryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
    S: FnMut(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let start = std::time::Instant::now();
    let max_attempts = policy.attempts();
    let mut attempts = 0_u32;

    loop {
        attempts += 1;
        match operation().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(
                        attempts,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Operation succeeded after retries"
                    );
                }
                return RetryResult {
                    result: Ok(value),
                    attempts,
                    total_duration: start.elapsed(),
                };
            },
            Err(err) if !err.is_retryable() => {
                debug!(attempts, error = %err, "Operation failed with non-retryable error");
                return RetryResult {
                    result: Err(err),
                    attempts,
                    total_duration: start.elapsed(),
                };
            },
            Err(err) if attempts >= max_attempts => {
                warn!(attempts, error = %err, "Operation failed, attempts exhausted");
                return RetryResult {
                    result: Err(err),
                    attempts,
                    total_duration: start.elapsed(),
                };
            },
            Err(err) => {
                let delay = policy.delay(attempts - 1);
                warn!(
                    attempt = attempts,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Operation failed, retrying"
                );
                sleep(delay).await;
            },
        }
    }
}
