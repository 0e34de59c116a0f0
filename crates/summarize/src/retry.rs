//! Bounded retries for provider calls.
//!
//! Each attempt either succeeds, fails in a way worth another try, or fails
//! for good. Attempts are capped; the delay between them is fixed and
//! defaults to none.

use std::future::Future;
use std::time::{Duration, Instant};

/// Configuration for retry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first one. Values below 1 act as 1.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: Duration::ZERO,
        }
    }
}

impl RetryConfig {
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Result of a retry operation.
#[derive(Debug, Clone)]
pub struct RetryResult<T, E> {
    /// The final result: the first success, or the last error.
    pub result: Result<T, E>,
    /// Number of attempts made (1 = no retries needed).
    pub attempts: u32,
    /// Total duration spent on all attempts.
    pub total_duration: Duration,
}

impl<T, E> RetryResult<T, E> {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

/// Runs `operation` until it succeeds, `retryable` rejects its error, or
/// the attempts run out. The attempt number (0-based) is passed in.
pub async fn execute_with_retry_async<T, E, F, Fut, R>(
    config: &RetryConfig,
    retryable: R,
    mut operation: F,
) -> RetryResult<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
{
    let start = Instant::now();
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                return RetryResult {
                    result: Ok(value),
                    attempts: attempt + 1,
                    total_duration: start.elapsed(),
                };
            }
            Err(error) => {
                let last = attempt + 1 >= max_attempts;
                if last || !retryable(&error) {
                    return RetryResult {
                        result: Err(error),
                        attempts: attempt + 1,
                        total_duration: start.elapsed(),
                    };
                }
                if !config.delay.is_zero() {
                    tokio::time::sleep(config.delay).await;
                }
                attempt += 1;
            }
        }
    }
}
