// src/retry.rs
//! Retry with exponential backoff for flaky API operations.
//!
//! The policy is a small explicit state machine (attempt counter, last
//! error, computed delay) independent of what it wraps, so it can be unit
//! tested without any network I/O.

use crate::constants::{
    DATABASE_QUERY_BASE_DELAY, DATABASE_QUERY_MAX_ATTEMPTS, DATABASE_QUERY_MAX_DELAY,
};
use crate::error::AppError;
use std::time::Duration;

/// Bounded exponential-backoff retry policy.
///
/// The delay before attempt `k + 1` is `base_delay * 2^(k-1)`, capped at
/// `max_delay`. Errors that are not [`AppError::is_retryable`] propagate
/// immediately without consuming remaining attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DATABASE_QUERY_MAX_ATTEMPTS,
            base_delay: DATABASE_QUERY_BASE_DELAY,
            max_delay: DATABASE_QUERY_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Runs `operation` until it succeeds, fails terminally, or exhausts
    /// all attempts. The last error propagates on exhaustion.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, AppError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, AppError>>,
    {
        let mut delay = self.base_delay;
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    log::warn!(
                        "Attempt {}/{} failed with retryable error: {}",
                        attempt,
                        self.max_attempts,
                        e
                    );
                    last_error = Some(e);

                    if attempt < self.max_attempts {
                        tokio::time::sleep(delay).await;
                        delay = std::cmp::min(delay * 2, self.max_delay);
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::Internal {
            message: "Retry loop exhausted with no recorded error".to_string(),
        }))
    }
}
