//! Bounded retry executor.
//!
//! This module provides the generic retry loop shared by every document
//! operation. An attempt reports one of three outcomes through
//! [`RetryOutcome`]:
//!
//! - [`RetryOutcome::Success`]: stop, the loop returns `Ok`
//! - [`RetryOutcome::Fatal`]: stop, the wrapped error is returned unchanged
//! - [`RetryOutcome::Retryable`]: consume one attempt, wait, try again
//!
//! The delay between attempts is constant. When the budget is exhausted the
//! last retryable error is returned as-is.
//!
//! # Example
//!
//! ```rust
//! use docsync::retry::{retry, RetryOutcome, RetryPolicy};
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let policy = RetryPolicy::new(3, Duration::ZERO).unwrap();
//! let mut calls = 0;
//!
//! let result: Result<u32, String> = retry(&policy, || {
//!     calls += 1;
//!     let outcome = if calls < 2 {
//!         RetryOutcome::Retryable("not yet".to_string())
//!     } else {
//!         RetryOutcome::Success(calls)
//!     };
//!     async move { outcome }
//! })
//! .await;
//!
//! assert_eq!(result, Ok(2));
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::error::ConfigError;

/// Default number of attempts per document operation.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default fixed wait between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Result of a single attempt inside [`retry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T, E> {
    /// The attempt succeeded; stop retrying.
    Success(T),
    /// The attempt failed in a way that must not be retried.
    Fatal(E),
    /// The attempt failed but may succeed if tried again.
    Retryable(E),
}

/// Attempt budget and inter-attempt delay.
///
/// # Example
///
/// ```rust
/// use docsync::retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 3);
/// assert_eq!(policy.delay(), Duration::from_secs(1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy allowing `max_attempts` total attempts separated by `delay`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRetryPolicy`] if `max_attempts` is zero.
    pub fn new(max_attempts: u32, delay: Duration) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetryPolicy {
                reason: "max_attempts must be at least 1".to_string(),
            });
        }
        Ok(Self {
            max_attempts,
            delay,
        })
    }

    /// Total attempts, including the first one.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait between two consecutive attempts.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Runs `operation` until it succeeds, fails fatally, or the budget runs out.
///
/// The operation is always invoked at least once. Between retryable attempts
/// the calling task sleeps for [`RetryPolicy::delay`].
///
/// # Errors
///
/// Returns the error wrapped by [`RetryOutcome::Fatal`] immediately, or the
/// last [`RetryOutcome::Retryable`] error once `max_attempts` attempts have
/// been made.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    E: fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = RetryOutcome<T, E>>,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;

        match operation().await {
            RetryOutcome::Success(value) => return Ok(value),
            RetryOutcome::Fatal(error) => {
                tracing::debug!(attempt, "Attempt failed fatally: {}", error);
                return Err(error);
            }
            RetryOutcome::Retryable(error) => {
                if attempt >= policy.max_attempts {
                    tracing::warn!(
                        attempts = attempt,
                        "Giving up after {} attempts: {}",
                        attempt,
                        error
                    );
                    return Err(error);
                }

                tracing::debug!(
                    attempt,
                    delay_ms = u64::try_from(policy.delay.as_millis()).unwrap_or(u64::MAX),
                    "Retrying after error: {}",
                    error
                );
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}
