//! Retry policy for HTTP transport failures
//!
//! Only failures that happen *before* a response exists are retried, and
//! retries are immediate: a fixed count, no backoff. A response of any
//! status, including 429 and 5xx, is never retried at this layer.

use crate::error::TransportError;

/// Fixed-count retry policy for transport failures.
///
/// # Examples
///
/// ```rust
/// use activetrail_transport::{RetryPolicy, TransportError};
///
/// let policy = RetryPolicy::new(2);
///
/// // First and second failures are retried, the third is surfaced
/// assert!(policy.should_retry(&TransportError::Timeout, 0));
/// assert!(policy.should_retry(&TransportError::Timeout, 1));
/// assert!(!policy.should_retry(&TransportError::Timeout, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 2 }
    }
}

impl RetryPolicy {
    /// Create a policy allowing `max_retries` retries after the first attempt.
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self { max_retries: 0 }
    }

    /// Maximum number of retries after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Total number of attempts this policy allows.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Check if a transport error is worth another attempt.
    ///
    /// Retryable: timeouts and connection failures.
    /// Not retryable: lifecycle misuse, request construction failures and
    /// anything unclassified.
    pub fn is_retryable(error: &TransportError) -> bool {
        match error {
            TransportError::Timeout => true,
            TransportError::Connection(_) => true,

            TransportError::Http(_) => false,
            TransportError::NotOpen | TransportError::Closed => false,
            TransportError::Other(_) => false,
        }
    }

    /// Decide whether to retry after `retries_done` retries have already
    /// failed with `error`.
    pub fn should_retry(&self, error: &TransportError, retries_done: u32) -> bool {
        Self::is_retryable(error) && retries_done < self.max_retries
    }
}
