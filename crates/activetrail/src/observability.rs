//! Centralized observability utilities for structured logging
//!
//! Both executors log every request and its outcome through this module, so
//! the async and blocking clients produce identical events.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Log context of one API call, across all of its attempts.
///
/// Created once the request is prepared. [`sending`](Self::sending) opens
/// each attempt; the executor then reports the outcome through
/// [`succeeded`](Self::succeeded) or [`failed`](Self::failed).
#[derive(Debug, Clone)]
pub struct CallLog {
    method: String,
    path: String,
    body_size: Option<usize>,
    max_attempts: u32,
    attempts: u32,
    started: Instant,
}

impl CallLog {
    /// Start logging a call to `path`, allowed `max_attempts` attempts.
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        body_size: Option<usize>,
        max_attempts: u32,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body_size,
            max_attempts,
            attempts: 0,
            started: Instant::now(),
        }
    }

    /// Attempts opened so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Attempts beyond the first.
    pub fn retries(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }

    /// Time since the call started, retries included.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Open the next attempt.
    pub fn sending(&mut self) {
        self.attempts += 1;
        debug!(
            method = %self.method,
            path = %self.path,
            body_size = self.body_size,
            attempt = self.attempts,
            max_attempts = self.max_attempts,
            retries = self.retries(),
            "Sending API request"
        );
    }

    /// The current attempt failed in transport and another one follows.
    pub fn retrying(&self, error: &dyn std::fmt::Display) {
        warn!(
            method = %self.method,
            path = %self.path,
            attempt = self.attempts,
            remaining = self.max_attempts.saturating_sub(self.attempts),
            error = %error,
            "Transport failure, retrying"
        );
    }

    /// The call ended with a 2xx response.
    pub fn succeeded(&self, status: u16, body_size: usize) {
        info!(
            method = %self.method,
            path = %self.path,
            status,
            body_size,
            attempts = self.attempts,
            retries = self.retries(),
            elapsed_ms = self.elapsed().as_millis(),
            "API request succeeded"
        );
    }

    /// The call ended in an error. `status` is `None` when no response
    /// arrived.
    pub fn failed(&self, status: Option<u16>, error: &dyn std::fmt::Display) {
        warn!(
            method = %self.method,
            path = %self.path,
            status,
            attempts = self.attempts,
            retries = self.retries(),
            elapsed_ms = self.elapsed().as_millis(),
            error = %error,
            "API request failed"
        );
    }
}

/// Log a local validation failure. Nothing is sent.
pub fn log_validation_error(field: &str, reason: &str) {
    debug!(
        field = %field,
        reason = %reason,
        "Request validation failed"
    );
}

/// Install a global `fmt` subscriber for SDK logs.
///
/// `RUST_LOG` takes precedence over `level` when set. Returns an error if a
/// global subscriber is already installed.
#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub fn init_tracing(
    level: tracing::Level,
) -> std::result::Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let directive = format!("activetrail={}", level.as_str().to_ascii_lowercase());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
}
