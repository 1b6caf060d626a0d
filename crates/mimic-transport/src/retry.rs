//! Retry policy and failure classification.

use crate::transport::{TransportError, TransportResponse};
use rand::Rng;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Lower bound of the jittered default retry delay, inclusive.
const DEFAULT_DELAY_MIN_MS: u64 = 200;
/// Upper bound of the jittered default retry delay, exclusive.
const DEFAULT_DELAY_MAX_MS: u64 = 1000;

/// Decides whether an attempt's outcome warrants another attempt.
pub type RetryPredicate =
    Arc<dyn Fn(&Result<TransportResponse, TransportError>) -> bool + Send + Sync>;

/// Default retryability: retry only network-level timeouts.
///
/// Any other error, and any response regardless of status code, is terminal.
pub fn default_retryable(outcome: &Result<TransportResponse, TransportError>) -> bool {
    matches!(outcome, Err(e) if e.is_timeout())
}

/// Retry configuration for the direct transport backend.
///
/// `max_retries == 0` disables the retry engine entirely: exactly one
/// attempt is made and its outcome returned as-is.
#[derive(Clone, Default)]
pub struct RetryPolicy {
    /// Additional attempts after the first; total attempts = max_retries + 1.
    pub max_retries: u32,
    /// Fixed inter-attempt delay. `None` draws a fresh jittered delay
    /// uniformly in [200ms, 1000ms) before every retry.
    pub delay: Option<Duration>,
    predicate: Option<RetryPredicate>,
}

impl RetryPolicy {
    /// A policy allowing `max_retries` additional attempts.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            delay: None,
            predicate: None,
        }
    }

    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self::default()
    }

    /// Use a fixed delay between attempts instead of jitter.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the default timeout-only retryability predicate.
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Result<TransportResponse, TransportError>) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Whether `outcome` warrants another attempt.
    pub(crate) fn should_retry(
        &self,
        outcome: &Result<TransportResponse, TransportError>,
    ) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(outcome),
            None => default_retryable(outcome),
        }
    }

    /// The delay to sleep before the next attempt.
    pub(crate) fn next_delay(&self) -> Duration {
        self.delay.unwrap_or_else(|| {
            let jitter = rand::thread_rng().gen_range(DEFAULT_DELAY_MIN_MS..DEFAULT_DELAY_MAX_MS);
            Duration::from_millis(jitter)
        })
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_retries", &self.max_retries)
            .field("delay", &self.delay)
            .field("custom_predicate", &self.predicate.is_some())
            .finish()
    }
}
