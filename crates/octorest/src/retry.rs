//! Retry policy and backoff state.

use std::time::Duration;

use crate::errors::ApiError;

/// Tunable retry behavior for the invoker.
///
/// The attempt cap applies to transient failures (5xx and network errors).
/// Rate limits are retried without an attempt cap, GitHub schedules them to
/// clear, but the total time spent waiting on them within one invocation
/// must fit under `max_rate_limit_wait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum attempts for transient failures.
    pub max_attempts: u32,
    /// Initial backoff delay; doubles per attempt.
    pub base_delay: Duration,
    /// Ceiling on the overall rate-limit wait per invocation.
    pub max_rate_limit_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_rate_limit_wait: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff delay for a zero-based attempt index.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Mutable state for one invocation's retry loop.
///
/// Created fresh per invocation and discarded on success or final failure.
/// The attempt count never exceeds the policy's maximum.
#[derive(Debug)]
pub struct RetryState {
    policy: RetryPolicy,
    attempt: u32,
    last_error: Option<ApiError>,
}

impl RetryState {
    /// Start tracking a new invocation.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            attempt: 0,
            last_error: None,
        }
    }

    /// Attempts made so far.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Record a transient failure.
    ///
    /// Returns the backoff delay for the next attempt, or `None` when the
    /// attempt budget is spent and the caller should give up.
    pub fn record_failure(&mut self, err: ApiError) -> Option<Duration> {
        let delay = self.policy.backoff_delay(self.attempt);
        self.attempt += 1;
        self.last_error = Some(err);
        (self.attempt < self.policy.max_attempts).then_some(delay)
    }

    /// Consume the state into the terminal error after exhaustion.
    pub fn into_error(self) -> ApiError {
        let attempts = self.attempt;
        match self.last_error {
            Some(source) => ApiError::TransientFailure {
                attempts,
                source: Box::new(source),
            },
            // record_failure was never called; treat as a zero-attempt bug
            // surfaced with a decodable message rather than a panic.
            None => ApiError::TransientFailure {
                attempts,
                source: Box::new(ApiError::RequestFailed {
                    status: 0,
                    message: "no attempts were made".to_string(),
                    headers: std::collections::HashMap::new(),
                }),
            },
        }
    }
}

/// Check whether an error is transient (worth a backoff retry).
///
/// Server errors and transport failures are transient; everything else,
/// including every 4xx, is not. Rate limits never reach this check, the
/// invoker classifies them from headers before mapping to an error.
pub fn is_transient(err: &ApiError) -> bool {
    match err {
        ApiError::RequestFailed { status, .. } => (500..=599).contains(status),
        ApiError::Request(e) => !e.is_builder() && !e.is_decode(),
        _ => false,
    }
}
