//! Rate-limit metadata parsed from response headers.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;

/// Rate-limit state reported by the API on every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Calls remaining in the current window.
    pub remaining: Option<u64>,
    /// When the window resets.
    pub reset: Option<DateTime<Utc>>,
    /// Server-requested pause (secondary limits send `retry-after`).
    pub retry_after: Option<Duration>,
}

impl RateLimit {
    /// Parse rate-limit headers from a response.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            remaining: header_u64(headers, "x-ratelimit-remaining"),
            reset: header_u64(headers, "x-ratelimit-reset")
                .and_then(|epoch| Utc.timestamp_opt(i64::try_from(epoch).ok()?, 0).single()),
            retry_after: header_u64(headers, "retry-after").map(Duration::from_secs),
        }
    }

    /// Whether a response with this metadata and status is a rate-limit
    /// rejection (as opposed to an ordinary permission failure).
    ///
    /// GitHub signals primary limits as 403 with zero remaining, secondary
    /// limits as 403/429 with `retry-after`.
    pub fn is_limited(&self, status: u16) -> bool {
        match status {
            429 => true,
            403 => self.remaining == Some(0) || self.retry_after.is_some(),
            _ => false,
        }
    }

    /// How long to wait before the limit clears, measured from `now`.
    ///
    /// `retry-after` wins over the reset timestamp when both are present.
    /// A reset in the past yields a minimal wait rather than zero, so a
    /// retry never fires inside the same window due to clock skew.
    pub fn wait_duration(&self, now: DateTime<Utc>) -> Option<Duration> {
        if let Some(after) = self.retry_after {
            return Some(after);
        }
        let reset = self.reset?;
        let wait = (reset - now).to_std().unwrap_or(Duration::ZERO);
        Some(wait.max(Duration::from_secs(1)))
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
