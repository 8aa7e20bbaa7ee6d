//! API error taxonomy.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Errors surfaced by the request invoker.
///
/// Only two categories are ever corrected transparently: rate-limit waits
/// and transient backoff retries. Everything else reaches the caller with
/// the server's status code and message preserved verbatim.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Non-success HTTP response that retrying cannot fix. The invoker
    /// surfaces this directly for 4xx responses; 5xx responses only appear
    /// here as the `source` of a [`TransientFailure`](Self::TransientFailure).
    #[error("HTTP {status}: {message}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Error message body from the API, verbatim.
        message: String,
        /// Response headers.
        headers: HashMap<String, String>,
    },

    /// Waiting out the rate limit would push the invocation's total wait
    /// past the configured ceiling; surfacing this instead keeps the
    /// caller from hanging.
    #[error("rate limit exceeded; resets at {reset:?}, beyond the {max_wait:?} wait ceiling")]
    RateLimitExceeded {
        /// When the rate limit window resets, if the server said.
        reset: Option<DateTime<Utc>>,
        /// The configured overall maximum wait.
        max_wait: Duration,
    },

    /// Retries exhausted on a transient failure (5xx or network).
    #[error("request failed after {attempts} attempts: {source}")]
    TransientFailure {
        /// How many attempts were made.
        attempts: u32,
        /// The last underlying error.
        #[source]
        source: Box<ApiError>,
    },

    /// Response body could not be decoded in the requested shape.
    #[error("failed to decode API response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Network/transport error.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

impl ApiError {
    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::TransientFailure { source, .. } => source.status(),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a 404 Not Found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RequestFailed { status: 404, .. })
    }

    /// Check if this is a 401 Unauthorized error.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::RequestFailed { status: 401, .. })
    }

    /// Check if this is a terminal rate-limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }

    /// Stable label for this error's category, used in telemetry.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RequestFailed { .. } => "request_failed",
            Self::RateLimitExceeded { .. } => "rate_limit_exceeded",
            Self::TransientFailure { .. } => "transient_failure",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Request(_) => "transport",
        }
    }
}

/// Errors surfaced by the resource services.
///
/// Services layer parameter resolution and confirmation on top of the
/// invoker; each concern keeps its own error type and this enum carries
/// whichever one occurred, without swallowing the invoker's taxonomy.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The invoker failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Confirmation denied or another core failure.
    #[error(transparent)]
    Core(#[from] octorest_core::CoreError),

    /// A repository reference could not be resolved.
    #[error(transparent)]
    Reference(#[from] octorest_core::repo::RepoParseError),

    /// A request descriptor could not be built.
    #[error(transparent)]
    Descriptor(#[from] crate::descriptor::DescriptorError),
}

impl Error {
    /// Check if the underlying API error is a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_not_found())
    }
}
