//! The request invoker.
//!
//! Every per-resource operation funnels through [`Client`]: it resolves a
//! [`RequestDescriptor`] into a URL, attaches credentials, issues the
//! request, waits out rate limits, retries transient failures with
//! exponential backoff, and decodes the response. It holds no mutable
//! state across invocations and is safe to share between tasks.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use reqwest::header::{self, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use octorest_core::{Settings, instance};

use crate::descriptor::RequestDescriptor;
use crate::errors::ApiError;
use crate::pagination::{Page, Paginator, parse_link_next};
use crate::rate_limit::RateLimit;
use crate::retry::{RetryPolicy, RetryState, is_transient};
use crate::telemetry::{InvocationEvent, Outcome, TelemetrySink, TracingSink};

/// Response metadata returned alongside (or instead of) a decoded payload.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct ResponseMeta {
    /// HTTP status code.
    pub status: u16,
    /// Rate-limit state reported by this response.
    pub rate_limit: RateLimit,
}

/// GitHub REST client wrapping reqwest with auth, retry, and pagination.
///
/// Tokens are stored as [`SecretString`] to prevent accidental logging or
/// exposure through `Debug` output.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    hostname: String,
    token: Option<SecretString>,
    retry: RetryPolicy,
    page_size: u32,
    telemetry: Option<Arc<dyn TelemetrySink>>,
    /// Optional base URL override for testing (e.g., `"http://127.0.0.1:PORT/"`).
    /// When set, requests use this instead of the real GitHub URLs.
    api_url_override: Option<String>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("hostname", &self.hostname)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("retry", &self.retry)
            .field("api_url_override", &self.api_url_override)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client from settings and an optional credential.
    ///
    /// Without a token, calls go out unauthenticated and are subject to
    /// the lower anonymous rate limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (e.g., a malformed proxy URL).
    pub fn new(settings: &Settings, token: Option<SecretString>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(concat!("octorest/", env!("CARGO_PKG_VERSION"))),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(ref proxy) = settings.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        let http = builder.build()?;

        let telemetry: Option<Arc<dyn TelemetrySink>> = settings
            .telemetry
            .then(|| Arc::new(TracingSink) as Arc<dyn TelemetrySink>);

        Ok(Self {
            http,
            hostname: instance::normalize_hostname(&settings.host),
            token,
            retry: RetryPolicy::default(),
            page_size: settings.page_size,
            telemetry,
            api_url_override: None,
        })
    }

    /// Set a base URL override for testing.
    ///
    /// The URL should include the trailing slash, e.g.,
    /// `"http://127.0.0.1:8080/"`.
    #[must_use]
    pub fn with_url_override(mut self, url: String) -> Self {
        self.api_url_override = Some(url);
        self
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = Some(sink);
        self
    }

    /// Get the hostname this client is configured for.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Page size requested from list endpoints.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Invoke a request and decode the JSON response.
    ///
    /// A 204 or empty body decodes as JSON `null`, so `T` may be `()` or
    /// an `Option` for endpoints without response bodies.
    ///
    /// # Errors
    ///
    /// See the crate-level error taxonomy; only rate limits and transient
    /// failures are retried.
    pub async fn invoke<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T, ApiError> {
        self.invoke_with_meta(descriptor).await.map(|(value, _)| value)
    }

    /// Invoke a request, returning the decoded payload with its metadata.
    ///
    /// # Errors
    ///
    /// Same as [`invoke`](Self::invoke).
    pub async fn invoke_with_meta<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<(T, ResponseMeta), ApiError> {
        self.instrumented(operation_label(descriptor), async {
            let resp = self.execute(descriptor).await?;
            let meta = response_meta(&resp);
            let text = resp.text().await?;
            let value = if text.is_empty() {
                serde_json::from_value(Value::Null)?
            } else {
                serde_json::from_str(&text)?
            };
            Ok((value, meta))
        })
        .await
    }

    /// Invoke a request and return the raw response body as a string.
    ///
    /// Use with [`MediaType::Raw`](crate::MediaType::Raw) and friends; the
    /// invoker does not reinterpret non-default representations.
    ///
    /// # Errors
    ///
    /// Same as [`invoke`](Self::invoke).
    pub async fn invoke_text(&self, descriptor: &RequestDescriptor) -> Result<String, ApiError> {
        self.instrumented(operation_label(descriptor), async {
            let resp = self.execute(descriptor).await?;
            Ok(resp.text().await?)
        })
        .await
    }

    /// Invoke a request and return the raw response body as bytes.
    ///
    /// Use for binary content (e.g., release assets) to avoid UTF-8
    /// corruption.
    ///
    /// # Errors
    ///
    /// Same as [`invoke`](Self::invoke).
    pub async fn invoke_bytes(&self, descriptor: &RequestDescriptor) -> Result<Vec<u8>, ApiError> {
        self.instrumented(operation_label(descriptor), async {
            let resp = self.execute(descriptor).await?;
            Ok(resp.bytes().await?.to_vec())
        })
        .await
    }

    /// Invoke a request, discarding the body and returning only metadata.
    ///
    /// The natural shape for DELETE endpoints that answer 204.
    ///
    /// # Errors
    ///
    /// Same as [`invoke`](Self::invoke).
    pub async fn invoke_status(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<ResponseMeta, ApiError> {
        self.instrumented(operation_label(descriptor), async {
            let resp = self.execute(descriptor).await?;
            Ok(response_meta(&resp))
        })
        .await
    }

    /// Upload a binary payload to an absolute URL (release asset uploads
    /// go to a dedicated host, outside the normal REST base).
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or non-success status; uploads
    /// are not retried, a partial upload is not safely repeatable.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<T, ApiError> {
        let label = format!("POST {}", url.split('?').next().unwrap_or_default());
        self.instrumented(label, async {
            let mut req = self
                .http
                .post(url)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::ACCEPT, "application/vnd.github+json")
                .body(data);
            if let Some(ref token) = self.token {
                req = req.header(
                    header::AUTHORIZATION,
                    format!("token {}", token.expose_secret()),
                );
            }

            let resp = req.send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(response_error(resp).await);
            }
            Ok(resp.json().await?)
        })
        .await
    }

    /// Begin lazy pagination over a list endpoint.
    ///
    /// No request is issued until the first page is polled, and consuming
    /// only a prefix of the sequence issues no further requests.
    pub fn paginate<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> Paginator<'_, T> {
        Paginator::new(self, descriptor)
    }

    /// Fetch one page of a list endpoint: items plus the next-page cursor.
    pub(crate) async fn fetch_page<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<Page<T>, ApiError> {
        self.instrumented(operation_label(descriptor), async {
            let resp = self.execute(descriptor).await?;
            let meta = response_meta(&resp);
            let next = parse_link_next(resp.headers());
            let text = resp.text().await?;
            let items: Vec<T> = serde_json::from_str(&text)?;
            debug!(
                count = items.len(),
                has_next = next.is_some(),
                "fetched page"
            );
            Ok(Page { items, next, meta })
        })
        .await
    }

    /// Run the request with rate-limit waits and transient-failure retries.
    ///
    /// Rate-limit waits are not capped by attempt count, but the time spent
    /// waiting across the whole invocation is bounded by the policy's
    /// ceiling, so a server that keeps answering 403/429 cannot hang the
    /// caller.
    async fn execute(&self, descriptor: &RequestDescriptor) -> Result<reqwest::Response, ApiError> {
        let mut state = RetryState::new(self.retry);
        let mut waited = Duration::ZERO;
        loop {
            let err = match self.send(descriptor).await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if resp.status().is_success() {
                        return Ok(resp);
                    }

                    let limit = RateLimit::from_headers(resp.headers());
                    if limit.is_limited(status) {
                        match limit.wait_duration(Utc::now()) {
                            Some(wait)
                                if waited + wait <= self.retry.max_rate_limit_wait =>
                            {
                                waited += wait;
                                warn!(
                                    wait_ms = wait.as_millis() as u64,
                                    waited_ms = waited.as_millis() as u64,
                                    "rate limited; waiting for reset"
                                );
                                tokio::time::sleep(wait).await;
                                continue;
                            }
                            Some(_) => {
                                return Err(ApiError::RateLimitExceeded {
                                    reset: limit.reset,
                                    max_wait: self.retry.max_rate_limit_wait,
                                });
                            }
                            // Limited but no reset information: fall through
                            // to the transient path below.
                            None => response_error(resp).await,
                        }
                    } else {
                        response_error(resp).await
                    }
                }
                Err(e) => ApiError::Request(e),
            };

            if !is_transient(&err) {
                return Err(err);
            }
            match state.record_failure(err) {
                Some(delay) => {
                    warn!(
                        attempt = state.attempt(),
                        max = self.retry.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "transient failure; retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => return Err(state.into_error()),
            }
        }
    }

    /// Issue a single attempt: resolve the URL, attach headers and auth,
    /// send. A fresh wire request is built per attempt; the descriptor is
    /// never mutated.
    async fn send(&self, descriptor: &RequestDescriptor) -> Result<reqwest::Response, reqwest::Error> {
        let url = descriptor.url(&self.base_url());
        let mut req = self.http.request(descriptor.method().clone(), &url);
        req = req.header(header::ACCEPT, descriptor.accept().header_value());
        for (key, value) in descriptor.headers() {
            req = req.header(key.as_str(), value.as_str());
        }
        if let Some(token) = descriptor.token().or(self.token.as_ref()) {
            req = req.header(
                header::AUTHORIZATION,
                format!("token {}", token.expose_secret()),
            );
        }
        if let Some(body) = descriptor.body() {
            req = req.json(body);
        }
        req.send().await
    }

    fn base_url(&self) -> String {
        match self.api_url_override {
            Some(ref url) => url.clone(),
            None => instance::rest_base_url(&self.hostname),
        }
    }

    /// Run an invocation body, emitting one telemetry event when done.
    async fn instrumented<T>(
        &self,
        operation: String,
        fut: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        let started = Instant::now();
        let result = fut.await;
        if let Some(ref sink) = self.telemetry {
            let outcome = match &result {
                Ok(_) => Outcome::Success,
                Err(e) => Outcome::Failure(e.kind().to_string()),
            };
            sink.record(&InvocationEvent {
                operation,
                duration: started.elapsed(),
                outcome,
                finished_at: Utc::now(),
            });
        }
        result
    }
}

/// `METHOD path` label for telemetry, without query strings or credentials.
fn operation_label(descriptor: &RequestDescriptor) -> String {
    let path = descriptor.path().split('?').next().unwrap_or_default();
    format!("{} {path}", descriptor.method())
}

fn response_meta(resp: &reqwest::Response) -> ResponseMeta {
    ResponseMeta {
        status: resp.status().as_u16(),
        rate_limit: RateLimit::from_headers(resp.headers()),
    }
}

/// Turn a non-success response into `RequestFailed`, preserving the
/// server's message body verbatim.
async fn response_error(resp: reqwest::Response) -> ApiError {
    let status = resp.status().as_u16();
    let mut headers = std::collections::HashMap::new();
    for (key, value) in resp.headers() {
        if let Ok(v) = value.to_str() {
            headers.insert(key.to_string(), v.to_string());
        }
    }
    let message = resp.text().await.unwrap_or_default();
    ApiError::RequestFailed {
        status,
        message,
        headers,
    }
}
