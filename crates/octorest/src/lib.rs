//! GitHub REST API SDK.
//!
//! Typed per-resource services ([`resources`]) over a single shared
//! invoker ([`Client`]) that handles request construction, Link-header
//! pagination, rate-limit-aware retry, and error normalization.

pub mod client;
pub mod descriptor;
pub mod errors;
pub mod media;
pub mod pagination;
pub mod rate_limit;
pub mod resources;
pub mod retry;
pub mod telemetry;

pub use client::{Client, ResponseMeta};
pub use descriptor::RequestDescriptor;
pub use errors::{ApiError, Error};
pub use media::MediaType;
pub use pagination::{Page, Paginator};
pub use rate_limit::RateLimit;
pub use retry::RetryPolicy;

pub use octorest_core::{ConfirmPolicy, Repo, RepoRef, Settings};
