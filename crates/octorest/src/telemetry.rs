//! Fire-and-forget invocation telemetry.
//!
//! One event per invocation: the operation (method + path), how long it
//! took including retries, and the outcome. The sink is consulted after
//! the result is already decided; a slow or broken sink can never change
//! what the caller sees.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// How an invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Completed successfully.
    Success,
    /// Failed with the given error kind label.
    Failure(String),
}

/// A single invocation record.
#[derive(Debug, Clone)]
pub struct InvocationEvent {
    /// `METHOD path` of the request, without query or credentials.
    pub operation: String,
    /// Wall-clock duration including retries and rate-limit waits.
    pub duration: Duration,
    /// Success status or failure kind.
    pub outcome: Outcome,
    /// When the invocation finished.
    pub finished_at: DateTime<Utc>,
}

/// Receives invocation events.
pub trait TelemetrySink: Send + Sync + fmt::Debug {
    /// Record one event. Must not block or fail.
    fn record(&self, event: &InvocationEvent);
}

/// Sink that emits events as `tracing` debug events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn record(&self, event: &InvocationEvent) {
        match &event.outcome {
            Outcome::Success => tracing::debug!(
                operation = %event.operation,
                duration_ms = event.duration.as_millis() as u64,
                "api call succeeded"
            ),
            Outcome::Failure(kind) => tracing::debug!(
                operation = %event.operation,
                duration_ms = event.duration.as_millis() as u64,
                kind = %kind,
                "api call failed"
            ),
        }
    }
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl TelemetrySink for NoopSink {
    fn record(&self, _event: &InvocationEvent) {}
}
