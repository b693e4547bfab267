//! Port for structured call logging.
//!
//! Defines the [`CallLogger`] trait for recording every model call (model,
//! question, latency, outcome) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures one
//! machine-readable record per call (JSONL).

use serde_json::Value;

/// A structured call event for logging.
pub struct CallEvent {
    /// Event type identifier (e.g., "model_response", "model_error").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl CallEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging call events to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures are
/// ignored and never interrupt a run.
pub trait CallLogger: Send + Sync {
    /// Record a call event.
    fn log(&self, event: CallEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoCallLogger;

impl CallLogger for NoCallLogger {
    fn log(&self, _event: CallEvent) {}
}
