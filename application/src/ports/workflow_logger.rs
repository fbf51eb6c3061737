//! Port for structured workflow event logging.
//!
//! Defines the [`WorkflowLogger`] trait for recording workflow events
//! (generation, each stored question, submission, cancellation) to a
//! machine-readable audit trail.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures what
//! happened to each run in a format that can be replayed (JSONL).

use serde_json::Value;

/// A structured workflow event for logging.
pub struct WorkflowEvent {
    /// Event type identifier (e.g., "generation_completed", "store_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl WorkflowEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging workflow events.
///
/// `log` is synchronous and non-fallible; a failing sink must never
/// interrupt the workflow.
pub trait WorkflowLogger: Send + Sync {
    fn log(&self, event: WorkflowEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoWorkflowLogger;

impl WorkflowLogger for NoWorkflowLogger {
    fn log(&self, _event: WorkflowEvent) {}
}
