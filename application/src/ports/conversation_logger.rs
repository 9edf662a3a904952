//! Port for structured session event logging.
//!
//! Defines the [`ConversationLogger`] trait for recording what happened in a
//! session (submissions, answers, failures, history changes) to a structured
//! log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures session
//! events in a machine-readable format (JSONL). Events carry metadata only
//! (lengths, timings, error kinds), never the question or answer text.

use serde_json::Value;

/// A structured session event for logging.
///
/// Each event has a type string and a JSON payload containing event-specific
/// fields. The writer adds the timestamp.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "query_submitted", "answer_received").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging session events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// `log` is synchronous and non-fallible; logging failures are ignored.
pub trait ConversationLogger: Send + Sync {
    /// Record a session event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
