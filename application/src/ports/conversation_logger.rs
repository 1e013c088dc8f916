//! Conversation Logger port
//!
//! Transcript events go to a machine-readable log, separate from the
//! `tracing` diagnostics. One event is emitted per ingested document and per
//! finished chat turn.

use serde_json::Value;
use std::fmt;

/// What happened in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A document was analyzed and its conversation opened.
    DocumentIngested,
    /// The service answered a question.
    ChatAnswer,
    /// A chat turn failed after the question was recorded.
    ChatFailed,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::DocumentIngested => "document_ingested",
            EventKind::ChatAnswer => "chat_answer",
            EventKind::ChatFailed => "chat_failed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transcript event with its event-specific fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    pub kind: EventKind,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(kind: EventKind, payload: Value) -> Self {
        Self { kind, payload }
    }

    pub fn document_ingested(payload: Value) -> Self {
        Self::new(EventKind::DocumentIngested, payload)
    }

    pub fn chat_answer(payload: Value) -> Self {
        Self::new(EventKind::ChatAnswer, payload)
    }

    pub fn chat_failed(payload: Value) -> Self {
        Self::new(EventKind::ChatFailed, payload)
    }
}

/// Sink for transcript events.
///
/// Never fails: a logger that cannot write drops the event.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every event.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
