//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid conversation id: {0}")]
    InvalidConversationId(String),

    #[error("Document reference cannot be empty")]
    EmptyDocumentReference,
}
