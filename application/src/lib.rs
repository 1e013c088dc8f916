//! Application layer for docchat
//!
//! This crate contains the conversation store, the ingestion and chat-turn
//! use cases, the observable session state and the port definitions.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod session_state;
pub mod store;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::ChatParams;
pub use ports::{
    analysis_gateway::{AnalysisGateway, ChatQuery, GatewayError},
    content_resolver::{ContentHandle, ContentResolver, DocumentContent, ResolveError},
    conversation_logger::{
        ConversationEvent, ConversationLogger, EventKind, NoConversationLogger,
    },
};
pub use session_state::{ObservableSessionState, SessionView};
pub use store::{ConversationStore, StoreError};
pub use use_cases::chat_turn::{ChatTurnError, ChatTurnUseCase, PendingTurn};
pub use use_cases::ingest_document::{
    IngestDocumentError, IngestDocumentOutput, IngestDocumentUseCase,
};
