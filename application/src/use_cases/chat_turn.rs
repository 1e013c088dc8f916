//! Chat Turn use case.
//!
//! One question/answer exchange against an existing conversation.
//!
//! The turn runs in two phases so callers can publish the optimistic state
//! before the network round trip:
//!
//! - [`ChatTurnUseCase::begin`] checks preconditions and appends the user's
//!   question (synchronous, no I/O)
//! - [`PendingTurn::complete`] asks the service and appends its answer, or a
//!   synthetic `Error: ...` assistant message when the call fails
//!
//! A failed turn therefore mutates the transcript *and* reports failure.

use crate::config::ChatParams;
use crate::ports::analysis_gateway::{AnalysisGateway, ChatQuery, GatewayError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::store::{ConversationStore, StoreError};
use docchat_domain::util::truncate_str;
use docchat_domain::{ChatAnswer, ConversationId, Message};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reason reported when a conversation has no document to ask about.
pub const NO_DOCUMENT_ASSOCIATED: &str = "no document associated";

/// Errors that can occur during a chat turn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatTurnError {
    #[error("Conversation {0} not found")]
    NotFound(ConversationId),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The request never got an answer from the service.
    #[error("network error: {0}")]
    Network(GatewayError),

    /// The service rejected the question.
    #[error("chat failed: {status} {message}")]
    Protocol { status: u16, message: String },
}

impl From<StoreError> for ChatTurnError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => Self::NotFound(id),
        }
    }
}

impl From<GatewayError> for ChatTurnError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::Status { status, message } => Self::Protocol { status, message },
            other => Self::Network(other),
        }
    }
}

/// Use case for asking a question about a conversation's document.
#[derive(Clone)]
pub struct ChatTurnUseCase {
    store: Arc<ConversationStore>,
    gateway: Arc<dyn AnalysisGateway>,
    params: ChatParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ChatTurnUseCase {
    pub fn new(store: Arc<ConversationStore>, gateway: Arc<dyn AnalysisGateway>) -> Self {
        Self {
            store,
            gateway,
            params: ChatParams::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_params(mut self, params: ChatParams) -> Self {
        self.params = params;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Check preconditions and append the question.
    ///
    /// Nothing is written unless both preconditions hold. The question is not
    /// appended again if the transcript already ends with it.
    pub fn begin(
        &self,
        conversation_id: ConversationId,
        question: impl Into<String>,
    ) -> Result<PendingTurn, ChatTurnError> {
        let question = question.into();
        let conversation = self.store.get(conversation_id)?;
        let document_reference = conversation
            .document_reference()
            .ok_or_else(|| ChatTurnError::Precondition(NO_DOCUMENT_ASSOCIATED.to_string()))?
            .to_string();

        let appended_question = self
            .store
            .append_unless_last(conversation_id, Message::user(question.clone()))?;
        if !appended_question {
            debug!(
                "Conversation {} already ends with this question; not appending it again",
                conversation_id
            );
        }

        info!(
            "Chat turn on conversation {}: {}",
            conversation_id,
            truncate_str(&question, 100)
        );

        Ok(PendingTurn {
            store: self.store.clone(),
            gateway: self.gateway.clone(),
            conversation_logger: self.conversation_logger.clone(),
            conversation_id,
            query: ChatQuery {
                document_reference,
                question,
                top_k: self.params.top_k,
            },
            appended_question,
        })
    }

    /// Run a whole turn: [`begin`](Self::begin) then [`PendingTurn::complete`].
    pub async fn execute(
        &self,
        conversation_id: ConversationId,
        question: impl Into<String>,
    ) -> Result<ChatAnswer, ChatTurnError> {
        self.begin(conversation_id, question)?.complete().await
    }
}

/// A chat turn whose question is recorded but not yet answered.
pub struct PendingTurn {
    store: Arc<ConversationStore>,
    gateway: Arc<dyn AnalysisGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
    conversation_id: ConversationId,
    query: ChatQuery,
    appended_question: bool,
}

impl PendingTurn {
    pub fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    pub fn question(&self) -> &str {
        &self.query.question
    }

    /// Whether [`ChatTurnUseCase::begin`] appended the question.
    pub fn appended_question(&self) -> bool {
        self.appended_question
    }

    /// Ask the service and append its answer (or an error message).
    pub async fn complete(self) -> Result<ChatAnswer, ChatTurnError> {
        match self.gateway.chat(&self.query).await {
            Ok(answer) => {
                self.store
                    .append_message(self.conversation_id, Message::assistant(answer.answer.clone()))?;
                info!(
                    "Conversation {} answered ({} sources)",
                    self.conversation_id,
                    answer.sources.len()
                );
                self.conversation_logger.log(ConversationEvent::chat_answer(
                    serde_json::json!({
                        "conversation_id": self.conversation_id.value(),
                        "document_reference": self.query.document_reference,
                        "question": self.query.question,
                        "answer": answer.answer,
                        "sources": answer.sources.len(),
                    }),
                ));
                Ok(answer)
            }
            Err(error) => {
                warn!(
                    "Chat turn on conversation {} failed: {}",
                    self.conversation_id, error
                );
                if let Err(e) = self
                    .store
                    .append_message(self.conversation_id, Message::error(&error))
                {
                    warn!("Could not record failed turn: {}", e);
                }
                self.conversation_logger.log(ConversationEvent::chat_failed(
                    serde_json::json!({
                        "conversation_id": self.conversation_id.value(),
                        "document_reference": self.query.document_reference,
                        "question": self.query.question,
                        "error": error.to_string(),
                    }),
                ));
                Err(ChatTurnError::from(error))
            }
        }
    }
}
