//! Ingest Document use case.
//!
//! Uploads a user-selected document to the analysis service and, when the
//! service accepts it, opens a conversation about it.
//!
//! Failures at any step leave the [`ConversationStore`] untouched: the
//! conversation is only created once the service has returned a document
//! reference.

use crate::ports::analysis_gateway::{AnalysisGateway, GatewayError};
use crate::ports::content_resolver::{ContentHandle, ContentResolver, ResolveError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::store::ConversationStore;
use docchat_domain::{Conversation, DocumentAnalysis};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during document ingestion.
#[derive(Error, Debug)]
pub enum IngestDocumentError {
    /// The content handle could not be read.
    #[error(transparent)]
    Io(#[from] ResolveError),

    /// The request never got an answer from the service.
    #[error("network error: {0}")]
    Network(GatewayError),

    /// The service rejected the upload.
    #[error("server returned {status} {message}")]
    Protocol { status: u16, message: String },
}

impl From<GatewayError> for IngestDocumentError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::Status { status, message } => Self::Protocol { status, message },
            other => Self::Network(other),
        }
    }
}

/// Output of a successful ingestion.
#[derive(Debug, Clone)]
pub struct IngestDocumentOutput {
    /// The newly created conversation, including its summary message.
    pub conversation: Conversation,
    /// Status lines for the user (detected name, topic count).
    pub diagnostics: Vec<String>,
    /// Full analysis as returned by the service.
    pub analysis: DocumentAnalysis,
}

/// Use case for turning a document into a new conversation.
///
/// 1. Resolve the content handle into bytes and a file name
/// 2. Upload to the analysis service
/// 3. Create the conversation and attach the summary, if any
#[derive(Clone)]
pub struct IngestDocumentUseCase {
    store: Arc<ConversationStore>,
    gateway: Arc<dyn AnalysisGateway>,
    resolver: Arc<dyn ContentResolver>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl IngestDocumentUseCase {
    pub fn new(
        store: Arc<ConversationStore>,
        gateway: Arc<dyn AnalysisGateway>,
        resolver: Arc<dyn ContentResolver>,
    ) -> Self {
        Self {
            store,
            gateway,
            resolver,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub async fn execute(
        &self,
        handle: &ContentHandle,
    ) -> Result<IngestDocumentOutput, IngestDocumentError> {
        let document = self.resolver.resolve(handle).await.map_err(|e| {
            warn!("Could not read {}: {}", handle, e);
            IngestDocumentError::Io(e)
        })?;

        info!(
            "Analyzing {} ({} bytes, {})",
            document.file_name,
            document.bytes.len(),
            document.media_type
        );

        let analysis = self.gateway.analyze(&document).await.map_err(|e| {
            warn!("Analysis of {} failed: {}", document.file_name, e);
            IngestDocumentError::from(e)
        })?;

        let mut conversation = self.store.create(
            Some(analysis.document_reference().to_string()),
            Some(Conversation::title_for_document(&document.file_name)),
        );

        if let Some(summary) = analysis.summary_message() {
            match self.store.append_message(conversation.id(), summary.clone()) {
                Ok(()) => conversation.push(summary),
                Err(e) => warn!("Could not attach summary: {}", e),
            }
        } else {
            debug!("Analysis of {} returned no summary", document.file_name);
        }

        let diagnostics = analysis.diagnostics();

        info!(
            "Conversation {} opened for document {} ({} topics)",
            conversation.id(),
            analysis.document_reference(),
            analysis.topics.len()
        );

        self.conversation_logger.log(ConversationEvent::document_ingested(
            serde_json::json!({
                "conversation_id": conversation.id().value(),
                "document_reference": analysis.document_reference(),
                "file_name": document.file_name,
                "bytes": document.bytes.len(),
                "summary": analysis.summary,
                "topics": analysis.topics,
                "name": analysis.name,
                "email": analysis.email,
                "phone": analysis.phone,
            }),
        ));

        Ok(IngestDocumentOutput {
            conversation,
            diagnostics,
            analysis,
        })
    }
}
