//! Test doubles for the application ports.

use crate::ports::analysis_gateway::{AnalysisGateway, ChatQuery, GatewayError};
use crate::ports::content_resolver::{
    ContentHandle, ContentResolver, DocumentContent, ResolveError,
};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, EventKind};
use async_trait::async_trait;
use docchat_domain::{ChatAnswer, DocumentAnalysis};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::Notify;

/// Gateway answering from scripted queues, recording every request.
///
/// When a gate is set, every call waits for [`ScriptedGateway::release`]
/// before answering.
#[derive(Default)]
pub struct ScriptedGateway {
    analyses: Mutex<VecDeque<Result<DocumentAnalysis, GatewayError>>>,
    answers: Mutex<VecDeque<Result<ChatAnswer, GatewayError>>>,
    uploads: Mutex<Vec<DocumentContent>>,
    chat_queries: Mutex<Vec<ChatQuery>>,
    gate: Option<Notify>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis(self, result: Result<DocumentAnalysis, GatewayError>) -> Self {
        self.analyses.lock().unwrap().push_back(result);
        self
    }

    pub fn with_answer(self, result: Result<ChatAnswer, GatewayError>) -> Self {
        self.answers.lock().unwrap().push_back(result);
        self
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Notify::new());
        self
    }

    /// Let one gated call proceed.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn uploads(&self) -> Vec<DocumentContent> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn chat_queries(&self) -> Vec<ChatQuery> {
        self.chat_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisGateway for ScriptedGateway {
    async fn analyze(&self, document: &DocumentContent) -> Result<DocumentAnalysis, GatewayError> {
        self.uploads.lock().unwrap().push(document.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.analyses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Connection("no scripted analysis".to_string())))
    }

    async fn chat(&self, query: &ChatQuery) -> Result<ChatAnswer, GatewayError> {
        self.chat_queries.lock().unwrap().push(query.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Connection("no scripted answer".to_string())))
    }
}

/// Resolver serving fixed documents keyed by handle.
#[derive(Default)]
pub struct StaticResolver {
    documents: HashMap<String, DocumentContent>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, handle: &str, bytes: &[u8]) -> Self {
        self.documents.insert(
            handle.to_string(),
            DocumentContent::new(bytes.to_vec(), handle, "application/pdf"),
        );
        self
    }
}

#[async_trait]
impl ContentResolver for StaticResolver {
    async fn resolve(&self, handle: &ContentHandle) -> Result<DocumentContent, ResolveError> {
        self.documents
            .get(handle.as_str())
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(handle.clone()))
    }
}

/// Logger keeping every event in memory.
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<ConversationEvent>>,
}

impl RecordingLogger {
    pub fn events(&self) -> Vec<ConversationEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.events().iter().map(|e| e.kind).collect()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event);
    }
}
