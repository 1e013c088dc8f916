//! Document analysis value objects

use crate::conversation::entities::Message;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Loosely typed source record attached to a chat answer.
pub type SourceRecord = serde_json::Map<String, serde_json::Value>;

/// A topic detected in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub topic: String,
    pub text: String,
}

impl Topic {
    pub fn new(topic: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            text: text.into(),
        }
    }
}

/// Result of analyzing an uploaded document (Value Object)
///
/// The document reference addresses every later chat turn about the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentAnalysis {
    document_reference: String,
    pub summary: String,
    pub topics: Vec<Topic>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl DocumentAnalysis {
    /// Create an analysis result with no topics or contact fields.
    ///
    /// Fails when the document reference is blank, since no chat turn could
    /// address such a document.
    pub fn new(
        document_reference: impl Into<String>,
        summary: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let document_reference = document_reference.into();
        if document_reference.trim().is_empty() {
            return Err(DomainError::EmptyDocumentReference);
        }
        Ok(Self {
            document_reference,
            summary: summary.into(),
            topics: Vec::new(),
            name: None,
            email: None,
            phone: None,
        })
    }

    pub fn with_topics(mut self, topics: Vec<Topic>) -> Self {
        self.topics = topics;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn document_reference(&self) -> &str {
        &self.document_reference
    }

    /// Opening assistant message carrying the summary, if there is one.
    pub fn summary_message(&self) -> Option<Message> {
        if self.summary.trim().is_empty() {
            None
        } else {
            Some(Message::assistant(format!("Summary:\n{}", self.summary)))
        }
    }

    /// Short status lines describing what the analysis found.
    pub fn diagnostics(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);
        if let Some(name) = &self.name {
            lines.push(format!("Name detected: {}", name));
        }
        lines.push(format!("Topics: {} found", self.topics.len()));
        lines
    }
}

/// Answer to a question about a document (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub sources: Vec<SourceRecord>,
}

impl ChatAnswer {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            sources: Vec::new(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<SourceRecord>) -> Self {
        self.sources = sources;
        self
    }
}
