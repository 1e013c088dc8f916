//! Analysis Gateway port
//!
//! Defines the interface for talking to the remote document analysis service.

use crate::ports::content_resolver::DocumentContent;
use async_trait::async_trait;
use docchat_domain::{ChatAnswer, DocumentAnalysis};
use thiserror::Error;

/// Errors that can occur during analysis gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("timeout")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("{status} {message}")]
    Status { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Whether the service itself rejected the request, as opposed to the
    /// request never completing.
    pub fn is_status(&self) -> bool {
        matches!(self, GatewayError::Status { .. })
    }
}

/// A question addressed to an analyzed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatQuery {
    pub document_reference: String,
    pub question: String,
    /// Number of passages the service should retrieve for the answer.
    pub top_k: u32,
}

/// Gateway for the document analysis service
///
/// This port defines how the application layer reaches the analysis service.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    /// Upload a document and analyze it
    async fn analyze(&self, document: &DocumentContent) -> Result<DocumentAnalysis, GatewayError>;

    /// Ask a question about a previously analyzed document
    async fn chat(&self, query: &ChatQuery) -> Result<ChatAnswer, GatewayError>;
}
