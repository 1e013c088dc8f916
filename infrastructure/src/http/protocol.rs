//! Wire types for the analysis service.

use docchat_domain::{ChatAnswer, DocumentAnalysis, DomainError, SourceRecord, Topic};
use serde::{Deserialize, Serialize};

/// Response body of `POST analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    pub doc_id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub topics: Option<Vec<Topic>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl TryFrom<AnalyzeResponse> for DocumentAnalysis {
    type Error = DomainError;

    fn try_from(response: AnalyzeResponse) -> Result<Self, Self::Error> {
        let mut analysis = DocumentAnalysis::new(response.doc_id, response.summary)?
            .with_topics(response.topics.unwrap_or_default());
        if let Some(name) = response.name.filter(|n| !n.trim().is_empty()) {
            analysis = analysis.with_name(name);
        }
        if let Some(email) = response.email.filter(|e| !e.trim().is_empty()) {
            analysis = analysis.with_email(email);
        }
        if let Some(phone) = response.phone.filter(|p| !p.trim().is_empty()) {
            analysis = analysis.with_phone(phone);
        }
        Ok(analysis)
    }
}

/// Request body of `POST chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub doc_id: &'a str,
    pub question: &'a str,
    pub top_k: u32,
}

/// Response body of `POST chat`.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Option<Vec<SourceRecord>>,
}

impl From<ChatResponse> for ChatAnswer {
    fn from(response: ChatResponse) -> Self {
        ChatAnswer::new(response.answer).with_sources(response.sources.unwrap_or_default())
    }
}
