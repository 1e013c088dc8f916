//! Errors raised while constructing the HTTP gateway

use thiserror::Error;

/// Errors that can occur when building an [`HttpAnalysisGateway`](super::HttpAnalysisGateway)
#[derive(Error, Debug)]
pub enum HttpGatewayError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}
