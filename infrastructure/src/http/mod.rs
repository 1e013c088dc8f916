//! HTTP adapter for the document analysis service.
//!
//! [`HttpAnalysisGateway`] implements the
//! [`AnalysisGateway`](docchat_application::AnalysisGateway) port over two
//! endpoints resolved against a configurable base URL:
//!
//! - `POST analyze`: multipart upload, one part named `file`
//! - `POST chat`: JSON question about a previously analyzed document

pub mod error;
pub mod gateway;
pub mod protocol;

pub use error::HttpGatewayError;
pub use gateway::{HttpAnalysisGateway, HttpGatewayConfig};
