//! Infrastructure layer for docchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod content;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileChatConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileReplConfig, FileServiceConfig,
};
pub use content::FileContentResolver;
pub use http::{HttpAnalysisGateway, HttpGatewayConfig, HttpGatewayError};
pub use logging::JsonlConversationLogger;
