//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into adapter and use case
//! parameters at startup.

mod chat;
mod logging;
mod output;
mod repl;
mod service;

pub use chat::FileChatConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use service::FileServiceConfig;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{0} cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("service.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("service.base_url is not a valid URL: {0}")]
    InvalidBaseUrl(String),

    #[error("chat.top_k must be at least 1")]
    InvalidTopK,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Analysis service connection
    pub service: FileServiceConfig,
    /// Chat turn parameters
    pub chat: FileChatConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.service.connect_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                "service.connect_timeout_seconds",
            ));
        }
        if self.service.request_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                "service.request_timeout_seconds",
            ));
        }
        self.service.parsed_base_url()?;

        if self.chat.top_k == 0 {
            return Err(ConfigValidationError::InvalidTopK);
        }

        Ok(())
    }
}
