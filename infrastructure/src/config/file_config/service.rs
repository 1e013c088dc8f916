//! Analysis service configuration from TOML (`[service]` section)

use super::ConfigValidationError;
use crate::http::HttpGatewayConfig;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw analysis service configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServiceConfig {
    /// Base URL the `analyze` and `chat` endpoints are resolved against
    pub base_url: String,
    /// Time allowed to establish a connection
    pub connect_timeout_seconds: u64,
    /// Time allowed for a whole request, upload and response included
    pub request_timeout_seconds: u64,
}

impl Default for FileServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            connect_timeout_seconds: 30,
            request_timeout_seconds: 60,
        }
    }
}

impl FileServiceConfig {
    /// Parse the base URL, adding the trailing slash endpoint joins need.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigValidationError> {
        let raw = self.base_url.trim();
        if raw.is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{}/", raw)
        };
        Url::parse(&normalized).map_err(|e| ConfigValidationError::InvalidBaseUrl(e.to_string()))
    }

    /// Build the HTTP gateway settings.
    pub fn to_gateway_config(&self) -> Result<HttpGatewayConfig, ConfigValidationError> {
        Ok(HttpGatewayConfig {
            base_url: self.parsed_base_url()?,
            connect_timeout: Duration::from_secs(self.connect_timeout_seconds),
            request_timeout: Duration::from_secs(self.request_timeout_seconds),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = FileServiceConfig {
            base_url: "https://analysis.example.com/v1".to_string(),
            ..FileServiceConfig::default()
        };
        assert_eq!(
            config.parsed_base_url().unwrap().as_str(),
            "https://analysis.example.com/v1/"
        );
    }

    #[test]
    fn test_to_gateway_config() {
        let gateway = FileServiceConfig::default().to_gateway_config().unwrap();
        assert_eq!(gateway.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(gateway.connect_timeout, Duration::from_secs(30));
        assert_eq!(gateway.request_timeout, Duration::from_secs(60));
    }
}
