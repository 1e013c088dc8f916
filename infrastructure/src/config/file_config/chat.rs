//! Chat configuration from TOML (`[chat]` section)

use docchat_application::ChatParams;
use docchat_application::config::DEFAULT_TOP_K;
use serde::{Deserialize, Serialize};

/// Raw chat configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Passages retrieved per answer
    pub top_k: u32,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl FileChatConfig {
    pub fn to_params(&self) -> ChatParams {
        ChatParams::default().with_top_k(self.top_k)
    }
}
