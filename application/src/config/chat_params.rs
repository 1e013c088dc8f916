//! Chat turn parameters.

use serde::{Deserialize, Serialize};

/// Retrieval depth used when the caller does not configure one.
pub const DEFAULT_TOP_K: u32 = 5;

/// Parameters sent along with each question to the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatParams {
    /// Number of document passages the service retrieves per answer.
    pub top_k: u32,
}

impl Default for ChatParams {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl ChatParams {
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }
}
