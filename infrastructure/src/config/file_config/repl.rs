//! REPL configuration from TOML (`[repl]` section)

use super::expand_home;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Path to history file
    pub history_file: Option<String>,
}

impl FileReplConfig {
    /// History file path, falling back to the per-user data directory.
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(path) => Some(expand_home(path)),
            None => dirs::data_dir().map(|d| d.join("docchat").join("history.txt")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_history_file_wins() {
        let config = FileReplConfig {
            history_file: Some("/tmp/docchat_history".to_string()),
        };
        assert_eq!(
            config.history_path(),
            Some(PathBuf::from("/tmp/docchat_history"))
        );
    }
}
