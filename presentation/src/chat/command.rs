//! Slash commands understood by the REPL

use docchat_domain::ConversationId;
use std::path::PathBuf;

/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Analyze a document and switch to its conversation
    Open(PathBuf),
    /// List conversations
    List,
    /// Switch the active conversation
    Select(ConversationId),
    /// Show status lines from the last operation
    Diagnostics,
    /// Reprint the active transcript
    History,
    Help,
    Quit,
    /// Anything not starting with `/` is a question
    Ask(String),
}

impl ReplCommand {
    /// Parse a trimmed, non-empty input line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let Some(command) = line.strip_prefix('/') else {
            return Ok(Self::Ask(line.to_string()));
        };

        let (name, argument) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };

        match name {
            "open" | "o" => {
                if argument.is_empty() {
                    Err("Usage: /open <path>".to_string())
                } else {
                    Ok(Self::Open(PathBuf::from(argument)))
                }
            }
            "list" | "ls" => Ok(Self::List),
            "select" | "s" => argument
                .parse()
                .map(Self::Select)
                .map_err(|_| "Usage: /select <id>".to_string()),
            "diag" => Ok(Self::Diagnostics),
            "history" => Ok(Self::History),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(format!(
                "Unknown command: /{}\nType /help for available commands",
                name
            )),
        }
    }
}
