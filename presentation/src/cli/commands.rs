//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for docchat
#[derive(Parser, Debug)]
#[command(name = "docchat")]
#[command(author, version, about = "Chat with a document through a remote analysis service")]
#[command(long_about = r#"
docchat uploads a document to an analysis service, shows its summary and
lets you ask questions about it. Every document gets its own conversation.

Without --question, an interactive session starts. Use /open <path> inside
the session to analyze more documents and /list to switch between them.

Configuration files are loaded from (in priority order):
1. DOCCHAT_* environment variables (e.g. DOCCHAT_SERVICE__BASE_URL)
2. --config <path>     Explicit config file
3. ./docchat.toml      Project-level config
4. ~/.config/docchat/config.toml   Global config

Example:
  docchat report.pdf
  docchat report.pdf -q "What was revenue?" -q "Who signed it?"
  docchat --base-url http://analysis.internal:8000/ contract.pdf
"#)]
pub struct Cli {
    /// Document to analyze on start
    pub document: Option<PathBuf>,

    /// Ask a question about DOCUMENT, print the answers and exit
    /// (can be specified multiple times)
    #[arg(short, long, value_name = "QUESTION", requires = "document")]
    pub question: Vec<String>,

    /// Analysis service base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Passages retrieved per answer (overrides config)
    #[arg(long, value_name = "N")]
    pub top_k: Option<u32>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Whether the session ends after answering `--question`s.
    pub fn is_one_shot(&self) -> bool {
        !self.question.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_document_and_questions() {
        let cli = Cli::parse_from(["docchat", "report.pdf", "-q", "What was revenue?", "-q", "Who?"]);
        assert_eq!(cli.document, Some(PathBuf::from("report.pdf")));
        assert_eq!(cli.question, vec!["What was revenue?", "Who?"]);
        assert!(cli.is_one_shot());
    }

    #[test]
    fn test_interactive_without_arguments() {
        let cli = Cli::parse_from(["docchat"]);
        assert!(cli.document.is_none());
        assert!(!cli.is_one_shot());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_question_requires_document() {
        assert!(Cli::try_parse_from(["docchat", "-q", "orphan"]).is_err());
    }

    #[test]
    fn test_overrides_and_verbosity() {
        let cli = Cli::parse_from([
            "docchat",
            "--base-url",
            "http://analysis.internal:9000/",
            "--top-k",
            "3",
            "-vv",
            "--no-config",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://analysis.internal:9000/"));
        assert_eq!(cli.top_k, Some(3));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_config);
    }
}
