//! REPL (Read-Eval-Print Loop) for interactive document chat

use super::command::ReplCommand;
use crate::{BusyIndicator, ConsoleFormatter};
use colored::Colorize;
use docchat_application::{ContentHandle, ObservableSessionState};
use docchat_domain::ConversationId;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Interactive chat REPL
pub struct ChatRepl {
    state: Arc<ObservableSessionState>,
    show_progress: bool,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(state: Arc<ObservableSessionState>) -> Self {
        Self {
            state,
            show_progress: true,
            history_path: None,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set where input history is kept between sessions
    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Err(e) = rl.load_history(path) {
                debug!("No history loaded from {}: {}", path.display(), e);
            }
        }

        self.print_welcome();

        loop {
            let prompt = match self.state.active_conversation_id() {
                Some(id) => format!("#{} >>> ", id),
                None => ">>> ".to_string(),
            };

            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    match ReplCommand::parse(line) {
                        Ok(ReplCommand::Quit) => {
                            println!("Bye!");
                            break;
                        }
                        Ok(command) => self.dispatch(command).await,
                        Err(message) => println!("{}", message),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    async fn dispatch(&self, command: ReplCommand) {
        match command {
            ReplCommand::Open(path) => {
                self.open_document(&path).await;
            }
            ReplCommand::List => {
                let view = self.state.view();
                print!(
                    "{}",
                    ConsoleFormatter::conversation_list(
                        &view.conversations,
                        view.active_conversation_id
                    )
                );
            }
            ReplCommand::Select(id) => self.select(id),
            ReplCommand::Diagnostics => {
                let view = self.state.view();
                if view.diagnostics.is_empty() {
                    println!("{}", "No diagnostics.".dimmed());
                } else {
                    print!("{}", ConsoleFormatter::diagnostics(&view.diagnostics));
                }
            }
            ReplCommand::History => {
                print!("{}", ConsoleFormatter::transcript(&self.state.view().messages));
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Ask(question) => {
                self.ask(&question).await;
            }
            ReplCommand::Quit => {}
        }
    }

    async fn tracked<F: Future>(&self, operation: F) -> F::Output {
        if self.show_progress {
            BusyIndicator::track(self.state.subscribe(), operation).await
        } else {
            operation.await
        }
    }

    /// Analyze a document and print its new conversation.
    ///
    /// Returns the conversation id, or `None` after printing why analysis
    /// failed.
    pub async fn open_document(&self, path: &Path) -> Option<ConversationId> {
        let handle = ContentHandle::from(path);
        let id = self.tracked(self.state.run_ingestion(&handle)).await;

        let view = self.state.view();
        print!("{}", ConsoleFormatter::diagnostics(&view.diagnostics));

        if let Some(id) = id {
            let title = view
                .conversations
                .iter()
                .find(|c| c.id() == id)
                .and_then(|c| c.title())
                .unwrap_or("Untitled")
                .to_string();
            println!();
            print!("{}", ConsoleFormatter::header(&format!("#{} {}", id, title)));
            print!("{}", ConsoleFormatter::transcript(&view.messages));
        }
        id
    }

    /// Ask a question in the active conversation and print the reply.
    ///
    /// A failed turn prints the recorded `Error: ...` message. Returns whether
    /// the service answered.
    pub async fn ask(&self, question: &str) -> bool {
        if self.state.active_conversation_id().is_none() {
            println!("No active conversation. Use /open <path> to analyze a document first.");
            return false;
        }

        let before = self.state.view().messages.len();
        let answered = self.tracked(self.state.run_chat_turn(question)).await;

        let view = self.state.view();
        let replies: Vec<_> = view
            .messages
            .iter()
            .skip(before)
            .filter(|m| !m.is_user())
            .collect();
        if replies.is_empty() && !answered {
            println!("{}", "Question was not sent.".red());
        }
        for reply in replies {
            println!("{}", ConsoleFormatter::message(reply));
        }
        println!();
        answered
    }

    fn select(&self, id: ConversationId) {
        let known = self.state.view().conversations.iter().any(|c| c.id() == id);
        if !known {
            println!("No conversation #{}. Use /list to see them.", id);
            return;
        }
        self.state.select_conversation(id);
        print!("{}", ConsoleFormatter::transcript(&self.state.view().messages));
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              docchat - Chat Mode             │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        let count = self.state.view().conversations.len();
        if count == 0 {
            println!("Open a document with /open <path> to start.");
        } else {
            println!("{} conversation(s) open.", count);
        }
        Self::print_help();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /open <path>     - Analyze a document and start a conversation");
        println!("  /list            - List conversations");
        println!("  /select <id>     - Switch to another conversation");
        println!("  /diag            - Show diagnostics from the last analysis");
        println!("  /history         - Reprint the current conversation");
        println!("  /help, /h, /?    - Show this help");
        println!("  /quit, /exit, /q - Exit");
        println!();
        println!("Anything else is asked about the current document.");
        println!();
    }
}
