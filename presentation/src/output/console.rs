//! Console output formatter for conversations

use colored::Colorize;
use docchat_domain::util::preview;
use docchat_domain::{Conversation, ConversationId, Message, Role};

/// Width of the last-message preview in conversation listings.
const PREVIEW_CHARS: usize = 48;

/// Formats conversations and status lines for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one message with a coloured role label.
    ///
    /// Assistant messages recording a failed turn are shown in red.
    pub fn message(message: &Message) -> String {
        match message.role {
            Role::User => format!("{} {}", "You:".cyan().bold(), message.content),
            Role::Assistant if message.content.starts_with("Error: ") => {
                format!("{} {}", "Assistant:".red().bold(), message.content.red())
            }
            Role::Assistant => format!("{} {}", "Assistant:".green().bold(), message.content),
        }
    }

    /// Format a whole transcript, one blank line between messages.
    pub fn transcript(messages: &[Message]) -> String {
        if messages.is_empty() {
            return format!("{}\n", "(no messages yet)".dimmed());
        }
        let mut output = String::new();
        for message in messages {
            output.push_str(&Self::message(message));
            output.push_str("\n\n");
        }
        output
    }

    /// Format the conversation list, marking the active one.
    pub fn conversation_list(
        conversations: &[Conversation],
        active: Option<ConversationId>,
    ) -> String {
        if conversations.is_empty() {
            return format!(
                "{}\n",
                "No conversations yet. Use /open <path> to analyze a document.".dimmed()
            );
        }

        let mut output = String::new();
        for conversation in conversations {
            let marker = if Some(conversation.id()) == active {
                "*".green().bold().to_string()
            } else {
                " ".to_string()
            };
            let title = conversation.title().unwrap_or("Untitled");
            output.push_str(&format!(
                "{} {} {} {}\n",
                marker,
                format!("#{}", conversation.id()).yellow(),
                title.bold(),
                format!("({} messages)", conversation.messages().len()).dimmed()
            ));
            if let Some(last) = conversation.last_message() {
                output.push_str(&format!(
                    "      {}\n",
                    preview(&last.content, PREVIEW_CHARS).dimmed()
                ));
            }
        }
        output
    }

    /// Format status lines from the last operation.
    pub fn diagnostics(lines: &[String]) -> String {
        let mut output = String::new();
        for line in lines {
            let marker = if line.contains("failed") {
                "!".red().bold()
            } else {
                "->".cyan()
            };
            output.push_str(&format!("{} {}\n", marker, line));
        }
        output
    }

    /// Format a section header
    pub fn header(title: &str) -> String {
        let line = "─".repeat(title.chars().count() + 4);
        format!(
            "{}\n{}\n{}\n",
            line.cyan(),
            format!("  {}  ", title).cyan().bold(),
            line.cyan()
        )
    }
}
