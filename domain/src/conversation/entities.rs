//! Conversation domain entities

use crate::core::error::DomainError;
use crate::util::take_chars;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of filename characters kept in a derived conversation title.
const TITLE_FILENAME_CHARS: usize = 12;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in a conversation (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Assistant message standing in for an answer that never arrived.
    pub fn error(reason: impl fmt::Display) -> Self {
        Self::assistant(format!("Error: {}", reason))
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Identifier of a conversation.
///
/// Issued by the conversation store from a monotonically increasing counter;
/// never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(u64);

impl ConversationId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConversationId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .trim_start_matches('#')
            .parse::<u64>()
            .map(ConversationId)
            .map_err(|_| DomainError::InvalidConversationId(s.to_string()))
    }
}

/// A conversation about one analyzed document (Entity)
///
/// Messages are append-only: there is no way to reorder or remove them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    id: ConversationId,
    document_reference: Option<String>,
    title: Option<String>,
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(
        id: ConversationId,
        document_reference: Option<String>,
        title: Option<String>,
    ) -> Self {
        Self {
            id,
            document_reference,
            title,
            messages: Vec::new(),
        }
    }

    /// Display title for a conversation started from `file_name`.
    pub fn title_for_document(file_name: &str) -> String {
        format!("Chat — {}", take_chars(file_name, TITLE_FILENAME_CHARS))
    }

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn document_reference(&self) -> Option<&str> {
        self.document_reference.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether the transcript currently ends with `text` authored by the user.
    ///
    /// Only the last message is inspected.
    pub fn ends_with_user_text(&self, text: &str) -> bool {
        self.last_message()
            .is_some_and(|m| m.is_user() && m.content == text)
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::user("hi").role, Role::User);
        assert_eq!(Message::assistant("hello").role, Role::Assistant);
        assert_eq!(Message::error("timeout").content, "Error: timeout");
        assert_eq!(Message::error("timeout").role, Role::Assistant);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("q")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"q"}"#);
    }

    #[test]
    fn test_conversation_id_parse() {
        assert_eq!("7".parse::<ConversationId>().unwrap(), ConversationId::new(7));
        assert_eq!("#12".parse::<ConversationId>().unwrap(), ConversationId::new(12));
        assert!(matches!(
            "abc".parse::<ConversationId>(),
            Err(DomainError::InvalidConversationId(_))
        ));
    }

    #[test]
    fn test_new_conversation_is_empty() {
        let conv = Conversation::new(ConversationId::new(1), Some("abc123".into()), None);
        assert!(conv.messages().is_empty());
        assert_eq!(conv.document_reference(), Some("abc123"));
        assert!(conv.last_message().is_none());
    }

    #[test]
    fn test_title_for_document_keeps_twelve_chars() {
        assert_eq!(Conversation::title_for_document("report.pdf"), "Chat — report.pdf");
        assert_eq!(
            Conversation::title_for_document("quarterly_report_2024.pdf"),
            "Chat — quarterly_re"
        );
    }

    #[test]
    fn test_ends_with_user_text_checks_only_last_message() {
        let mut conv = Conversation::new(ConversationId::new(1), Some("d".into()), None);
        conv.push(Message::user("What was revenue?"));
        assert!(conv.ends_with_user_text("What was revenue?"));

        conv.push(Message::assistant("Revenue was $5M."));
        assert!(!conv.ends_with_user_text("What was revenue?"));
    }

    #[test]
    fn test_ends_with_user_text_ignores_assistant_text() {
        let mut conv = Conversation::new(ConversationId::new(1), Some("d".into()), None);
        conv.push(Message::assistant("same"));
        assert!(!conv.ends_with_user_text("same"));
    }
}
