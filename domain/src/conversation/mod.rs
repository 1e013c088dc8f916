//! Conversation domain.
//!
//! - [`entities::Conversation`]: an append-only transcript about one document
//! - [`entities::Message`]: a single message within a conversation
//! - [`entities::ConversationId`]: process-unique, monotonically issued id

pub mod entities;
