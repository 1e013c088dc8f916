//! Domain layer for docchat
//!
//! This crate contains the core entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! A conversation is an append-only transcript tied to one analyzed document.
//! It is only ever created after the analysis service accepted the document
//! and handed back a document reference.
//!
//! ## Document analysis
//!
//! - **Analysis**: summary, topics and extracted contact fields for an upload
//! - **Chat answer**: the service's reply to a question about a document

pub mod conversation;
pub mod core;
pub mod document;
pub mod util;

// Re-export commonly used types
pub use conversation::entities::{Conversation, ConversationId, Message, Role};
pub use core::error::DomainError;
pub use document::value_objects::{ChatAnswer, DocumentAnalysis, SourceRecord, Topic};
