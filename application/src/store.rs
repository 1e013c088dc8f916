//! In-memory conversation store.
//!
//! [`ConversationStore`] is the single owner of every [`Conversation`] in the
//! process. Flows and the session state refer to conversations by
//! [`ConversationId`] and go through the store for every read and write.
//!
//! All operations run under one mutex, so id issuance, insertion and appends
//! are atomic relative to each other and readers only ever see complete
//! conversations. Reads hand out snapshots (clones), never references into
//! the table.

use docchat_domain::{Conversation, ConversationId, Message};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::debug;

/// Errors returned by [`ConversationStore`] operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Conversation {0} not found")]
    NotFound(ConversationId),
}

/// Concurrency-safe table of conversations.
pub struct ConversationStore {
    conversations: Mutex<BTreeMap<ConversationId, Conversation>>,
    next_id: AtomicU64,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            conversations: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    // Critical sections insert a complete value or push one message, so the
    // table stays consistent even when the lock is poisoned.
    fn table(&self) -> MutexGuard<'_, BTreeMap<ConversationId, Conversation>> {
        self.conversations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an empty conversation with the next id.
    pub fn create(&self, document_reference: Option<String>, title: Option<String>) -> Conversation {
        let mut table = self.table();
        let id = ConversationId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let conversation = Conversation::new(id, document_reference, title);
        table.insert(id, conversation.clone());
        debug!("Created conversation {}", id);
        conversation
    }

    /// Snapshot of a conversation.
    pub fn get(&self, id: ConversationId) -> Result<Conversation, StoreError> {
        self.table().get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Snapshot of all conversations, most recently created first.
    pub fn list(&self) -> Vec<Conversation> {
        self.table().values().rev().cloned().collect()
    }

    /// Snapshot of a conversation's messages.
    pub fn messages(&self, id: ConversationId) -> Result<Vec<Message>, StoreError> {
        self.table()
            .get(&id)
            .map(|c| c.messages().to_vec())
            .ok_or(StoreError::NotFound(id))
    }

    /// Append a message to a conversation.
    pub fn append_message(&self, id: ConversationId, message: Message) -> Result<(), StoreError> {
        let mut table = self.table();
        let conversation = table.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        conversation.push(message);
        Ok(())
    }

    /// Append `message` unless the conversation already ends with an equal
    /// message. Returns whether the message was appended.
    ///
    /// The check and the append happen under the same lock acquisition.
    pub fn append_unless_last(
        &self,
        id: ConversationId,
        message: Message,
    ) -> Result<bool, StoreError> {
        let mut table = self.table();
        let conversation = table.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if conversation.last_message() == Some(&message) {
            return Ok(false);
        }
        conversation.push(message);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
