//! Observable session state.
//!
//! [`ObservableSessionState`] sits between the presentation layer and the two
//! flows. It keeps the "current view" projections (conversation list, active
//! transcript, ingestion diagnostics, busy flags) in a single
//! [`SessionView`] cell and republishes it after every mutation.
//!
//! Observers subscribe with [`ObservableSessionState::subscribe`] and only
//! ever read; every write goes through the methods on this type.
//!
//! Busy flags follow `Idle → Busy → Idle`. The flag is cleared when the
//! operation's future finishes or is dropped, whatever the outcome. Callers
//! must not start a second ingestion (or chat turn) while the matching flag is
//! set; the store stays consistent if they do, but the flag will not.

use crate::ports::content_resolver::ContentHandle;
use crate::store::ConversationStore;
use crate::use_cases::chat_turn::ChatTurnUseCase;
use crate::use_cases::ingest_document::IngestDocumentUseCase;
use docchat_domain::{Conversation, ConversationId, Message};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

/// Diagnostic published when an ingestion starts.
pub const ANALYSIS_STARTED: &str = "Started analysis request.";

/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    /// All conversations, most recent first.
    pub conversations: Vec<Conversation>,
    pub active_conversation_id: Option<ConversationId>,
    /// Transcript of the active conversation.
    pub messages: Vec<Message>,
    /// Status lines from the most recent ingestion.
    pub diagnostics: Vec<String>,
    pub is_analyzing: bool,
    pub is_sending: bool,
}

#[derive(Clone, Copy)]
enum Busy {
    Analyzing,
    Sending,
}

impl Busy {
    fn flag(self, view: &mut SessionView) -> &mut bool {
        match self {
            Busy::Analyzing => &mut view.is_analyzing,
            Busy::Sending => &mut view.is_sending,
        }
    }
}

/// Clears a busy flag when dropped.
struct BusyGuard<'a> {
    view: &'a watch::Sender<SessionView>,
    busy: Busy,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let busy = self.busy;
        self.view.send_modify(|v| *busy.flag(v) = false);
    }
}

/// Orchestration boundary between the UI and the conversation flows.
pub struct ObservableSessionState {
    store: Arc<ConversationStore>,
    ingest: IngestDocumentUseCase,
    chat: ChatTurnUseCase,
    view: watch::Sender<SessionView>,
}

impl ObservableSessionState {
    pub fn new(
        store: Arc<ConversationStore>,
        ingest: IngestDocumentUseCase,
        chat: ChatTurnUseCase,
    ) -> Self {
        let initial = SessionView {
            conversations: store.list(),
            ..SessionView::default()
        };
        let (view, _) = watch::channel(initial);
        Self {
            store,
            ingest,
            chat,
            view,
        }
    }

    /// Receive every published [`SessionView`].
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view.subscribe()
    }

    /// Current view.
    pub fn view(&self) -> SessionView {
        self.view.borrow().clone()
    }

    pub fn active_conversation_id(&self) -> Option<ConversationId> {
        self.view.borrow().active_conversation_id
    }

    fn mark_busy(&self, busy: Busy) -> BusyGuard<'_> {
        self.view.send_modify(|v| {
            let flag = busy.flag(v);
            if *flag {
                warn!("Starting an operation while a previous one is still running");
            }
            *flag = true;
        });
        BusyGuard {
            view: &self.view,
            busy,
        }
    }

    /// Make `id` the active conversation and load its transcript.
    ///
    /// An unknown id yields an empty transcript.
    pub fn select_conversation(&self, id: ConversationId) {
        let messages = self.store.messages(id).unwrap_or_default();
        self.view.send_modify(|v| {
            v.active_conversation_id = Some(id);
            v.messages = messages;
        });
    }

    /// Reload every projection from the store.
    pub fn refresh(&self) {
        let conversations = self.store.list();
        self.view.send_modify(|v| {
            v.messages = v
                .active_conversation_id
                .and_then(|id| conversations.iter().find(|c| c.id() == id))
                .map(|c| c.messages().to_vec())
                .unwrap_or_default();
            v.conversations = conversations;
        });
    }

    /// Reload the conversation list, and the transcript if `id` is still active.
    fn refresh_conversation(&self, id: ConversationId) {
        let conversations = self.store.list();
        self.view.send_modify(|v| {
            if v.active_conversation_id == Some(id)
                && let Some(conversation) = conversations.iter().find(|c| c.id() == id)
            {
                v.messages = conversation.messages().to_vec();
            }
            v.conversations = conversations;
        });
    }

    /// Upload and analyze a document, then switch to its new conversation.
    ///
    /// Failures are reported through [`SessionView::diagnostics`]. Returns
    /// the new conversation's id on success.
    pub async fn run_ingestion(&self, handle: &ContentHandle) -> Option<ConversationId> {
        let _busy = self.mark_busy(Busy::Analyzing);
        self.view
            .send_modify(|v| v.diagnostics = vec![ANALYSIS_STARTED.to_string()]);

        match self.ingest.execute(handle).await {
            Ok(output) => {
                let id = output.conversation.id();
                let conversations = self.store.list();
                self.view.send_modify(|v| v.conversations = conversations);
                self.select_conversation(id);
                self.view.send_modify(|v| v.diagnostics = output.diagnostics);
                Some(id)
            }
            Err(e) => {
                self.view
                    .send_modify(|v| v.diagnostics = vec![format!("Analyze failed: {}", e)]);
                None
            }
        }
    }

    /// Ask a question in the active conversation.
    ///
    /// Does nothing when no conversation is active. The question shows up in
    /// [`SessionView::messages`] before the service answers; the transcript
    /// is reloaded from the store once the turn finishes, whether it succeeded
    /// or not. Returns whether the service answered.
    pub async fn run_chat_turn(&self, text: &str) -> bool {
        let Some(id) = self.active_conversation_id() else {
            return false;
        };
        let _busy = self.mark_busy(Busy::Sending);

        let pending = match self.chat.begin(id, text) {
            Ok(pending) => pending,
            Err(e) => {
                warn!("Chat turn rejected: {}", e);
                self.refresh_conversation(id);
                return false;
            }
        };
        self.refresh_conversation(id);

        let outcome = pending.complete().await;
        self.refresh_conversation(id);
        outcome.is_ok()
    }
}
