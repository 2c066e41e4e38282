use serde::{Deserialize, Serialize};

/// Events emitted by the chat controller and case store.
/// The UI drains these for reactive updates; the app layer uses them
/// to trigger store-on-change persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A new session was created and made current
    SessionCreated { session_id: String },

    /// The current session changed
    SessionSwitched { session_id: String },

    /// A session was removed
    SessionDeleted { session_id: String },

    /// A user message was appended and the completion request is in flight
    SendStart { session_id: String },

    /// The assistant reply was appended
    AssistantReply { text: String, confidence: Option<f64> },

    /// The current session's system prompt was replaced
    PromptUpdated { session_id: String },

    /// A case record was created
    CaseCreated { case_id: String },

    /// A case record was patched
    CaseUpdated { case_id: String },

    /// A case record was removed
    CaseDeleted { case_id: String },

    /// An error occurred; dismissible, cleared on the next action
    Error { message: String },
}
