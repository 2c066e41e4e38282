//! UI-level state that drives rendering.
//! This is a read-only projection of the chat controller and case store,
//! updated each frame by draining the EventBus.

use radchat_types::case::{CaseDraft, CasePatch, CaseStatus, RadiologyCase, RadiologyModality};
use radchat_types::event::ChatEvent;
use radchat_types::message::{ImageAttachment, Message, Role};

/// Which main view is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Chat,
    Cases,
}

/// A transcript entry for display
#[derive(Clone)]
pub struct ChatEntry {
    pub role: Role,
    pub content: String,
    pub confidence: Option<f64>,
    pub image_count: usize,
}

/// Editable case fields backing the case form
#[derive(Clone, Default)]
pub struct CaseForm {
    pub title: String,
    pub patient_id: String,
    pub description: String,
    pub findings: String,
    pub impression: String,
    pub modality: Option<RadiologyModality>,
    pub status: Option<CaseStatus>,
    /// id of the case being edited; None while creating
    pub editing: Option<String>,
}

impl CaseForm {
    pub fn from_case(case: &RadiologyCase) -> Self {
        Self {
            title: case.title.clone(),
            patient_id: case.patient_id.clone().unwrap_or_default(),
            description: case.description.clone(),
            findings: case.findings.clone(),
            impression: case.impression.clone(),
            modality: Some(case.modality),
            status: Some(case.status),
            editing: Some(case.id.clone()),
        }
    }

    pub fn to_draft(&self, chat_session_id: Option<&str>) -> CaseDraft {
        CaseDraft {
            patient_id: non_empty(&self.patient_id),
            title: non_empty(&self.title),
            description: non_empty(&self.description),
            modality: self.modality,
            findings: non_empty(&self.findings),
            impression: non_empty(&self.impression),
            chat_session_id: chat_session_id.map(str::to_string),
            images: None,
            status: self.status,
        }
    }

    pub fn to_patch(&self) -> CasePatch {
        CasePatch {
            patient_id: non_empty(&self.patient_id),
            title: non_empty(&self.title),
            description: Some(self.description.clone()),
            modality: self.modality,
            findings: Some(self.findings.clone()),
            impression: Some(self.impression.clone()),
            chat_session_id: None,
            images: None,
            status: self.status,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// State visible to UI panels
pub struct UiState {
    /// Current session transcript, rebuilt after session changes
    pub transcript: Vec<ChatEntry>,
    /// Set when the transcript no longer matches the current session
    pub transcript_stale: bool,
    /// A completion request is in flight
    pub sending: bool,
    /// Dismissible error banner
    pub error_banner: Option<String>,
    /// Status line text
    pub status_text: String,
    /// Input field content
    pub input_text: String,
    /// Images staged for the next message
    pub pending_images: Vec<ImageAttachment>,
    pub active_view: ActiveView,
    /// Whether the prompt catalog panel is open
    pub show_prompts: bool,
    pub case_form: CaseForm,
    pub show_case_form: bool,
    /// Rendered export shown in a pop-up: (file name, content)
    pub export_preview: Option<(String, String)>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            transcript_stale: false,
            sending: false,
            error_banner: None,
            status_text: "Ready".to_string(),
            input_text: String::new(),
            pending_images: Vec::new(),
            active_view: ActiveView::Chat,
            show_prompts: false,
            case_form: CaseForm::default(),
            show_case_form: false,
            export_preview: None,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::SessionCreated { .. }
                | ChatEvent::SessionSwitched { .. }
                | ChatEvent::SessionDeleted { .. } => {
                    self.transcript_stale = true;
                    self.error_banner = None;
                    self.status_text = "Ready".to_string();
                }
                ChatEvent::SendStart { .. } => {
                    self.sending = true;
                    self.error_banner = None;
                    self.status_text = "Consulting assistant...".to_string();
                }
                ChatEvent::AssistantReply { text, confidence } => {
                    self.transcript.push(ChatEntry {
                        role: Role::Assistant,
                        content: text,
                        confidence,
                        image_count: 0,
                    });
                    self.sending = false;
                    self.status_text = "Ready".to_string();
                }
                ChatEvent::PromptUpdated { .. } => {
                    self.status_text = "System prompt updated".to_string();
                }
                ChatEvent::CaseCreated { .. }
                | ChatEvent::CaseUpdated { .. }
                | ChatEvent::CaseDeleted { .. } => {}
                ChatEvent::Error { message } => {
                    self.sending = false;
                    self.status_text = "Error".to_string();
                    self.error_banner = Some(message);
                }
            }
        }
    }

    /// Rebuild the transcript from the current session's messages
    pub fn sync_transcript(&mut self, messages: &[Message]) {
        self.transcript = messages
            .iter()
            .map(|m| ChatEntry {
                role: m.role,
                content: m.content.clone(),
                confidence: None,
                image_count: m.images.len(),
            })
            .collect();
        self.transcript_stale = false;
    }

    /// Add the just-submitted user message to the display
    pub fn push_user_message(&mut self, text: &str, image_count: usize) {
        self.transcript.push(ChatEntry {
            role: Role::User,
            content: text.to_string(),
            confidence: None,
            image_count,
        });
    }

    pub fn is_busy(&self) -> bool {
        self.sending
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
