//! Chat controller — the send loop around a session collection.
//!
//! One user turn: append the user message, format the outbound window,
//! call the completion port, append the reply. Requests are single-flight
//! per controller; a second send while one is in flight is rejected
//! instead of queued.

use crate::completion::build_outbound;
use crate::event_bus::EventBus;
use crate::ports::{AiResponse, CompletionPort};
use crate::sessions::SessionStore;
use radchat_types::event::ChatEvent;
use radchat_types::message::{ImageAttachment, OutboundMessage};
use radchat_types::prompt::RadiologyCategory;
use radchat_types::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Sending,
    Error(String),
}

pub struct ChatController {
    pub sessions: SessionStore,
    pub state: ChatState,
    event_bus: EventBus,
}

impl ChatController {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            sessions: SessionStore::new(),
            state: ChatState::Idle,
            event_bus,
        }
    }

    /// Create a session and make it current. Returns the new id.
    pub fn new_session(
        &mut self,
        system_prompt: Option<String>,
        category: Option<RadiologyCategory>,
    ) -> String {
        let id = self.sessions.create(system_prompt, category).id.clone();
        self.state = ChatState::Idle;
        self.event_bus.emit(ChatEvent::SessionCreated {
            session_id: id.clone(),
        });
        id
    }

    /// Make another session current. Unknown ids are ignored.
    pub fn switch_session(&mut self, id: &str) {
        if self.sessions.switch(id) {
            self.state = ChatState::Idle;
            self.event_bus.emit(ChatEvent::SessionSwitched {
                session_id: id.to_string(),
            });
        }
    }

    pub fn delete_session(&mut self, id: &str) -> Result<()> {
        self.sessions.delete(id)?;
        self.event_bus.emit(ChatEvent::SessionDeleted {
            session_id: id.to_string(),
        });
        Ok(())
    }

    /// Replace the current session's system prompt
    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) -> Result<()> {
        let id = self.sessions.set_system_prompt(prompt)?.id.clone();
        self.event_bus
            .emit(ChatEvent::PromptUpdated { session_id: id });
        Ok(())
    }

    /// Stage a user turn: validate, append the user message, and return
    /// the outbound window for the completion call. Leaves the
    /// controller in the `Sending` state; every `begin_send` must be
    /// paired with a `complete_send`.
    ///
    /// Split from the completion call so the caller can drop any
    /// borrow of the controller while the request is in flight.
    pub fn begin_send(
        &mut self,
        content: &str,
        images: Vec<ImageAttachment>,
    ) -> Result<Vec<OutboundMessage>> {
        if self.state == ChatState::Sending {
            return Err(AppError::Validation(
                "A message is already in flight".to_string(),
            ));
        }
        if content.trim().is_empty() && images.is_empty() {
            return Err(AppError::Validation("Message is empty".to_string()));
        }

        if self.sessions.current().is_none() {
            self.new_session(None, None);
        }

        let session = self.sessions.push_user(content, images.clone())?;
        let session_id = session.id.clone();
        let outbound = build_outbound(&session.system_prompt, &session.messages, &images);

        self.state = ChatState::Sending;
        self.event_bus.emit(ChatEvent::SendStart { session_id });
        Ok(outbound)
    }

    /// Record the outcome of an in-flight turn started by `begin_send`.
    pub fn complete_send(&mut self, result: Result<AiResponse>) -> Result<()> {
        match result {
            Ok(reply) => {
                self.sessions.push_assistant(&reply.message)?;
                self.state = ChatState::Idle;
                self.event_bus.emit(ChatEvent::AssistantReply {
                    text: reply.message,
                    confidence: reply.confidence,
                });
                Ok(())
            }
            Err(e) => {
                self.state = ChatState::Error(e.to_string());
                self.event_bus.emit(ChatEvent::Error {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Run one user turn against the completion port.
    ///
    /// Creates a default session first when none is current, so the
    /// first send from a fresh start both creates and sends.
    pub async fn send_message(
        &mut self,
        content: &str,
        images: Vec<ImageAttachment>,
        llm: &dyn CompletionPort,
    ) -> Result<()> {
        let outbound = self.begin_send(content, images)?;
        let result = llm.send_message(outbound).await;
        self.complete_send(result)
    }

    /// Clear a sticky error state without touching session data
    pub fn clear_error(&mut self) {
        if matches!(self.state, ChatState::Error(_)) {
            self.state = ChatState::Idle;
        }
    }
}
