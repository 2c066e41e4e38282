//! Session collection with whole-document persistence.
//!
//! All sessions live under one storage key as a single JSON array.
//! Loads degrade to an empty collection when the stored document is
//! corrupt; writes are skipped while the collection is empty so a fresh
//! start never clobbers data from another tab.

use crate::ports::StoragePort;
use radchat_types::message::{ImageAttachment, Message};
use radchat_types::prompt::{by_category, default_prompt, RadiologyCategory};
use radchat_types::session::{derive_title, ChatSession, SessionSummary};
use radchat_types::{AppError, Result};

pub const SESSIONS_KEY: &str = "radiology-chat-sessions";

pub struct SessionStore {
    sessions: Vec<ChatSession>,
    current_id: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
            current_id: None,
        }
    }

    /// Load the collection from storage. A missing document starts empty;
    /// a corrupt one is logged and discarded. The most recently created
    /// session becomes current.
    pub async fn load(&mut self, storage: &dyn StoragePort) -> Result<()> {
        match storage.get(SESSIONS_KEY).await? {
            Some(raw) => match serde_json::from_str::<Vec<ChatSession>>(&raw) {
                Ok(sessions) => {
                    self.current_id = sessions.last().map(|s| s.id.clone());
                    self.sessions = sessions;
                }
                Err(e) => {
                    log::warn!("discarding corrupt session document: {}", e);
                    self.sessions.clear();
                    self.current_id = None;
                }
            },
            None => {
                self.sessions.clear();
                self.current_id = None;
            }
        }
        Ok(())
    }

    /// Serialized form of the collection, or None while it is empty.
    /// Snapshot for deferred writes; empty collections are never
    /// persisted.
    pub fn to_document(&self) -> Result<Option<String>> {
        if self.sessions.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::to_string(&self.sessions)?))
    }

    /// Write the collection back. Empty collections are never persisted.
    pub async fn persist(&self, storage: &dyn StoragePort) -> Result<()> {
        match self.to_document()? {
            Some(raw) => storage.set(SESSIONS_KEY, &raw).await,
            None => Ok(()),
        }
    }

    /// Create a session and make it current. Prompt and category fall
    /// back to the catalog default when unset; a category alone picks
    /// its catalog prompt.
    pub fn create(
        &mut self,
        system_prompt: Option<String>,
        category: Option<RadiologyCategory>,
    ) -> &ChatSession {
        let category = category.unwrap_or(default_prompt().category);
        let prompt =
            system_prompt.unwrap_or_else(|| by_category(category).prompt.to_string());
        let session = ChatSession::new(prompt, category);
        self.current_id = Some(session.id.clone());
        self.sessions.push(session);
        &self.sessions[self.sessions.len() - 1]
    }

    pub fn list(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn summaries(&self) -> Vec<SessionSummary> {
        self.sessions.iter().map(ChatSession::summary).collect()
    }

    pub fn get(&self, id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn current(&self) -> Option<&ChatSession> {
        let id = self.current_id.as_deref()?;
        self.get(id)
    }

    pub fn current_mut(&mut self) -> Option<&mut ChatSession> {
        let id = self.current_id.clone()?;
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    /// Make an existing session current. An unknown id is ignored,
    /// leaving the current pointer untouched; returns whether the
    /// switch happened.
    pub fn switch(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            log::warn!("ignoring switch to unknown session {}", id);
            return false;
        }
        self.current_id = Some(id.to_string());
        true
    }

    /// Remove a session. When the current one goes, the most recently
    /// created survivor takes its place.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            return Err(AppError::NotFound(format!("Session not found: {}", id)));
        }
        if self.current_id.as_deref() == Some(id) {
            self.current_id = self.sessions.last().map(|s| s.id.clone());
        }
        Ok(())
    }

    /// Replace the current session's system prompt
    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) -> Result<&ChatSession> {
        let session = self
            .current_mut()
            .ok_or_else(|| AppError::Validation("No active session".to_string()))?;
        session.system_prompt = prompt.into();
        session.updated_at = chrono::Utc::now();
        Ok(&*session)
    }

    /// Append a user message to the current session. The first user
    /// message also titles the session.
    pub fn push_user(
        &mut self,
        content: &str,
        images: Vec<ImageAttachment>,
    ) -> Result<&ChatSession> {
        let session = self
            .current_mut()
            .ok_or_else(|| AppError::Validation("No active session".to_string()))?;
        if session.messages.is_empty() {
            session.title = derive_title(content);
        }
        session.messages.push(Message::user_with_images(content, images));
        session.updated_at = chrono::Utc::now();
        Ok(&*session)
    }

    /// Append an assistant reply to the current session
    pub fn push_assistant(&mut self, content: &str) -> Result<&ChatSession> {
        let session = self
            .current_mut()
            .ok_or_else(|| AppError::Validation("No active session".to_string()))?;
        session.messages.push(Message::assistant(content));
        session.updated_at = chrono::Utc::now();
        Ok(&*session)
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
