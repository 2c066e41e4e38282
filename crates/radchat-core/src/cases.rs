//! Case collection with whole-document persistence.
//!
//! Same storage discipline as sessions: one key, one JSON array,
//! corrupt loads degrade to empty, empty collections are never written.

use crate::event_bus::EventBus;
use crate::export::{export_case, ExportFormat};
use crate::ports::StoragePort;
use radchat_types::case::{CaseDraft, CasePatch, RadiologyCase};
use radchat_types::event::ChatEvent;
use radchat_types::{AppError, Result};

pub const CASES_KEY: &str = "radiology-cases";

pub struct CaseStore {
    cases: Vec<RadiologyCase>,
    current_id: Option<String>,
    event_bus: EventBus,
}

impl CaseStore {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            cases: Vec::new(),
            current_id: None,
            event_bus,
        }
    }

    pub async fn load(&mut self, storage: &dyn StoragePort) -> Result<()> {
        match storage.get(CASES_KEY).await? {
            Some(raw) => match serde_json::from_str::<Vec<RadiologyCase>>(&raw) {
                Ok(cases) => self.cases = cases,
                Err(e) => {
                    log::warn!("discarding corrupt case document: {}", e);
                    self.cases.clear();
                }
            },
            None => self.cases.clear(),
        }
        Ok(())
    }

    /// Serialized form of the collection, or None while it is empty
    pub fn to_document(&self) -> Result<Option<String>> {
        if self.cases.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::to_string(&self.cases)?))
    }

    pub async fn persist(&self, storage: &dyn StoragePort) -> Result<()> {
        match self.to_document()? {
            Some(raw) => storage.set(CASES_KEY, &raw).await,
            None => Ok(()),
        }
    }

    pub fn list(&self) -> &[RadiologyCase] {
        &self.cases
    }

    pub fn get(&self, id: &str) -> Option<&RadiologyCase> {
        self.cases.iter().find(|c| c.id == id)
    }

    /// The case last created or explicitly loaded, if any
    pub fn current(&self) -> Option<&RadiologyCase> {
        let id = self.current_id.as_deref()?;
        self.get(id)
    }

    /// Make an existing case current
    pub fn load_case(&mut self, id: &str) -> Result<&RadiologyCase> {
        let idx = self
            .cases
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound("Case not found".to_string()))?;
        self.current_id = Some(id.to_string());
        Ok(&self.cases[idx])
    }

    pub fn create(&mut self, draft: CaseDraft) -> &RadiologyCase {
        let case = RadiologyCase::from_draft(draft);
        self.current_id = Some(case.id.clone());
        self.event_bus.emit(ChatEvent::CaseCreated {
            case_id: case.id.clone(),
        });
        self.cases.push(case);
        &self.cases[self.cases.len() - 1]
    }

    pub fn update(&mut self, id: &str, patch: CasePatch) -> Result<&RadiologyCase> {
        let case = self
            .cases
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound("Case not found".to_string()))?;
        case.apply(patch);
        self.event_bus.emit(ChatEvent::CaseUpdated {
            case_id: id.to_string(),
        });
        Ok(&*case)
    }

    pub fn remove(&mut self, id: &str) -> Result<RadiologyCase> {
        let idx = self
            .cases
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound("Case not found".to_string()))?;
        let removed = self.cases.remove(idx);
        if self.current_id.as_deref() == Some(id) {
            self.current_id = None;
        }
        self.event_bus.emit(ChatEvent::CaseDeleted {
            case_id: id.to_string(),
        });
        Ok(removed)
    }

    /// Render a stored case in an export format
    pub fn export(&self, id: &str, format: ExportFormat) -> Result<String> {
        let case = self
            .get(id)
            .ok_or_else(|| AppError::NotFound("Case not found".to_string()))?;
        export_case(case, format)
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }
}
