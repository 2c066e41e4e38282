use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::ImageAttachment;

/// Imaging modality a case was acquired with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadiologyModality {
    #[serde(rename = "CT")]
    Ct,
    #[serde(rename = "MRI")]
    Mri,
    #[serde(rename = "X-Ray")]
    XRay,
    #[serde(rename = "Ultrasound")]
    Ultrasound,
    #[serde(rename = "Nuclear Medicine")]
    NuclearMedicine,
    #[serde(rename = "Interventional")]
    Interventional,
    #[serde(rename = "Mammography")]
    Mammography,
    #[serde(rename = "Other")]
    Other,
}

impl RadiologyModality {
    pub fn label(&self) -> &'static str {
        match self {
            RadiologyModality::Ct => "Computed Tomography (CT)",
            RadiologyModality::Mri => "Magnetic Resonance Imaging (MRI)",
            RadiologyModality::XRay => "Plain Radiography (X-Ray)",
            RadiologyModality::Ultrasound => "Ultrasound",
            RadiologyModality::NuclearMedicine => "Nuclear Medicine",
            RadiologyModality::Interventional => "Interventional Radiology",
            RadiologyModality::Mammography => "Mammography",
            RadiologyModality::Other => "Other Modality",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            RadiologyModality::Ct => "CT",
            RadiologyModality::Mri => "MRI",
            RadiologyModality::XRay => "X-Ray",
            RadiologyModality::Ultrasound => "Ultrasound",
            RadiologyModality::NuclearMedicine => "Nuclear Medicine",
            RadiologyModality::Interventional => "Interventional",
            RadiologyModality::Mammography => "Mammography",
            RadiologyModality::Other => "Other",
        }
    }

    pub fn all() -> &'static [RadiologyModality] {
        &[
            RadiologyModality::Ct,
            RadiologyModality::Mri,
            RadiologyModality::XRay,
            RadiologyModality::Ultrasound,
            RadiologyModality::NuclearMedicine,
            RadiologyModality::Interventional,
            RadiologyModality::Mammography,
            RadiologyModality::Other,
        ]
    }
}

/// Lifecycle state of a case record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    Draft,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Archived,
}

impl CaseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CaseStatus::Draft => "Draft",
            CaseStatus::InProgress => "In Progress",
            CaseStatus::Completed => "Completed",
            CaseStatus::Archived => "Archived",
        }
    }

    pub fn all() -> &'static [CaseStatus] {
        &[
            CaseStatus::Draft,
            CaseStatus::InProgress,
            CaseStatus::Completed,
            CaseStatus::Archived,
        ]
    }
}

/// A standalone clinical record, independent of any conversation.
/// Linked to a chat session only by an opaque id, never an owning pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiologyCase {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub patient_id: Option<String>,
    pub title: String,
    pub description: String,
    pub modality: RadiologyModality,
    pub findings: String,
    pub impression: String,
    pub chat_session_id: String,
    #[serde(default)]
    pub images: Vec<ImageAttachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: CaseStatus,
}

impl RadiologyCase {
    /// Build a case from a draft, filling unset fields with defaults
    /// and stamping both timestamps to now.
    pub fn from_draft(draft: CaseDraft) -> Self {
        let now = Utc::now();
        Self {
            id: format!("case-{}", Uuid::new_v4()),
            patient_id: draft.patient_id,
            title: draft.title.unwrap_or_else(|| "Untitled Case".to_string()),
            description: draft.description.unwrap_or_default(),
            modality: draft.modality.unwrap_or(RadiologyModality::Other),
            findings: draft.findings.unwrap_or_default(),
            impression: draft.impression.unwrap_or_default(),
            chat_session_id: draft.chat_session_id.unwrap_or_default(),
            images: draft.images.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            status: draft.status.unwrap_or(CaseStatus::Draft),
        }
    }

    /// Merge a partial patch into this record and refresh `updated_at`.
    pub fn apply(&mut self, patch: CasePatch) {
        if let Some(v) = patch.patient_id {
            self.patient_id = Some(v);
        }
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.modality {
            self.modality = v;
        }
        if let Some(v) = patch.findings {
            self.findings = v;
        }
        if let Some(v) = patch.impression {
            self.impression = v;
        }
        if let Some(v) = patch.chat_session_id {
            self.chat_session_id = v;
        }
        if let Some(v) = patch.images {
            self.images = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        self.updated_at = Utc::now();
    }
}

/// Input for creating a case; every field optional, validated at the
/// system boundary before entering the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
pub struct CaseDraft {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub patient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub modality: Option<RadiologyModality>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub findings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub impression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub chat_session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub images: Option<Vec<ImageAttachment>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<CaseStatus>,
}

/// Partial update for an existing case
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasePatch {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub patient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub modality: Option<RadiologyModality>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub findings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub impression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub chat_session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub images: Option<Vec<ImageAttachment>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<CaseStatus>,
}
