use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require, Draft, Record, RecordId, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Contract,
    Invoice,
    Policy,
    #[default]
    Other,
}

/// Pointer to a file kept in the backend's object storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub category: DocumentCategory,
    pub url: String,
    #[serde(default)]
    pub partner_id: Option<RecordId>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub title: String,
    #[serde(default)]
    pub category: DocumentCategory,
    pub url: String,
    #[serde(default)]
    pub partner_id: Option<RecordId>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
}

impl Draft for DocumentDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("url", &self.url)
    }
}

impl Record for Document {
    const TABLE: &'static str = "documents";
    type Draft = DocumentDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: RecordId, now: DateTime<Utc>, draft: DocumentDraft) -> Self {
        Self {
            id,
            title: draft.title.trim().to_string(),
            category: draft.category,
            url: draft.url.trim().to_string(),
            partner_id: draft.partner_id,
            size_bytes: draft.size_bytes,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: DocumentDraft, now: DateTime<Utc>) {
        self.title = draft.title.trim().to_string();
        self.category = draft.category;
        self.url = draft.url.trim().to_string();
        self.partner_id = draft.partner_id;
        self.size_bytes = draft.size_bytes;
        self.updated_at = now;
    }
}
