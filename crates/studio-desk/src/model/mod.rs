//! Row types for the workspace tables.
//!
//! Each entity has a stored record (identifier, descriptive fields and
//! timestamps) and a draft carrying the user-editable fields submitted by a
//! form. Drafts are validated before they reach the backend; beyond required
//! fields the client enforces nothing.

mod booking;
mod directory;
mod document;
mod finance;
mod marketing;
mod sales;
mod settings;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use booking::{Booking, BookingDraft, BookingStatus};
pub use directory::{
    Customer, CustomerDraft, Partner, PartnerDraft, PartnerStatus, Studio, StudioDraft,
};
pub use document::{Document, DocumentCategory, DocumentDraft};
pub use finance::{Transaction, TransactionDraft, TransactionKind, TransactionStatus};
pub use marketing::{MarketingChannel, MarketingPost, MarketingPostDraft, PostStatus};
pub use sales::{LeadStatus, SalesLead, SalesLeadDraft};
pub use settings::{Settings, SettingsDraft};

/// Backend-generated row identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub Uuid);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim()).map(Self)
    }
}

/// A row mirrored from one of the backend tables.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name of the backend table holding these rows.
    const TABLE: &'static str;

    type Draft: Draft;

    fn id(&self) -> RecordId;
    fn created_at(&self) -> DateTime<Utc>;

    /// Builds a fresh row from a validated draft.
    fn from_draft(id: RecordId, now: DateTime<Utc>, draft: Self::Draft) -> Self;

    /// Replaces the editable fields, keeping identity and creation time.
    fn apply(&mut self, draft: Self::Draft, now: DateTime<Utc>);
}

/// Form payload for creating or editing a [`Record`].
pub trait Draft: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Client-side rejection of a draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} is out of range: {detail}")]
    OutOfRange { field: &'static str, detail: String },
    #[error("end time must be after start time")]
    InvalidWindow,
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Trims a user-entered optional text and drops it when blank.
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
