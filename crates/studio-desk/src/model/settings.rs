use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{require, Draft, Record, RecordId, ValidationError};

/// Workspace-wide preferences. The table holds a single row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub id: RecordId,
    pub workspace_name: String,
    pub currency: String,
    pub vat_rate_pct: u8,
    pub timezone: String,
    pub booking_buffer_minutes: u16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Settings {
    pub const ROW_ID: RecordId = RecordId(Uuid::nil());

    pub fn defaults(now: DateTime<Utc>) -> Self {
        Self::from_draft(Self::ROW_ID, now, SettingsDraft::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsDraft {
    pub workspace_name: String,
    pub currency: String,
    pub vat_rate_pct: u8,
    pub timezone: String,
    #[serde(default)]
    pub booking_buffer_minutes: u16,
}

impl Default for SettingsDraft {
    fn default() -> Self {
        Self {
            workspace_name: "Studio Desk".to_string(),
            currency: "EUR".to_string(),
            vat_rate_pct: 21,
            timezone: "Europe/Amsterdam".to_string(),
            booking_buffer_minutes: 15,
        }
    }
}

impl Draft for SettingsDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("workspace_name", &self.workspace_name)?;
        require("timezone", &self.timezone)?;
        let currency = self.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::OutOfRange {
                field: "currency",
                detail: format!("'{currency}' is not a three-letter ISO code"),
            });
        }
        if self.vat_rate_pct > 100 {
            return Err(ValidationError::OutOfRange {
                field: "vat_rate_pct",
                detail: format!("{} exceeds 100", self.vat_rate_pct),
            });
        }
        Ok(())
    }
}

impl Record for Settings {
    const TABLE: &'static str = "workspace_settings";
    type Draft = SettingsDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: RecordId, now: DateTime<Utc>, draft: SettingsDraft) -> Self {
        let mut settings = Self {
            id,
            workspace_name: String::new(),
            currency: String::new(),
            vat_rate_pct: 0,
            timezone: String::new(),
            booking_buffer_minutes: 0,
            created_at: now,
            updated_at: now,
        };
        settings.apply(draft, now);
        settings
    }

    fn apply(&mut self, draft: SettingsDraft, now: DateTime<Utc>) {
        self.workspace_name = draft.workspace_name.trim().to_string();
        self.currency = draft.currency.trim().to_ascii_uppercase();
        self.vat_rate_pct = draft.vat_rate_pct;
        self.timezone = draft.timezone.trim().to_string();
        self.booking_buffer_minutes = draft.booking_buffer_minutes;
        self.updated_at = now;
    }
}
