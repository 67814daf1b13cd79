use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{clean, Draft, Record, RecordId, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
        }
    }
}

/// Reservation of a studio for a time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: RecordId,
    pub studio_id: RecordId,
    pub customer_id: RecordId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub total_cents: i64,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Whether any part of the booking falls on `date` (UTC calendar day).
    pub fn touches(&self, date: NaiveDate) -> bool {
        let start = self.starts_at.date_naive();
        // an end exactly at midnight does not spill into that day
        let last = (self.ends_at - chrono::Duration::nanoseconds(1)).date_naive();
        start <= date && date <= last.max(start)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.ends_at - self.starts_at).num_minutes()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub studio_id: RecordId,
    pub customer_id: RecordId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub total_cents: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Draft for BookingDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.ends_at <= self.starts_at {
            return Err(ValidationError::InvalidWindow);
        }
        if self.total_cents < 0 {
            return Err(ValidationError::OutOfRange {
                field: "total_cents",
                detail: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

impl Record for Booking {
    const TABLE: &'static str = "bookings";
    type Draft = BookingDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: RecordId, now: DateTime<Utc>, draft: BookingDraft) -> Self {
        Self {
            id,
            studio_id: draft.studio_id,
            customer_id: draft.customer_id,
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            status: draft.status,
            total_cents: draft.total_cents,
            notes: clean(draft.notes),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: BookingDraft, now: DateTime<Utc>) {
        self.studio_id = draft.studio_id;
        self.customer_id = draft.customer_id;
        self.starts_at = draft.starts_at;
        self.ends_at = draft.ends_at;
        self.status = draft.status;
        self.total_cents = draft.total_cents;
        self.notes = clean(draft.notes);
        self.updated_at = now;
    }
}
