use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{clean, Draft, Record, RecordId, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    BookingPayment,
    Payout,
    Commission,
    Refund,
    Expense,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::BookingPayment => "Booking payment",
            TransactionKind::Payout => "Partner payout",
            TransactionKind::Commission => "Commission",
            TransactionKind::Refund => "Refund",
            TransactionKind::Expense => "Expense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

/// Money movement recorded against the marketplace ledger.
///
/// Amounts are stored as positive cents; the kind decides the direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: RecordId,
    pub kind: TransactionKind,
    pub amount_cents: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub booking_id: Option<RecordId>,
    #[serde(default)]
    pub partner_id: Option<RecordId>,
    pub occurred_on: NaiveDate,
    #[serde(default)]
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount_cents: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub booking_id: Option<RecordId>,
    #[serde(default)]
    pub partner_id: Option<RecordId>,
    pub occurred_on: NaiveDate,
    #[serde(default)]
    pub status: TransactionStatus,
}

impl Draft for TransactionDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.amount_cents <= 0 {
            return Err(ValidationError::OutOfRange {
                field: "amount_cents",
                detail: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Record for Transaction {
    const TABLE: &'static str = "transactions";
    type Draft = TransactionDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: RecordId, now: DateTime<Utc>, draft: TransactionDraft) -> Self {
        Self {
            id,
            kind: draft.kind,
            amount_cents: draft.amount_cents,
            description: clean(draft.description),
            booking_id: draft.booking_id,
            partner_id: draft.partner_id,
            occurred_on: draft.occurred_on,
            status: draft.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: TransactionDraft, now: DateTime<Utc>) {
        self.kind = draft.kind;
        self.amount_cents = draft.amount_cents;
        self.description = clean(draft.description);
        self.booking_id = draft.booking_id;
        self.partner_id = draft.partner_id;
        self.occurred_on = draft.occurred_on;
        self.status = draft.status;
        self.updated_at = now;
    }
}
