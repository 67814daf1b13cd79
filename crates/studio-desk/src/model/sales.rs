use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{clean, require, Draft, Record, RecordId, ValidationError};

/// Pipeline stage of a prospective partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    Cold,
    Warm,
    Hot,
    Negotiation,
    Closed,
}

impl LeadStatus {
    pub const PIPELINE: [LeadStatus; 5] = [
        LeadStatus::Cold,
        LeadStatus::Warm,
        LeadStatus::Hot,
        LeadStatus::Negotiation,
        LeadStatus::Closed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::Cold => "Cold",
            LeadStatus::Warm => "Warm",
            LeadStatus::Hot => "Hot",
            LeadStatus::Negotiation => "Negotiation",
            LeadStatus::Closed => "Closed",
        }
    }

    /// Parses free text from forms and spreadsheets, English or Dutch.
    pub fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cold" | "koud" | "new" | "nieuw" => Some(LeadStatus::Cold),
            "warm" => Some(LeadStatus::Warm),
            "hot" | "heet" => Some(LeadStatus::Hot),
            "negotiation" | "negotiating" | "onderhandeling" => Some(LeadStatus::Negotiation),
            "closed" | "won" | "gesloten" | "gewonnen" => Some(LeadStatus::Closed),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, LeadStatus::Closed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesLead {
    pub id: RecordId,
    pub company_name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub estimated_value_cents: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesLeadDraft {
    pub company_name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub estimated_value_cents: Option<i64>,
}

impl Draft for SalesLeadDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("company_name", &self.company_name)?;
        if matches!(self.estimated_value_cents, Some(value) if value < 0) {
            return Err(ValidationError::OutOfRange {
                field: "estimated_value_cents",
                detail: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

impl Record for SalesLead {
    const TABLE: &'static str = "sales_leads";
    type Draft = SalesLeadDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: RecordId, now: DateTime<Utc>, draft: SalesLeadDraft) -> Self {
        let mut lead = Self {
            id,
            company_name: String::new(),
            contact_name: None,
            email: None,
            phone: None,
            website: None,
            city: None,
            country: None,
            industry: None,
            job_title: None,
            linkedin_url: None,
            status: LeadStatus::default(),
            source: None,
            notes: None,
            estimated_value_cents: None,
            created_at: now,
            updated_at: now,
        };
        lead.apply(draft, now);
        lead
    }

    fn apply(&mut self, draft: SalesLeadDraft, now: DateTime<Utc>) {
        self.company_name = draft.company_name.trim().to_string();
        self.contact_name = clean(draft.contact_name);
        self.email = clean(draft.email);
        self.phone = clean(draft.phone);
        self.website = clean(draft.website);
        self.city = clean(draft.city);
        self.country = clean(draft.country);
        self.industry = clean(draft.industry);
        self.job_title = clean(draft.job_title);
        self.linkedin_url = clean(draft.linkedin_url);
        self.status = draft.status;
        self.source = clean(draft.source);
        self.notes = clean(draft.notes);
        self.estimated_value_cents = draft.estimated_value_cents;
        self.updated_at = now;
    }
}
