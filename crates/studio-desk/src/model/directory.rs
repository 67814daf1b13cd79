use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{clean, require, Draft, Record, RecordId, ValidationError};

/// A bookable studio space listed on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Studio {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub partner_id: Option<RecordId>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub hourly_rate_cents: i64,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default = "default_true")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioDraft {
    pub name: String,
    #[serde(default)]
    pub partner_id: Option<RecordId>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub hourly_rate_cents: i64,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Draft for StudioDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        if self.hourly_rate_cents < 0 {
            return Err(ValidationError::OutOfRange {
                field: "hourly_rate_cents",
                detail: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

impl Record for Studio {
    const TABLE: &'static str = "studios";
    type Draft = StudioDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: RecordId, now: DateTime<Utc>, draft: StudioDraft) -> Self {
        let mut studio = Self {
            id,
            name: String::new(),
            partner_id: None,
            city: None,
            address: None,
            hourly_rate_cents: 0,
            capacity: None,
            active: true,
            created_at: now,
            updated_at: now,
        };
        studio.apply(draft, now);
        studio
    }

    fn apply(&mut self, draft: StudioDraft, now: DateTime<Utc>) {
        self.name = draft.name.trim().to_string();
        self.partner_id = draft.partner_id;
        self.city = clean(draft.city);
        self.address = clean(draft.address);
        self.hourly_rate_cents = draft.hourly_rate_cents;
        self.capacity = draft.capacity;
        self.active = draft.active;
        self.updated_at = now;
    }
}

/// Onboarding state of a studio-owning business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerStatus {
    #[default]
    Onboarding,
    Active,
    Paused,
    Churned,
}

impl PartnerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PartnerStatus::Onboarding => "Onboarding",
            PartnerStatus::Active => "Active",
            PartnerStatus::Paused => "Paused",
            PartnerStatus::Churned => "Churned",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: RecordId,
    pub company_name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub status: PartnerStatus,
    /// Marketplace commission on bookings, in whole percent.
    #[serde(default)]
    pub commission_rate_pct: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerDraft {
    pub company_name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub status: PartnerStatus,
    #[serde(default)]
    pub commission_rate_pct: u8,
}

impl Draft for PartnerDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("company_name", &self.company_name)?;
        if self.commission_rate_pct > 100 {
            return Err(ValidationError::OutOfRange {
                field: "commission_rate_pct",
                detail: format!("{} exceeds 100", self.commission_rate_pct),
            });
        }
        Ok(())
    }
}

impl Record for Partner {
    const TABLE: &'static str = "partners";
    type Draft = PartnerDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: RecordId, now: DateTime<Utc>, draft: PartnerDraft) -> Self {
        let mut partner = Self {
            id,
            company_name: String::new(),
            contact_name: None,
            email: None,
            phone: None,
            city: None,
            status: PartnerStatus::default(),
            commission_rate_pct: 0,
            created_at: now,
            updated_at: now,
        };
        partner.apply(draft, now);
        partner
    }

    fn apply(&mut self, draft: PartnerDraft, now: DateTime<Utc>) {
        self.company_name = draft.company_name.trim().to_string();
        self.contact_name = clean(draft.contact_name);
        self.email = clean(draft.email);
        self.phone = clean(draft.phone);
        self.city = clean(draft.city);
        self.status = draft.status;
        self.commission_rate_pct = draft.commission_rate_pct;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: RecordId,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Draft for CustomerDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("full_name", &self.full_name)
    }
}

impl Record for Customer {
    const TABLE: &'static str = "customers";
    type Draft = CustomerDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: RecordId, now: DateTime<Utc>, draft: CustomerDraft) -> Self {
        let mut customer = Self {
            id,
            full_name: String::new(),
            email: None,
            phone: None,
            company: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        customer.apply(draft, now);
        customer
    }

    fn apply(&mut self, draft: CustomerDraft, now: DateTime<Utc>) {
        self.full_name = draft.full_name.trim().to_string();
        self.email = clean(draft.email);
        self.phone = clean(draft.phone);
        self.company = clean(draft.company);
        self.notes = clean(draft.notes);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner_draft() -> PartnerDraft {
        PartnerDraft {
            company_name: "  Soundwave Studios ".to_string(),
            contact_name: Some("Eva de Vries".to_string()),
            email: Some(" ".to_string()),
            phone: None,
            city: Some("Utrecht".to_string()),
            status: PartnerStatus::Active,
            commission_rate_pct: 15,
        }
    }

    #[test]
    fn partner_draft_requires_company_name_and_sane_commission() {
        assert!(partner_draft().validate().is_ok());

        let mut draft = partner_draft();
        draft.company_name = String::new();
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField("company_name"))
        );

        let mut draft = partner_draft();
        draft.commission_rate_pct = 120;
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::OutOfRange { field: "commission_rate_pct", .. })
        ));
    }

    #[test]
    fn apply_trims_text_and_keeps_identity() {
        let now = Utc::now();
        let id = RecordId::generate();
        let partner = Partner::from_draft(id, now, partner_draft());
        assert_eq!(partner.id, id);
        assert_eq!(partner.company_name, "Soundwave Studios");
        assert_eq!(partner.email, None);
        assert_eq!(partner.created_at, partner.updated_at);
    }

    #[test]
    fn studio_defaults_to_active_when_flag_missing() {
        let draft: StudioDraft =
            serde_json::from_str(r#"{ "name": "Room 1" }"#).expect("draft parses");
        assert!(draft.active);
        assert_eq!(draft.hourly_rate_cents, 0);
    }

    #[test]
    fn customer_draft_requires_name() {
        let draft = CustomerDraft {
            full_name: " ".to_string(),
            email: None,
            phone: None,
            company: None,
            notes: None,
        };
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField("full_name"))
        );
    }
}
