//! Access layer over the hosted database tables.
//!
//! Screens and routes talk to [`Collection`]s, which validate drafts and then
//! hand whole rows to a [`Table`] implementation: [`MemoryTable`] for local
//! runs and tests, [`RestTable`] for the hosted backend.

mod memory;
mod rest;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::config::BackendConfig;
use crate::model::{
    Booking, Customer, Document, Draft, MarketingPost, Partner, Record, RecordId, SalesLead,
    Settings, SettingsDraft, Studio, Transaction, ValidationError,
};

pub use memory::MemoryTable;
pub use rest::{RestClient, RestTable};

/// Storage abstraction for one backend table.
#[async_trait]
pub trait Table<T: Record>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>, BackendError>;
    async fn get(&self, id: RecordId) -> Result<Option<T>, BackendError>;
    async fn insert(&self, record: T) -> Result<T, BackendError>;
    /// Inserts every row in one call; either all rows are stored or none.
    async fn insert_many(&self, records: Vec<T>) -> Result<Vec<T>, BackendError>;
    async fn update(&self, record: T) -> Result<T, BackendError>;
    async fn delete(&self, id: RecordId) -> Result<(), BackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    Conflict,
    #[error("backend responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected backend payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a create/update issued from a form.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// CRUD wrapper validating drafts before they reach a [`Table`].
pub struct Collection<T: Record> {
    table: Arc<dyn Table<T>>,
}

impl<T: Record> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(table: impl Table<T> + 'static) -> Self {
        Self::shared(Arc::new(table))
    }

    pub fn shared(table: Arc<dyn Table<T>>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<dyn Table<T>> {
        &self.table
    }

    pub async fn list(&self) -> Result<Vec<T>, BackendError> {
        self.table.list().await
    }

    pub async fn get(&self, id: RecordId) -> Result<T, BackendError> {
        self.table.get(id).await?.ok_or(BackendError::NotFound)
    }

    pub async fn create(&self, draft: T::Draft) -> Result<T, CollectionError> {
        draft.validate()?;
        let record = T::from_draft(RecordId::generate(), Utc::now(), draft);
        debug!(table = T::TABLE, id = %record.id(), "inserting row");
        Ok(self.table.insert(record).await?)
    }

    /// Validates and stores a batch with a single bulk insert.
    pub async fn create_many(&self, drafts: Vec<T::Draft>) -> Result<Vec<T>, CollectionError> {
        let now = Utc::now();
        let mut records = Vec::with_capacity(drafts.len());
        for draft in drafts {
            draft.validate()?;
            records.push(T::from_draft(RecordId::generate(), now, draft));
        }
        debug!(table = T::TABLE, rows = records.len(), "bulk inserting rows");
        Ok(self.table.insert_many(records).await?)
    }

    pub async fn update(&self, id: RecordId, draft: T::Draft) -> Result<T, CollectionError> {
        draft.validate()?;
        let mut record = self.get(id).await?;
        record.apply(draft, Utc::now());
        Ok(self.table.update(record).await?)
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), BackendError> {
        debug!(table = T::TABLE, %id, "deleting row");
        self.table.delete(id).await
    }
}

/// Access to the single workspace settings row.
#[derive(Clone)]
pub struct SettingsStore {
    rows: Collection<Settings>,
}

impl SettingsStore {
    pub fn new(table: impl Table<Settings> + 'static) -> Self {
        Self {
            rows: Collection::new(table),
        }
    }

    /// Returns the stored settings, or defaults when the row was never saved.
    pub async fn load(&self) -> Result<Settings, BackendError> {
        match self.rows.table().get(Settings::ROW_ID).await? {
            Some(settings) => Ok(settings),
            None => Ok(Settings::defaults(Utc::now())),
        }
    }

    pub async fn save(&self, draft: SettingsDraft) -> Result<Settings, CollectionError> {
        draft.validate()?;
        let now = Utc::now();
        match self.rows.table().get(Settings::ROW_ID).await? {
            Some(mut settings) => {
                settings.apply(draft, now);
                Ok(self.rows.table().update(settings).await?)
            }
            None => {
                let settings = Settings::from_draft(Settings::ROW_ID, now, draft);
                Ok(self.rows.table().insert(settings).await?)
            }
        }
    }
}

/// One collection per workspace table.
#[derive(Clone)]
pub struct Backend {
    pub studios: Collection<Studio>,
    pub partners: Collection<Partner>,
    pub customers: Collection<Customer>,
    pub bookings: Collection<Booking>,
    pub transactions: Collection<Transaction>,
    pub leads: Collection<SalesLead>,
    pub marketing_posts: Collection<MarketingPost>,
    pub documents: Collection<Document>,
    pub settings: SettingsStore,
}

impl Backend {
    pub fn in_memory() -> Self {
        Self {
            studios: Collection::new(MemoryTable::<Studio>::default()),
            partners: Collection::new(MemoryTable::<Partner>::default()),
            customers: Collection::new(MemoryTable::<Customer>::default()),
            bookings: Collection::new(MemoryTable::<Booking>::default()),
            transactions: Collection::new(MemoryTable::<Transaction>::default()),
            leads: Collection::new(MemoryTable::<SalesLead>::default()),
            marketing_posts: Collection::new(MemoryTable::<MarketingPost>::default()),
            documents: Collection::new(MemoryTable::<Document>::default()),
            settings: SettingsStore::new(MemoryTable::<Settings>::default()),
        }
    }

    /// Builds REST tables against the hosted backend, or `None` when no URL
    /// is configured.
    pub fn rest(config: &BackendConfig) -> Result<Option<Self>, BackendError> {
        let Some(client) = RestClient::from_config(config)? else {
            return Ok(None);
        };

        Ok(Some(Self {
            studios: Collection::new(RestTable::<Studio>::new(client.clone())),
            partners: Collection::new(RestTable::<Partner>::new(client.clone())),
            customers: Collection::new(RestTable::<Customer>::new(client.clone())),
            bookings: Collection::new(RestTable::<Booking>::new(client.clone())),
            transactions: Collection::new(RestTable::<Transaction>::new(client.clone())),
            leads: Collection::new(RestTable::<SalesLead>::new(client.clone())),
            marketing_posts: Collection::new(RestTable::<MarketingPost>::new(client.clone())),
            documents: Collection::new(RestTable::<Document>::new(client.clone())),
            settings: SettingsStore::new(RestTable::<Settings>::new(client)),
        }))
    }

    /// Hosted backend when configured, in-process tables otherwise.
    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        Ok(Self::rest(config)?.unwrap_or_else(Self::in_memory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerDraft, SalesLeadDraft};

    fn customer(name: &str) -> CustomerDraft {
        CustomerDraft {
            full_name: name.to_string(),
            email: None,
            phone: None,
            company: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_validates_before_touching_the_table() {
        let backend = Backend::in_memory();
        let error = backend
            .customers
            .create(customer(""))
            .await
            .expect_err("blank name rejected");
        assert!(matches!(
            error,
            CollectionError::Validation(ValidationError::MissingField("full_name"))
        ));
        assert!(backend.customers.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_creation_time() {
        let backend = Backend::in_memory();
        let created = backend
            .customers
            .create(customer("Noor Jansen"))
            .await
            .expect("created");

        let updated = backend
            .customers
            .update(created.id, customer("Noor Jansen-Bakker"))
            .await
            .expect("updated");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.full_name, "Noor Jansen-Bakker");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let backend = Backend::in_memory();
        let missing = RecordId::generate();

        let error = backend
            .customers
            .update(missing, customer("Ghost"))
            .await
            .expect_err("missing row");
        assert!(matches!(
            error,
            CollectionError::Backend(BackendError::NotFound)
        ));

        let error = backend.customers.delete(missing).await.expect_err("missing");
        assert!(matches!(error, BackendError::NotFound));
    }

    #[tokio::test]
    async fn create_many_rejects_whole_batch_on_invalid_draft() {
        let backend = Backend::in_memory();
        let drafts = vec![
            SalesLeadDraft {
                company_name: "Valid BV".to_string(),
                ..SalesLeadDraft::default()
            },
            SalesLeadDraft::default(),
        ];

        let error = backend
            .leads
            .create_many(drafts)
            .await
            .expect_err("invalid batch");
        assert!(matches!(error, CollectionError::Validation(_)));
        assert!(backend.leads.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn settings_fall_back_to_defaults_until_saved() {
        let backend = Backend::in_memory();
        let settings = backend.settings.load().await.expect("defaults");
        assert_eq!(settings.vat_rate_pct, 21);

        let saved = backend
            .settings
            .save(SettingsDraft {
                workspace_name: "Rent-a-Studio".to_string(),
                currency: "eur".to_string(),
                vat_rate_pct: 9,
                timezone: "Europe/Amsterdam".to_string(),
                booking_buffer_minutes: 30,
            })
            .await
            .expect("saved");
        assert_eq!(saved.currency, "EUR");

        let reloaded = backend.settings.load().await.expect("reload");
        assert_eq!(reloaded.workspace_name, "Rent-a-Studio");
        assert_eq!(reloaded.vat_rate_pct, 9);
    }

    #[test]
    fn from_config_without_url_uses_memory_tables() {
        let backend = Backend::from_config(&BackendConfig::default());
        assert!(backend.is_ok());
        assert!(Backend::rest(&BackendConfig::default())
            .expect("no client needed")
            .is_none());
    }
}
