use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{BackendError, Table};
use crate::model::{Record, RecordId};

/// In-process table used when no hosted backend is configured.
pub struct MemoryTable<T> {
    rows: Arc<Mutex<BTreeMap<RecordId, T>>>,
}

impl<T> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }
}

impl<T> Clone for MemoryTable<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T: Record> MemoryTable<T> {
    pub fn with_rows(rows: impl IntoIterator<Item = T>) -> Self {
        let table = Self::default();
        if let Ok(mut guard) = table.rows.lock() {
            guard.extend(rows.into_iter().map(|row| (row.id(), row)));
        }
        table
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<RecordId, T>>, BackendError> {
        self.rows
            .lock()
            .map_err(|_| BackendError::Unavailable(format!("{} table lock poisoned", T::TABLE)))
    }
}

#[async_trait]
impl<T: Record> Table<T> for MemoryTable<T> {
    async fn list(&self) -> Result<Vec<T>, BackendError> {
        let guard = self.lock()?;
        let mut rows: Vec<T> = guard.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(rows)
    }

    async fn get(&self, id: RecordId) -> Result<Option<T>, BackendError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn insert(&self, record: T) -> Result<T, BackendError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id()) {
            return Err(BackendError::Conflict);
        }
        guard.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn insert_many(&self, records: Vec<T>) -> Result<Vec<T>, BackendError> {
        let mut guard = self.lock()?;
        if records.iter().any(|record| guard.contains_key(&record.id())) {
            return Err(BackendError::Conflict);
        }
        for record in &records {
            guard.insert(record.id(), record.clone());
        }
        Ok(records)
    }

    async fn update(&self, record: T) -> Result<T, BackendError> {
        let mut guard = self.lock()?;
        match guard.get_mut(&record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record)
            }
            None => Err(BackendError::NotFound),
        }
    }

    async fn delete(&self, id: RecordId) -> Result<(), BackendError> {
        match self.lock()?.remove(&id) {
            Some(_) => Ok(()),
            None => Err(BackendError::NotFound),
        }
    }
}
