//! Persistence capability consumed by the reminder service.
//!
//! Handlers never talk to a storage engine directly. They receive an
//! `Arc<dyn ReminderStore>` at construction time, which keeps them testable
//! with [`InMemoryStore`] and lets the Lambda binaries plug in
//! [`SqliteStore`](crate::sqlite::SqliteStore).

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::ReminderEntity;

/// Key-value access to reminder records.
///
/// One store instance is created per process and shared by concurrent
/// invocations, so implementations must be `Send + Sync`.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Fetch a reminder by identifier; `None` when absent.
    async fn get(&self, id: &str) -> Result<Option<ReminderEntity>>;

    /// Insert or replace a reminder.
    async fn put(&self, entity: &ReminderEntity) -> Result<()>;
}

/// Process-local store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<String, ReminderEntity>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given records.
    pub fn with_entities(entities: impl IntoIterator<Item = ReminderEntity>) -> Self {
        let records = entities
            .into_iter()
            .map(|entity| (entity.id.clone(), entity))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    /// Number of stored reminders.
    pub fn len(&self) -> Result<usize> {
        let records = self.records.read().map_err(|_| Error::StorePoisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl ReminderStore for InMemoryStore {
    async fn get(&self, id: &str) -> Result<Option<ReminderEntity>> {
        let records = self.records.read().map_err(|_| Error::StorePoisoned)?;
        Ok(records.get(id).cloned())
    }

    async fn put(&self, entity: &ReminderEntity) -> Result<()> {
        let mut records = self.records.write().map_err(|_| Error::StorePoisoned)?;
        records.insert(entity.id.clone(), entity.clone());
        Ok(())
    }
}
