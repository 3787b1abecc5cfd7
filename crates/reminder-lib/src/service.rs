//! Reminder business rules on top of a [`ReminderStore`].

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::store::ReminderStore;
use crate::types::{
    CreateReminderParams, CreateReminderResponse, GetReminderParams, GetReminderResponse,
    ReminderEntity,
};

/// Reads and writes reminders through an injected store.
#[derive(Clone)]
pub struct ReminderService {
    store: Arc<dyn ReminderStore>,
}

impl ReminderService {
    pub fn new(store: Arc<dyn ReminderStore>) -> Self {
        Self { store }
    }

    /// Look up a reminder, failing with [`Error::ReminderNotFound`] when absent.
    pub async fn get(&self, params: &GetReminderParams) -> Result<GetReminderResponse> {
        debug!(id = %params.id, "fetching reminder");
        let entity = self
            .store
            .get(&params.id)
            .await?
            .ok_or_else(|| Error::ReminderNotFound {
                id: params.id.clone(),
            })?;
        Ok(entity.into_reminder())
    }

    /// Store a new reminder under a freshly generated identifier.
    pub async fn create(&self, params: CreateReminderParams) -> Result<CreateReminderResponse> {
        let id = Uuid::now_v7().to_string();
        let entity = ReminderEntity::new(id.clone(), params);
        self.store.put(&entity).await?;
        info!(id = %id, "reminder created");
        Ok(CreateReminderResponse { id })
    }
}

impl std::fmt::Debug for ReminderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderService").finish_non_exhaustive()
    }
}
