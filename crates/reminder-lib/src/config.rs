//! Store configuration resolved from the process environment.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::sqlite::{validate_table_name, SqliteStore};

/// Environment variable naming the reminder table.
pub const TABLE_ENV: &str = "REMINDER_TABLE";

/// Environment variable pointing at the SQLite database file shared by every
/// function of the API.
pub const DB_PATH_ENV: &str = "REMINDER_DB_PATH";

/// Where reminders are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Table (collection) holding reminder records.
    pub table: String,
    /// Database file holding the table.
    pub db_path: PathBuf,
}

impl StoreConfig {
    /// Read configuration from `REMINDER_TABLE` and `REMINDER_DB_PATH`; both are required.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let require = |key: &str| {
            read(key).ok_or_else(|| Error::MissingConfig {
                key: key.to_string(),
            })
        };

        let table = require(TABLE_ENV)?;
        validate_table_name(&table)?;
        let db_path = PathBuf::from(require(DB_PATH_ENV)?);

        Ok(Self { table, db_path })
    }

    /// Open the SQLite store described by this configuration.
    pub fn open_store(&self) -> Result<SqliteStore> {
        SqliteStore::open(&self.db_path, &self.table)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::*;
    use crate::service::ReminderService;
    use crate::types::{GetReminderParams, Reminder};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn requires_table_name() {
        let err = StoreConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingConfig { ref key } if key == TABLE_ENV));
    }

    #[test]
    fn blank_table_counts_as_missing() {
        let err = StoreConfig::from_lookup(lookup(&[(TABLE_ENV, "  ")])).unwrap_err();
        assert!(matches!(err, Error::MissingConfig { .. }));
    }

    #[test]
    fn rejects_unsafe_table_name() {
        let err = StoreConfig::from_lookup(lookup(&[(TABLE_ENV, "x; DROP")])).unwrap_err();
        assert!(matches!(err, Error::InvalidTableName { .. }));
    }

    #[test]
    fn reads_database_path() {
        let config = StoreConfig::from_lookup(lookup(&[
            (TABLE_ENV, "reminders"),
            (DB_PATH_ENV, "/tmp/reminders.db"),
        ]))
        .unwrap();
        assert_eq!(config.table, "reminders");
        assert_eq!(config.db_path, PathBuf::from("/tmp/reminders.db"));
    }

    #[test]
    fn requires_database_path() {
        let err = StoreConfig::from_lookup(lookup(&[(TABLE_ENV, "reminders")])).unwrap_err();
        assert!(matches!(err, Error::MissingConfig { ref key } if key == DB_PATH_ENV));

        let err = StoreConfig::from_lookup(lookup(&[(TABLE_ENV, "reminders"), (DB_PATH_ENV, "")]))
            .unwrap_err();
        assert!(matches!(err, Error::MissingConfig { ref key } if key == DB_PATH_ENV));
    }

    #[tokio::test]
    async fn stores_opened_from_one_config_share_records() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("reminders.db");
        let config = StoreConfig::from_lookup(lookup(&[
            (TABLE_ENV, "reminders"),
            (DB_PATH_ENV, db_path.to_str().unwrap()),
        ]))
        .unwrap();

        // One store per function process, as the create and get Lambdas do.
        let writer = ReminderService::new(Arc::new(config.open_store().unwrap()));
        let reader = ReminderService::new(Arc::new(config.open_store().unwrap()));

        let created = writer
            .create(Reminder {
                name: "dentist".to_string(),
                description: "Tuesday at 9".to_string(),
            })
            .await
            .unwrap();
        let found = reader
            .get(&GetReminderParams { id: created.id })
            .await
            .unwrap();
        assert_eq!(found.name, "dentist");
    }
}
