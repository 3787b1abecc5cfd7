//! SQLite-backed implementation of [`ReminderStore`].

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::{Error, Result};
use crate::store::ReminderStore;
use crate::types::ReminderEntity;

/// Reminder store holding a single SQLite connection.
///
/// `rusqlite::Connection` is not `Sync`, so access is serialized through a
/// mutex. Statements block, so they run on tokio's blocking pool.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    table: String,
}

impl SqliteStore {
    /// Open (or create) a database file and ensure the reminder table exists.
    pub fn open(path: &Path, table: &str) -> Result<Self> {
        debug!(path = %path.display(), table, "opening reminder database");
        Self::from_connection(Connection::open(path)?, table)
    }

    /// Open a transient in-memory database.
    pub fn open_in_memory(table: &str) -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, table)
    }

    fn from_connection(conn: Connection, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS \"{table}\" (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL
            )"
        ))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            table: table.to_string(),
        })
    }

    /// Name of the table this store reads and writes.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Run `op` against the locked connection on the blocking pool.
    async fn with_connection<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Connection, &str) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let table = self.table.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| Error::StorePoisoned)?;
            op(&conn, &table)
        })
        .await?
    }
}

/// Reject table names that would need escaping inside a quoted identifier.
pub fn validate_table_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidTableName {
            name: name.to_string(),
        })
    }
}

#[async_trait]
impl ReminderStore for SqliteStore {
    async fn get(&self, id: &str) -> Result<Option<ReminderEntity>> {
        let id = id.to_string();
        self.with_connection(move |conn, table| {
            let sql = format!("SELECT id, name, description FROM \"{table}\" WHERE id = ?1");
            let entity = conn
                .query_row(&sql, params![id], |row| {
                    Ok(ReminderEntity {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                    })
                })
                .optional()?;
            Ok(entity)
        })
        .await
    }

    async fn put(&self, entity: &ReminderEntity) -> Result<()> {
        let entity = entity.clone();
        self.with_connection(move |conn, table| {
            let sql = format!(
                "INSERT OR REPLACE INTO \"{table}\" (id, name, description) VALUES (?1, ?2, ?3)"
            );
            conn.execute(&sql, params![entity.id, entity.name, entity.description])?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_table_names() {
        assert!(validate_table_name("ReminderTable-prod_1").is_ok());
    }

    #[test]
    fn rejects_quotes_and_spaces() {
        assert!(validate_table_name("bad\"name").is_err());
        assert!(validate_table_name("two words").is_err());
        assert!(validate_table_name("").is_err());
    }

    #[tokio::test]
    async fn in_memory_round_trip() {
        let store = SqliteStore::open_in_memory("reminders").unwrap();
        let entity = ReminderEntity {
            id: "r-1".to_string(),
            name: "gym".to_string(),
            description: "leg day".to_string(),
        };

        store.put(&entity).await.unwrap();
        assert_eq!(store.get("r-1").await.unwrap(), Some(entity));
        assert_eq!(store.get("r-2").await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_writes_all_land() {
        let store = Arc::new(SqliteStore::open_in_memory("reminders").unwrap());

        let writes: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .put(&ReminderEntity {
                            id: format!("r-{i}"),
                            name: format!("reminder {i}"),
                            description: "batch".to_string(),
                        })
                        .await
                })
            })
            .collect();
        for write in writes {
            write.await.unwrap().unwrap();
        }

        for i in 0..16 {
            let found = store.get(&format!("r-{i}")).await.unwrap().unwrap();
            assert_eq!(found.name, format!("reminder {i}"));
        }
    }
}
