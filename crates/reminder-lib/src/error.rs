use thiserror::Error;

/// Convenient result alias for the reminder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// No reminder is stored under the requested identifier.
    #[error("reminder '{id}' not found")]
    ReminderNotFound { id: String },

    /// A required configuration value was not provided by the environment.
    #[error("missing required configuration value {key}")]
    MissingConfig { key: String },

    /// Table names are interpolated into SQL and must stay within a safe charset.
    #[error("invalid table name '{name}': only ASCII letters, digits, '_' and '-' are allowed")]
    InvalidTableName { name: String },

    /// A thread panicked while holding the store connection.
    #[error("reminder store connection is poisoned")]
    StorePoisoned,

    /// A blocking store task panicked or was cancelled.
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl Error {
    /// Whether this error means the caller asked for something that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ReminderNotFound { .. })
    }
}
