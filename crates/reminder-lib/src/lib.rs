//! Reminder library entry points.
//!
//! This crate holds the reminder domain: payload types, the persistence
//! capability ([`ReminderStore`]) with in-memory and SQLite implementations,
//! store configuration, and the [`ReminderService`] business rules. Lambda
//! handlers should only depend on what is exported here.

#![deny(warnings)]

pub mod config;
pub mod error;
pub mod service;
pub mod sqlite;
pub mod store;
pub mod types;

pub use config::{StoreConfig, DB_PATH_ENV, TABLE_ENV};
pub use error::{Error, Result};
pub use service::ReminderService;
pub use sqlite::SqliteStore;
pub use store::{InMemoryStore, ReminderStore};
pub use types::{
    CreateReminderParams, CreateReminderResponse, DeleteReminderParams, GetReminderParams,
    GetReminderResponse, Reminder, ReminderEntity,
};
