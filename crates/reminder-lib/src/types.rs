//! Reminder payload and entity types shared by the API handlers.

use serde::{Deserialize, Serialize};

/// Parameters identifying a single reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetReminderParams {
    pub id: String,
}

/// User-supplied reminder content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Short name of the reminder.
    pub name: String,
    /// Free-form description of the reminder.
    pub description: String,
}

/// Response body for a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReminderResponse {
    pub id: String,
}

/// A reminder as persisted, including its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderEntity {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl ReminderEntity {
    /// Attach an identifier to reminder content.
    pub fn new(id: impl Into<String>, reminder: Reminder) -> Self {
        Self {
            id: id.into(),
            name: reminder.name,
            description: reminder.description,
        }
    }

    /// Strip the identifier, leaving the user-facing content.
    pub fn into_reminder(self) -> Reminder {
        Reminder {
            name: self.name,
            description: self.description,
        }
    }
}

pub type GetReminderResponse = Reminder;
pub type CreateReminderParams = Reminder;
pub type DeleteReminderParams = GetReminderParams;
