//! Notification types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Dispatch errors.
///
/// Channel failures are not errors; they surface as unsuccessful attempts in
/// the delivery result and the ledger.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Message must not be empty")]
    EmptyMessage,
}

/// Priority levels for notifications.
///
/// Priority is recorded with every attempt but does not change routing or
/// ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A notification to be delivered to a single user
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Unique notification ID
    pub id: Uuid,
    /// Recipient user name
    pub user_name: String,
    /// Message text
    pub message: String,
    /// Priority level
    pub priority: Priority,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_name: impl Into<String>,
        message: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: user_name.into(),
            message: message.into(),
            priority,
            created_at: Utc::now(),
        }
    }
}
