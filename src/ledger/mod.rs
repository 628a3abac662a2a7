//! Delivery ledger.
//!
//! The ledger is the append-only record of every delivery attempt the
//! dispatcher makes, successful or not. It answers one question: what
//! happened for a given user, in order.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::channel::ChannelKind;
use crate::notification::{Notification, Priority};

mod memory_backend;

pub use memory_backend::MemoryLedger;

/// Ledger operation errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger backend error: {0}")]
    Backend(String),
}

/// One recorded delivery attempt. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAttempt {
    /// Notification this attempt belongs to
    pub notification_id: Uuid,
    /// Recipient user name
    pub user_name: String,
    /// Channel that was tried
    pub channel: ChannelKind,
    /// Message text that was sent
    pub message: String,
    /// Priority of the notification
    pub priority: Priority,
    /// Whether the attempt succeeded
    pub success: bool,
    /// Position of this attempt within its dispatch, starting at 1
    pub attempt_number: u32,
    /// When the attempt was made
    pub timestamp: DateTime<Utc>,
}

impl DeliveryAttempt {
    /// Record an attempt for a notification.
    pub fn new(
        notification: &Notification,
        channel: ChannelKind,
        success: bool,
        attempt_number: u32,
    ) -> Self {
        Self {
            notification_id: notification.id,
            user_name: notification.user_name.clone(),
            channel,
            message: notification.message.clone(),
            priority: notification.priority,
            success,
            attempt_number,
            timestamp: Utc::now(),
        }
    }
}

/// Ledger statistics
#[derive(Debug, Clone, Serialize)]
pub struct LedgerStats {
    /// Backend type name
    pub backend_type: String,
    /// Total recorded attempts
    pub total_attempts: usize,
    /// Recorded attempts that succeeded
    pub successful_attempts: usize,
    /// Recorded attempts that failed
    pub failed_attempts: usize,
    /// Users with at least one recorded attempt
    pub users_with_history: usize,
}

/// Append-only store of delivery attempts.
#[async_trait]
pub trait DeliveryLedger: Send + Sync {
    /// Append an attempt record.
    async fn append(&self, attempt: DeliveryAttempt) -> Result<(), LedgerError>;

    /// All recorded attempts for a user, oldest first. Users with no history
    /// yield an empty list.
    async fn query(&self, user_name: &str) -> Result<Vec<DeliveryAttempt>, LedgerError>;

    /// Current ledger statistics.
    async fn stats(&self) -> LedgerStats;
}

/// Create the delivery ledger.
pub fn create_ledger() -> Arc<dyn DeliveryLedger> {
    tracing::info!(backend = "memory", "Creating memory delivery ledger");
    Arc::new(MemoryLedger::new())
}
