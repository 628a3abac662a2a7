//! In-memory ledger backend.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::metrics::LEDGER_APPENDS_TOTAL;

use super::{DeliveryAttempt, DeliveryLedger, LedgerError, LedgerStats};

/// In-memory delivery ledger, keyed by user name.
///
/// Appends for one user go through that user's map entry lock, so the
/// per-user history stays in append order even under concurrent dispatches.
pub struct MemoryLedger {
    entries: DashMap<String, Vec<DeliveryAttempt>>,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

#[async_trait]
impl DeliveryLedger for MemoryLedger {
    async fn append(&self, attempt: DeliveryAttempt) -> Result<(), LedgerError> {
        tracing::debug!(
            user_name = %attempt.user_name,
            notification_id = %attempt.notification_id,
            channel = %attempt.channel,
            attempt_number = attempt.attempt_number,
            success = attempt.success,
            "Appending delivery attempt"
        );

        let mut history = self.entries.entry(attempt.user_name.clone()).or_default();
        history.push(attempt);

        LEDGER_APPENDS_TOTAL.inc();
        Ok(())
    }

    async fn query(&self, user_name: &str) -> Result<Vec<DeliveryAttempt>, LedgerError> {
        Ok(self
            .entries
            .get(user_name)
            .map(|history| history.clone())
            .unwrap_or_default())
    }

    async fn stats(&self) -> LedgerStats {
        let mut total_attempts = 0;
        let mut successful_attempts = 0;

        for entry in self.entries.iter() {
            total_attempts += entry.value().len();
            successful_attempts += entry.value().iter().filter(|a| a.success).count();
        }

        LedgerStats {
            backend_type: "memory".to_string(),
            total_attempts,
            successful_attempts,
            failed_attempts: total_attempts - successful_attempts,
            users_with_history: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelKind;
    use crate::notification::{Notification, Priority};

    fn test_notification(user_name: &str) -> Notification {
        Notification::new(user_name, "test message", Priority::Medium)
    }

    #[tokio::test]
    async fn test_append_and_query() {
        let ledger = MemoryLedger::new();
        let notification = test_notification("alice");

        ledger
            .append(DeliveryAttempt::new(
                &notification,
                ChannelKind::Email,
                false,
                1,
            ))
            .await
            .unwrap();
        ledger
            .append(DeliveryAttempt::new(
                &notification,
                ChannelKind::Console,
                true,
                2,
            ))
            .await
            .unwrap();

        let history = ledger.query("alice").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].attempt_number, 1);
        assert_eq!(history[0].channel, ChannelKind::Email);
        assert!(!history[0].success);
        assert_eq!(history[1].attempt_number, 2);
        assert!(history[1].success);
    }

    #[tokio::test]
    async fn test_query_unknown_user_is_empty() {
        let ledger = MemoryLedger::new();
        let history = ledger.query("nobody").await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_histories_are_isolated_per_user() {
        let ledger = MemoryLedger::new();

        let for_alice = test_notification("alice");
        let for_bob = test_notification("bob");
        ledger
            .append(DeliveryAttempt::new(&for_alice, ChannelKind::Email, true, 1))
            .await
            .unwrap();
        ledger
            .append(DeliveryAttempt::new(&for_bob, ChannelKind::Sms, false, 1))
            .await
            .unwrap();

        let alice_history = ledger.query("alice").await.unwrap();
        assert_eq!(alice_history.len(), 1);
        assert_eq!(alice_history[0].channel, ChannelKind::Email);

        let bob_history = ledger.query("bob").await.unwrap();
        assert_eq!(bob_history.len(), 1);
        assert_eq!(bob_history[0].channel, ChannelKind::Sms);
    }

    #[tokio::test]
    async fn test_stats() {
        let ledger = MemoryLedger::new();

        let notification = test_notification("alice");
        ledger
            .append(DeliveryAttempt::new(
                &notification,
                ChannelKind::Email,
                false,
                1,
            ))
            .await
            .unwrap();
        ledger
            .append(DeliveryAttempt::new(&notification, ChannelKind::Sms, true, 2))
            .await
            .unwrap();

        let stats = ledger.stats().await;
        assert_eq!(stats.backend_type, "memory");
        assert_eq!(stats.total_attempts, 2);
        assert_eq!(stats.successful_attempts, 1);
        assert_eq!(stats.failed_attempts, 1);
        assert_eq!(stats.users_with_history, 1);
    }

    #[tokio::test]
    async fn test_attempt_records_notification_fields() {
        let ledger = MemoryLedger::new();
        let notification = Notification::new("alice", "urgent news", Priority::High);

        ledger
            .append(DeliveryAttempt::new(
                &notification,
                ChannelKind::Email,
                true,
                1,
            ))
            .await
            .unwrap();

        let history = ledger.query("alice").await.unwrap();
        assert_eq!(history[0].notification_id, notification.id);
        assert_eq!(history[0].message, "urgent news");
        assert_eq!(history[0].priority, Priority::High);
    }
}
