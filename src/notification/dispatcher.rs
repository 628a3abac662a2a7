use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::channel::{ChannelKind, ChannelRegistry, DeliveryContext};
use crate::ledger::{DeliveryAttempt, DeliveryLedger};
use crate::metrics::DispatchMetrics;
use crate::users::UserRegistry;

use super::chain::ChainBuilder;
use super::types::{DispatchError, Notification, Priority};

/// Final outcome of one notification dispatch
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryResult {
    /// Notification ID
    pub notification_id: Uuid,
    /// Whether any channel accepted the message
    pub delivered: bool,
    /// Channel that accepted the message, if any
    pub channel_used: Option<ChannelKind>,
    /// Number of attempts made
    pub total_attempts: u32,
}

impl DeliveryResult {
    fn new(notification_id: Uuid, channel_used: Option<ChannelKind>, total_attempts: u32) -> Self {
        Self {
            notification_id,
            delivered: channel_used.is_some(),
            channel_used,
            total_attempts,
        }
    }
}

/// Statistics for the notification dispatcher
#[derive(Debug, Default)]
pub struct DispatcherStats {
    /// Total dispatches that passed validation
    pub total_sends: AtomicU64,
    /// Dispatches where some channel accepted the message
    pub delivered: AtomicU64,
    /// Dispatches where every channel in the chain failed
    pub exhausted: AtomicU64,
    /// Dispatches that had no channels to try
    pub no_channel_sends: AtomicU64,
    /// Total channel attempts across all dispatches
    pub total_attempts: AtomicU64,
}

impl DispatcherStats {
    /// Get a point-in-time snapshot of the statistics
    pub fn snapshot(&self) -> DispatcherStatsSnapshot {
        DispatcherStatsSnapshot {
            total_sends: self.total_sends.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            exhausted: self.exhausted.load(Ordering::Relaxed),
            no_channel_sends: self.no_channel_sends.load(Ordering::Relaxed),
            total_attempts: self.total_attempts.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of dispatcher statistics
#[derive(Debug, Clone, Serialize)]
pub struct DispatcherStatsSnapshot {
    pub total_sends: u64,
    pub delivered: u64,
    pub exhausted: u64,
    pub no_channel_sends: u64,
    pub total_attempts: u64,
}

/// Walks a user's fallback chain until a channel accepts the message.
///
/// Every attempt, successful or not, is appended to the delivery ledger
/// before the next channel is tried.
pub struct NotificationDispatcher {
    users: Arc<UserRegistry>,
    chain_builder: ChainBuilder,
    ledger: Arc<dyn DeliveryLedger>,
    stats: DispatcherStats,
}

impl NotificationDispatcher {
    pub fn new(
        users: Arc<UserRegistry>,
        channels: Arc<ChannelRegistry>,
        ledger: Arc<dyn DeliveryLedger>,
    ) -> Self {
        Self {
            users,
            chain_builder: ChainBuilder::new(channels),
            ledger,
            stats: DispatcherStats::default(),
        }
    }

    /// Get dispatcher statistics
    pub fn stats(&self) -> DispatcherStatsSnapshot {
        self.stats.snapshot()
    }

    /// Send a message to a user, falling back through their channel chain.
    ///
    /// Unknown users and empty messages are rejected before any channel is
    /// tried or any ledger entry is written.
    #[tracing::instrument(
        name = "dispatcher.send",
        skip(self, message),
        fields(user_name = %user_name, priority = ?priority)
    )]
    pub async fn send(
        &self,
        user_name: &str,
        message: &str,
        priority: Priority,
    ) -> Result<DeliveryResult, DispatchError> {
        if message.trim().is_empty() {
            return Err(DispatchError::EmptyMessage);
        }

        let user = match self.users.get(user_name) {
            Ok(user) => user,
            Err(_) => return Err(DispatchError::UserNotFound(user_name.to_string())),
        };

        let notification = Notification::new(&user.name, message, priority);
        let chain = self.chain_builder.build(&user);

        if chain.is_empty() {
            self.stats.total_sends.fetch_add(1, Ordering::Relaxed);
            self.stats.no_channel_sends.fetch_add(1, Ordering::Relaxed);

            // Update Prometheus metrics
            DispatchMetrics::record_send("no_channels");

            tracing::warn!(
                user_name = %user.name,
                notification_id = %notification.id,
                skipped = ?chain.skipped(),
                "No deliverable channels for user"
            );
            return Ok(DeliveryResult::new(notification.id, None, 0));
        }

        let ctx = DeliveryContext {
            user_name: user.name.clone(),
            notification_id: notification.id,
            priority,
        };

        let mut attempt_number: u32 = 0;
        let mut channel_used: Option<ChannelKind> = None;

        for channel in chain.iter() {
            attempt_number += 1;
            let kind = channel.kind();
            let success = channel.attempt(&notification.message, &ctx).await;

            self.stats.total_attempts.fetch_add(1, Ordering::Relaxed);
            DispatchMetrics::record_attempt(kind.as_str(), success);

            // The attempt happened either way; a ledger append failure must
            // not abort the chain walk.
            let attempt = DeliveryAttempt::new(&notification, kind, success, attempt_number);
            if let Err(e) = self.ledger.append(attempt).await {
                tracing::error!(
                    user_name = %user.name,
                    notification_id = %notification.id,
                    error = %e,
                    "Failed to record delivery attempt"
                );
            }

            if success {
                channel_used = Some(kind);
                break;
            }
        }

        self.stats.total_sends.fetch_add(1, Ordering::Relaxed);
        match channel_used {
            Some(kind) => {
                self.stats.delivered.fetch_add(1, Ordering::Relaxed);

                // Update Prometheus metrics
                DispatchMetrics::record_send("delivered");

                tracing::info!(
                    user_name = %user.name,
                    notification_id = %notification.id,
                    channel = %kind,
                    total_attempts = attempt_number,
                    "Notification delivered"
                );
            }
            None => {
                self.stats.exhausted.fetch_add(1, Ordering::Relaxed);

                // Update Prometheus metrics
                DispatchMetrics::record_send("exhausted");

                tracing::warn!(
                    user_name = %user.name,
                    notification_id = %notification.id,
                    total_attempts = attempt_number,
                    "All channels in the fallback chain failed"
                );
            }
        }
        DispatchMetrics::observe_attempts(attempt_number);

        Ok(DeliveryResult::new(
            notification.id,
            channel_used,
            attempt_number,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{ConsoleChannel, DeliveryChannel, EmailChannel, SmsChannel};
    use crate::ledger::create_ledger;
    use crate::users::{create_user_registry, User};
    use chrono::Utc;

    fn create_test_dispatcher(
        channels: Vec<Arc<dyn DeliveryChannel>>,
    ) -> (
        NotificationDispatcher,
        Arc<dyn DeliveryLedger>,
        Arc<UserRegistry>,
    ) {
        let mut registry = ChannelRegistry::new();
        for channel in channels {
            registry.register(channel);
        }
        let users = create_user_registry();
        let ledger = create_ledger();
        let dispatcher =
            NotificationDispatcher::new(users.clone(), Arc::new(registry), ledger.clone());
        (dispatcher, ledger, users)
    }

    fn register_user(users: &UserRegistry, name: &str, preferred: &str, available: &[&str]) {
        users
            .register(User {
                name: name.to_string(),
                preferred_channel: preferred.to_string(),
                available_channels: available.iter().map(|s| s.to_string()).collect(),
                registered_at: Utc::now(),
            })
            .unwrap();
    }

    #[test]
    fn test_delivery_result() {
        let id = Uuid::new_v4();

        let delivered = DeliveryResult::new(id, Some(ChannelKind::Sms), 2);
        assert!(delivered.delivered);
        assert_eq!(delivered.channel_used, Some(ChannelKind::Sms));
        assert_eq!(delivered.total_attempts, 2);

        let exhausted = DeliveryResult::new(id, None, 3);
        assert!(!exhausted.delivered);
        assert_eq!(exhausted.channel_used, None);
    }

    #[test]
    fn test_stats_snapshot() {
        let stats = DispatcherStats::default();
        stats.total_sends.fetch_add(5, Ordering::Relaxed);
        stats.delivered.fetch_add(3, Ordering::Relaxed);
        stats.total_attempts.fetch_add(9, Ordering::Relaxed);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_sends, 5);
        assert_eq!(snapshot.delivered, 3);
        assert_eq!(snapshot.total_attempts, 9);
        assert_eq!(snapshot.exhausted, 0);
    }

    #[tokio::test]
    async fn test_send_succeeds_on_preferred_channel() {
        let (dispatcher, ledger, users) =
            create_test_dispatcher(vec![Arc::new(EmailChannel::new(0.0))]);
        register_user(&users, "alice", "email", &["email"]);

        let result = dispatcher
            .send("alice", "hello", Priority::Medium)
            .await
            .unwrap();

        assert!(result.delivered);
        assert_eq!(result.channel_used, Some(ChannelKind::Email));
        assert_eq!(result.total_attempts, 1);

        let history = ledger.query("alice").await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].success);
    }

    #[tokio::test]
    async fn test_send_falls_back_after_failure() {
        let (dispatcher, ledger, users) = create_test_dispatcher(vec![
            Arc::new(EmailChannel::new(1.0)),
            Arc::new(ConsoleChannel::new(0.0)),
        ]);
        register_user(&users, "alice", "email", &["email", "console"]);

        let result = dispatcher
            .send("alice", "hello", Priority::Medium)
            .await
            .unwrap();

        assert!(result.delivered);
        assert_eq!(result.channel_used, Some(ChannelKind::Console));
        assert_eq!(result.total_attempts, 2);

        let history = ledger.query("alice").await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(!history[0].success);
        assert!(history[1].success);
    }

    #[tokio::test]
    async fn test_send_exhausts_chain() {
        let (dispatcher, ledger, users) = create_test_dispatcher(vec![
            Arc::new(EmailChannel::new(1.0)),
            Arc::new(SmsChannel::new(1.0)),
        ]);
        register_user(&users, "alice", "email", &["email", "sms"]);

        let result = dispatcher
            .send("alice", "hello", Priority::High)
            .await
            .unwrap();

        assert!(!result.delivered);
        assert_eq!(result.channel_used, None);
        assert_eq!(result.total_attempts, 2);

        let history = ledger.query("alice").await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|attempt| !attempt.success));
    }

    #[tokio::test]
    async fn test_send_to_unknown_user() {
        let (dispatcher, ledger, _users) =
            create_test_dispatcher(vec![Arc::new(EmailChannel::new(0.0))]);

        let result = dispatcher.send("nobody", "hello", Priority::Medium).await;

        assert!(matches!(result, Err(DispatchError::UserNotFound(_))));
        let history = ledger.query("nobody").await.unwrap();
        assert!(history.is_empty());
        assert_eq!(dispatcher.stats().total_sends, 0);
    }

    #[tokio::test]
    async fn test_send_empty_message_rejected() {
        let (dispatcher, _ledger, users) =
            create_test_dispatcher(vec![Arc::new(EmailChannel::new(0.0))]);
        register_user(&users, "alice", "email", &["email"]);

        let result = dispatcher.send("alice", "   ", Priority::Medium).await;

        assert!(matches!(result, Err(DispatchError::EmptyMessage)));
        assert_eq!(dispatcher.stats().total_sends, 0);
    }

    #[tokio::test]
    async fn test_send_with_no_resolvable_channels() {
        let (dispatcher, ledger, users) =
            create_test_dispatcher(vec![Arc::new(EmailChannel::new(0.0))]);
        register_user(&users, "alice", "carrier-pigeon", &["carrier-pigeon"]);

        let result = dispatcher
            .send("alice", "hello", Priority::Medium)
            .await
            .unwrap();

        assert!(!result.delivered);
        assert_eq!(result.channel_used, None);
        assert_eq!(result.total_attempts, 0);

        let history = ledger.query("alice").await.unwrap();
        assert!(history.is_empty());

        let stats = dispatcher.stats();
        assert_eq!(stats.total_sends, 1);
        assert_eq!(stats.no_channel_sends, 1);
    }

    #[tokio::test]
    async fn test_send_does_not_retry_same_channel() {
        let (dispatcher, ledger, users) =
            create_test_dispatcher(vec![Arc::new(EmailChannel::new(1.0))]);
        register_user(&users, "alice", "email", &["email", "email"]);

        let result = dispatcher
            .send("alice", "hello", Priority::Medium)
            .await
            .unwrap();

        assert_eq!(result.total_attempts, 1);
        assert_eq!(ledger.query("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stats_accumulate_across_sends() {
        let (dispatcher, _ledger, users) = create_test_dispatcher(vec![
            Arc::new(EmailChannel::new(1.0)),
            Arc::new(ConsoleChannel::new(0.0)),
        ]);
        register_user(&users, "alice", "email", &["email", "console"]);

        for _ in 0..3 {
            dispatcher
                .send("alice", "hello", Priority::Medium)
                .await
                .unwrap();
        }

        let stats = dispatcher.stats();
        assert_eq!(stats.total_sends, 3);
        assert_eq!(stats.delivered, 3);
        assert_eq!(stats.total_attempts, 6);
    }
}
