//! Simulated delivery transports.
//!
//! Real gateway integrations live outside this service. Each transport here
//! simulates one with a configured failure probability so the fallback
//! behavior can be exercised end to end, with the console transport doubling
//! as a sink that writes the message into the service log.

use async_trait::async_trait;
use rand::Rng;

use super::{ChannelKind, DeliveryChannel, DeliveryContext};

/// Sample one simulated gateway outcome. `failure_rate` is the probability
/// of a failed attempt, clamped to [0, 1] since `random_bool` panics outside
/// that range.
fn gateway_outcome(failure_rate: f64) -> bool {
    !rand::rng().random_bool(failure_rate.clamp(0.0, 1.0))
}

/// Simulated email gateway.
pub struct EmailChannel {
    failure_rate: f64,
}

impl EmailChannel {
    pub fn new(failure_rate: f64) -> Self {
        Self { failure_rate }
    }
}

#[async_trait]
impl DeliveryChannel for EmailChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Email
    }

    async fn attempt(&self, message: &str, ctx: &DeliveryContext) -> bool {
        let success = gateway_outcome(self.failure_rate);
        tracing::info!(
            channel = "email",
            user_name = %ctx.user_name,
            notification_id = %ctx.notification_id,
            message_len = message.len(),
            success = success,
            "Email gateway attempt"
        );
        success
    }
}

/// Simulated SMS gateway.
pub struct SmsChannel {
    failure_rate: f64,
}

impl SmsChannel {
    pub fn new(failure_rate: f64) -> Self {
        Self { failure_rate }
    }
}

#[async_trait]
impl DeliveryChannel for SmsChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Sms
    }

    async fn attempt(&self, message: &str, ctx: &DeliveryContext) -> bool {
        let success = gateway_outcome(self.failure_rate);
        tracing::info!(
            channel = "sms",
            user_name = %ctx.user_name,
            notification_id = %ctx.notification_id,
            message_len = message.len(),
            success = success,
            "SMS gateway attempt"
        );
        success
    }
}

/// Simulated WhatsApp gateway.
pub struct WhatsAppChannel {
    failure_rate: f64,
}

impl WhatsAppChannel {
    pub fn new(failure_rate: f64) -> Self {
        Self { failure_rate }
    }
}

#[async_trait]
impl DeliveryChannel for WhatsAppChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::WhatsApp
    }

    async fn attempt(&self, message: &str, ctx: &DeliveryContext) -> bool {
        let success = gateway_outcome(self.failure_rate);
        tracing::info!(
            channel = "whatsapp",
            user_name = %ctx.user_name,
            notification_id = %ctx.notification_id,
            message_len = message.len(),
            success = success,
            "WhatsApp gateway attempt"
        );
        success
    }
}

/// Console transport. Writes the delivered message into the service log and
/// is usually configured with a zero failure rate, which makes it the
/// last-resort channel in most chains.
pub struct ConsoleChannel {
    failure_rate: f64,
}

impl ConsoleChannel {
    pub fn new(failure_rate: f64) -> Self {
        Self { failure_rate }
    }
}

#[async_trait]
impl DeliveryChannel for ConsoleChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Console
    }

    async fn attempt(&self, message: &str, ctx: &DeliveryContext) -> bool {
        let success = gateway_outcome(self.failure_rate);
        if success {
            tracing::info!(
                channel = "console",
                user_name = %ctx.user_name,
                notification_id = %ctx.notification_id,
                priority = ?ctx.priority,
                message = %message,
                "Console delivery"
            );
        } else {
            tracing::warn!(
                channel = "console",
                user_name = %ctx.user_name,
                notification_id = %ctx.notification_id,
                "Console delivery failed"
            );
        }
        success
    }
}
