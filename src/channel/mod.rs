//! Delivery channel abstraction.
//!
//! A channel is a capability that attempts delivery of a message and reports
//! success or failure. Concrete transports are registered in a
//! `ChannelRegistry` keyed by `ChannelKind`; lookups by identifier fail
//! closed, so an unknown name can never deliver anything.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::notification::Priority;

mod registry;
mod transports;

pub use registry::{create_channel_registry, ChannelRegistry};
pub use transports::{ConsoleChannel, EmailChannel, SmsChannel, WhatsAppChannel};

/// The closed set of supported channel kinds.
///
/// Adding a transport means adding a variant here and wiring it into the
/// registry factory; there is no dynamic kind registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Email,
    Sms,
    WhatsApp,
    Console,
}

impl ChannelKind {
    /// Canonical lowercase identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Email => "email",
            ChannelKind::Sms => "sms",
            ChannelKind::WhatsApp => "whatsapp",
            ChannelKind::Console => "console",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for channel identifiers outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown channel: {0}")]
pub struct UnknownChannel(String);

impl FromStr for ChannelKind {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "email" => Ok(ChannelKind::Email),
            "sms" => Ok(ChannelKind::Sms),
            "whatsapp" => Ok(ChannelKind::WhatsApp),
            "console" => Ok(ChannelKind::Console),
            _ => Err(UnknownChannel(s.to_string())),
        }
    }
}

/// Addressing information handed to a transport for one attempt.
#[derive(Debug, Clone)]
pub struct DeliveryContext {
    /// Recipient user name
    pub user_name: String,
    /// Notification being delivered
    pub notification_id: Uuid,
    /// Priority of the notification
    pub priority: Priority,
}

/// A transport capable of delivering a message to a user.
///
/// `attempt` reports failure as `false`. Transports never error out of the
/// dispatch loop; anything that would be an error at the gateway is a failed
/// attempt from the dispatcher's point of view.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Kind of this channel.
    fn kind(&self) -> ChannelKind;

    /// Try to deliver the message once.
    async fn attempt(&self, message: &str, ctx: &DeliveryContext) -> bool;
}
