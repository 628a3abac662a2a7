//! Notification types and dispatching.
//!
//! The dispatcher walks a per-user fallback chain built from the channel
//! registry and records every attempt in the delivery ledger. Chain order is
//! the user's preferred channel first, then their remaining available
//! channels in registration order.

mod chain;
mod dispatcher;
mod types;

pub use chain::{ChainBuilder, ChannelChain};
pub use dispatcher::{
    DeliveryResult, DispatcherStats, DispatcherStatsSnapshot, NotificationDispatcher,
};
pub use types::{DispatchError, Notification, Priority};
