//! Fallback chain construction.
//!
//! The chain for a user is their preferred channel followed by the rest of
//! their available channels in registration order. Duplicates collapse into
//! their first position and identifiers that resolve to no registered
//! transport are dropped with a warning.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::channel::{ChannelKind, ChannelRegistry, DeliveryChannel};
use crate::users::User;

/// Ordered sequence of channels to try for one dispatch.
pub struct ChannelChain {
    // Chains rarely exceed the number of supported kinds.
    channels: SmallVec<[Arc<dyn DeliveryChannel>; 4]>,
    skipped: Vec<String>,
}

impl ChannelChain {
    /// Number of channels in the chain.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the chain has no channels.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Channels in attempt order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn DeliveryChannel>> {
        self.channels.iter()
    }

    /// Kinds in attempt order.
    pub fn kinds(&self) -> Vec<ChannelKind> {
        self.channels.iter().map(|channel| channel.kind()).collect()
    }

    /// Identifiers that could not be resolved to a registered channel.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
}

/// Builds per-user fallback chains against the channel registry.
pub struct ChainBuilder {
    registry: Arc<ChannelRegistry>,
}

impl ChainBuilder {
    pub fn new(registry: Arc<ChannelRegistry>) -> Self {
        Self { registry }
    }

    /// Build the fallback chain for a user.
    pub fn build(&self, user: &User) -> ChannelChain {
        let mut channels: SmallVec<[Arc<dyn DeliveryChannel>; 4]> = SmallVec::new();
        let mut seen: SmallVec<[ChannelKind; 4]> = SmallVec::new();
        let mut skipped: Vec<String> = Vec::new();

        let candidates =
            std::iter::once(&user.preferred_channel).chain(user.available_channels.iter());

        for name in candidates {
            match self.registry.resolve(name) {
                Some(channel) => {
                    let kind = channel.kind();
                    if seen.contains(&kind) {
                        continue;
                    }
                    seen.push(kind);
                    channels.push(channel);
                }
                None => {
                    if skipped.iter().any(|s| s == name) {
                        continue;
                    }
                    tracing::warn!(
                        user_name = %user.name,
                        channel = %name,
                        "Skipping unresolvable channel in fallback chain"
                    );
                    skipped.push(name.clone());
                }
            }
        }

        ChannelChain { channels, skipped }
    }
}
