//! Channel registry.
//!
//! Maps channel kinds to transport instances. The registry is built once at
//! startup from configuration and shared read-only across the application.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ChannelsConfig;

use super::transports::{ConsoleChannel, EmailChannel, SmsChannel, WhatsAppChannel};
use super::{ChannelKind, DeliveryChannel};

/// Registry of available delivery channels, keyed by kind.
pub struct ChannelRegistry {
    channels: HashMap<ChannelKind, Arc<dyn DeliveryChannel>>,
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
        }
    }

    /// Register a channel, replacing any previous channel of the same kind.
    pub fn register(&mut self, channel: Arc<dyn DeliveryChannel>) {
        self.channels.insert(channel.kind(), channel);
    }

    /// Get the registered channel for a kind.
    pub fn get(&self, kind: ChannelKind) -> Option<Arc<dyn DeliveryChannel>> {
        self.channels.get(&kind).cloned()
    }

    /// Resolve a channel by identifier. Unknown identifiers and kinds with no
    /// registered transport both resolve to `None`.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn DeliveryChannel>> {
        name.parse::<ChannelKind>()
            .ok()
            .and_then(|kind| self.get(kind))
    }

    /// Whether a kind has a registered transport.
    pub fn contains(&self, kind: ChannelKind) -> bool {
        self.channels.contains_key(&kind)
    }

    /// Registered kinds, sorted for stable listings.
    pub fn kinds(&self) -> Vec<ChannelKind> {
        let mut kinds: Vec<ChannelKind> = self.channels.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Number of registered channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the registry has no channels.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Create the channel registry from configuration.
///
/// Enabled names that do not match a supported kind are skipped with a
/// warning rather than failing startup.
///
/// # Example
///
/// ```rust,ignore
/// let settings = Settings::new()?;
/// let registry = create_channel_registry(&settings.channels);
/// ```
pub fn create_channel_registry(config: &ChannelsConfig) -> Arc<ChannelRegistry> {
    let mut registry = ChannelRegistry::new();

    for name in &config.enabled {
        match name.parse::<ChannelKind>() {
            Ok(kind) => {
                if registry.contains(kind) {
                    continue;
                }
                let rates = &config.failure_rates;
                let channel: Arc<dyn DeliveryChannel> = match kind {
                    ChannelKind::Email => Arc::new(EmailChannel::new(rates.email)),
                    ChannelKind::Sms => Arc::new(SmsChannel::new(rates.sms)),
                    ChannelKind::WhatsApp => Arc::new(WhatsAppChannel::new(rates.whatsapp)),
                    ChannelKind::Console => Arc::new(ConsoleChannel::new(rates.console)),
                };
                tracing::info!(channel = %kind, "Registered delivery channel");
                registry.register(channel);
            }
            Err(_) => {
                tracing::warn!(
                    channel = %name,
                    "Unknown channel in configuration, skipping"
                );
            }
        }
    }

    if registry.is_empty() {
        tracing::warn!("No delivery channels registered, all sends will fail");
    }

    Arc::new(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailureRates;

    fn config_with(enabled: &[&str]) -> ChannelsConfig {
        ChannelsConfig {
            enabled: enabled.iter().map(|s| s.to_string()).collect(),
            failure_rates: FailureRates::default(),
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ChannelRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(EmailChannel::new(0.5)));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(ChannelKind::Email));
        assert!(registry.get(ChannelKind::Email).is_some());
        assert!(registry.get(ChannelKind::Sms).is_none());
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let mut registry = ChannelRegistry::new();
        registry.register(Arc::new(SmsChannel::new(0.5)));

        assert!(registry.resolve("sms").is_some());
        assert!(registry.resolve("SMS").is_some());
    }

    #[test]
    fn test_resolve_fails_closed() {
        let mut registry = ChannelRegistry::new();
        registry.register(Arc::new(EmailChannel::new(0.5)));

        // Unknown identifier
        assert!(registry.resolve("carrier-pigeon").is_none());
        // Known kind with no registered transport
        assert!(registry.resolve("console").is_none());
    }

    #[test]
    fn test_factory_registers_enabled_channels() {
        let registry = create_channel_registry(&config_with(&["email", "sms", "console"]));

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.kinds(),
            vec![ChannelKind::Email, ChannelKind::Sms, ChannelKind::Console]
        );
    }

    #[test]
    fn test_factory_skips_unknown_names() {
        let registry = create_channel_registry(&config_with(&["email", "carrier-pigeon"]));

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(ChannelKind::Email));
    }

    #[test]
    fn test_factory_deduplicates_enabled_list() {
        let registry = create_channel_registry(&config_with(&["email", "Email", "email"]));

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_factory_with_empty_config() {
        let registry = create_channel_registry(&config_with(&[]));

        assert!(registry.is_empty());
        assert!(registry.kinds().is_empty());
    }
}
