mod settings;

pub use settings::{ChannelsConfig, FailureRates, OtelConfig, ServerConfig, Settings};
