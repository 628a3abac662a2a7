use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    #[serde(default)]
    pub channels: ChannelsConfig,
    #[serde(default)]
    pub otel: OtelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelsConfig {
    /// Channel identifiers registered at startup
    #[serde(default = "default_enabled_channels")]
    pub enabled: Vec<String>,
    /// Simulated failure probability per transport
    #[serde(default)]
    pub failure_rates: FailureRates,
}

fn default_enabled_channels() -> Vec<String> {
    vec![
        "email".to_string(),
        "sms".to_string(),
        "console".to_string(),
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct FailureRates {
    #[serde(default = "default_gateway_failure_rate")]
    pub email: f64,
    #[serde(default = "default_gateway_failure_rate")]
    pub sms: f64,
    #[serde(default = "default_gateway_failure_rate")]
    pub whatsapp: f64,
    #[serde(default)]
    pub console: f64,
}

fn default_gateway_failure_rate() -> f64 {
    0.5
}

/// OpenTelemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OtelConfig {
    /// Enable OpenTelemetry tracing
    #[serde(default)]
    pub enabled: bool,
    /// OTLP exporter endpoint
    #[serde(default = "default_otel_endpoint")]
    pub endpoint: String,
    /// Service name for traces
    #[serde(default = "default_otel_service_name")]
    pub service_name: String,
    /// Sampling ratio (0.0 to 1.0)
    #[serde(default = "default_otel_sampling_ratio")]
    pub sampling_ratio: f64,
}

fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_otel_service_name() -> String {
    "herald-notification-service".to_string()
}

fn default_otel_sampling_ratio() -> f64 {
    1.0
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_channels(),
            failure_rates: FailureRates::default(),
        }
    }
}

impl Default for FailureRates {
    fn default() -> Self {
        Self {
            email: default_gateway_failure_rate(),
            sms: default_gateway_failure_rate(),
            whatsapp: default_gateway_failure_rate(),
            console: 0.0,
        }
    }
}

impl Default for OtelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_otel_endpoint(),
            service_name: default_otel_service_name(),
            sampling_ratio: default_otel_sampling_ratio(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = Config::builder()
            // Default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            // Layered configuration files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables (e.g. SERVER_PORT=8080, CHANNELS_ENABLED=email,console)
            .add_source(
                Environment::default()
                    .separator("_")
                    .try_parsing(true)
                    .list_separator(","),
            );

        builder.build()?.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
        assert!(server.cors_origins.is_empty());
    }

    #[test]
    fn test_default_channels() {
        let channels = ChannelsConfig::default();
        assert_eq!(channels.enabled, vec!["email", "sms", "console"]);
        assert_eq!(channels.failure_rates.email, 0.5);
        assert_eq!(channels.failure_rates.console, 0.0);
    }

    #[test]
    fn test_default_otel() {
        let otel = OtelConfig::default();
        assert!(!otel.enabled);
        assert_eq!(otel.endpoint, "http://localhost:4317");
        assert_eq!(otel.sampling_ratio, 1.0);
    }

    #[test]
    fn test_server_addr() {
        let settings = Settings {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 9000,
                cors_origins: Vec::new(),
            },
            channels: ChannelsConfig::default(),
            otel: OtelConfig::default(),
        };
        assert_eq!(settings.server_addr(), "127.0.0.1:9000");
    }
}
