//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, TextEncoder};

use super::{ATTEMPTS_PER_SEND, CHANNEL_ATTEMPTS_TOTAL, REGISTRATIONS_TOTAL, SENDS_TOTAL};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording dispatch metrics
pub struct DispatchMetrics;

impl DispatchMetrics {
    /// Record a completed send by final outcome
    pub fn record_send(outcome: &str) {
        SENDS_TOTAL.with_label_values(&[outcome]).inc();
    }

    /// Record a single channel attempt
    pub fn record_attempt(channel: &str, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        CHANNEL_ATTEMPTS_TOTAL
            .with_label_values(&[channel, outcome])
            .inc();
    }

    /// Record how many attempts a send consumed
    pub fn observe_attempts(count: u32) {
        ATTEMPTS_PER_SEND.observe(count as f64);
    }
}

/// Helper struct for recording user registry metrics
pub struct UserMetrics;

impl UserMetrics {
    /// Record an accepted registration
    pub fn record_registration() {
        REGISTRATIONS_TOTAL.inc();
    }
}
