//! Prometheus metrics for the notification service.
//!
//! This module provides metrics for monitoring delivery behavior:
//! - Send metrics (dispatch outcomes)
//! - Channel metrics (attempts per channel and outcome)
//! - User registry metrics
//! - Ledger metrics

mod helpers;

pub use helpers::{encode_metrics, DispatchMetrics, UserMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, register_int_gauge,
    Histogram, IntCounter, IntCounterVec, IntGauge,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "herald";

lazy_static! {
    // ============================================================================
    // Dispatch Metrics
    // ============================================================================

    /// Total sends by final outcome (delivered, exhausted, no_channels)
    pub static ref SENDS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_sends_total", METRIC_PREFIX),
        "Total notification sends by final outcome",
        &["outcome"]
    ).unwrap();

    /// Delivery attempts by channel and outcome
    pub static ref CHANNEL_ATTEMPTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_channel_attempts_total", METRIC_PREFIX),
        "Total delivery attempts by channel and outcome",
        &["channel", "outcome"]
    ).unwrap();

    /// Attempts consumed per send
    pub static ref ATTEMPTS_PER_SEND: Histogram = register_histogram!(
        format!("{}_attempts_per_send", METRIC_PREFIX),
        "Distribution of delivery attempts per send",
        vec![1.0, 2.0, 3.0, 4.0, 5.0]
    ).unwrap();

    // ============================================================================
    // User Metrics
    // ============================================================================

    /// Total accepted user registrations
    pub static ref REGISTRATIONS_TOTAL: IntCounter = register_int_counter!(
        format!("{}_registrations_total", METRIC_PREFIX),
        "Total accepted user registrations"
    ).unwrap();

    /// Currently registered users
    pub static ref USERS_REGISTERED: IntGauge = register_int_gauge!(
        format!("{}_users_registered", METRIC_PREFIX),
        "Number of registered users"
    ).unwrap();

    // ============================================================================
    // Channel Registry Metrics
    // ============================================================================

    /// Registered delivery channels
    pub static ref CHANNELS_REGISTERED: IntGauge = register_int_gauge!(
        format!("{}_channels_registered", METRIC_PREFIX),
        "Number of registered delivery channels"
    ).unwrap();

    // ============================================================================
    // Ledger Metrics
    // ============================================================================

    /// Attempt records appended to the ledger
    pub static ref LEDGER_APPENDS_TOTAL: IntCounter = register_int_counter!(
        format!("{}_ledger_appends_total", METRIC_PREFIX),
        "Total attempt records appended to the delivery ledger"
    ).unwrap();

    /// Attempt records currently held by the ledger
    pub static ref LEDGER_ENTRIES: IntGauge = register_int_gauge!(
        format!("{}_ledger_entries", METRIC_PREFIX),
        "Number of attempt records in the delivery ledger"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_can_be_updated() {
        // Just verify no panics
        SENDS_TOTAL.with_label_values(&["delivered"]).inc();
        CHANNEL_ATTEMPTS_TOTAL
            .with_label_values(&["email", "failure"])
            .inc();
        ATTEMPTS_PER_SEND.observe(2.0);
        REGISTRATIONS_TOTAL.inc();
        USERS_REGISTERED.set(3);
        CHANNELS_REGISTERED.set(3);
        LEDGER_APPENDS_TOTAL.inc();
        LEDGER_ENTRIES.set(10);
    }

    #[test]
    fn test_encode_metrics_contains_prefix() {
        SENDS_TOTAL.with_label_values(&["exhausted"]).inc();
        let output = encode_metrics().unwrap();
        assert!(output.contains("herald_sends_total"));
    }
}
