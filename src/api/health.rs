//! Health check and statistics endpoints.

use axum::{
    extract::State,
    Json,
};
use serde::Serialize;

use crate::channel::ChannelKind;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub users: UserHealthResponse,
    pub channels: ChannelHealthResponse,
    pub ledger: LedgerHealthResponse,
}

#[derive(Debug, Serialize)]
pub struct UserHealthResponse {
    pub registered: usize,
}

#[derive(Debug, Serialize)]
pub struct ChannelHealthResponse {
    pub registered: usize,
    pub kinds: Vec<ChannelKind>,
}

#[derive(Debug, Serialize)]
pub struct LedgerHealthResponse {
    pub backend: String,
    pub total_attempts: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub users: UserStats,
    pub channels: ChannelStats,
    pub dispatch: DispatchStats,
    pub ledger: LedgerStatsResponse,
}

#[derive(Debug, Serialize)]
pub struct UserStats {
    pub registered: usize,
}

#[derive(Debug, Serialize)]
pub struct ChannelStats {
    pub registered: usize,
    pub kinds: Vec<ChannelKind>,
}

#[derive(Debug, Serialize)]
pub struct DispatchStats {
    pub total_sends: u64,
    pub delivered: u64,
    pub exhausted: u64,
    pub no_channel_sends: u64,
    pub total_attempts: u64,
}

#[derive(Debug, Serialize)]
pub struct LedgerStatsResponse {
    pub backend: String,
    pub total_attempts: usize,
    pub successful_attempts: usize,
    pub failed_attempts: usize,
    pub users_with_history: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    let ledger_stats = state.ledger.stats().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        users: UserHealthResponse {
            registered: state.users.count(),
        },
        channels: ChannelHealthResponse {
            registered: state.channels.len(),
            kinds: state.channels.kinds(),
        },
        ledger: LedgerHealthResponse {
            backend: ledger_stats.backend_type,
            total_attempts: ledger_stats.total_attempts,
        },
    })
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let dispatcher_stats = state.dispatcher.stats();
    let ledger_stats = state.ledger.stats().await;

    Json(StatsResponse {
        users: UserStats {
            registered: state.users.count(),
        },
        channels: ChannelStats {
            registered: state.channels.len(),
            kinds: state.channels.kinds(),
        },
        dispatch: DispatchStats {
            total_sends: dispatcher_stats.total_sends,
            delivered: dispatcher_stats.delivered,
            exhausted: dispatcher_stats.exhausted,
            no_channel_sends: dispatcher_stats.no_channel_sends,
            total_attempts: dispatcher_stats.total_attempts,
        },
        ledger: LedgerStatsResponse {
            backend: ledger_stats.backend_type,
            total_attempts: ledger_stats.total_attempts,
            successful_attempts: ledger_stats.successful_attempts,
            failed_attempts: ledger_stats.failed_attempts,
            users_with_history: ledger_stats.users_with_history,
        },
    })
}
