//! Channel listing endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::channel::ChannelKind;
use crate::server::AppState;

/// Response for the channel list endpoint
#[derive(Debug, Serialize)]
pub struct ChannelListResponse {
    pub channels: Vec<ChannelKind>,
    pub total: usize,
}

/// GET /api/v1/channels - List registered delivery channels
#[tracing::instrument(name = "http.list_channels", skip(state))]
pub async fn list_channels(State(state): State<AppState>) -> Json<ChannelListResponse> {
    let channels = state.channels.kinds();
    let total = channels.len();
    Json(ChannelListResponse { channels, total })
}
