//! Notification dispatch and delivery history endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::channel::ChannelKind;
use crate::error::{AppError, Result};
use crate::ledger::DeliveryAttempt;
use crate::notification::Priority;
use crate::server::AppState;

/// Request to send a notification
#[derive(Debug, Deserialize)]
pub struct SendNotificationRequest {
    /// Recipient user name
    pub user_name: String,
    /// Message text
    pub message: String,
    /// Priority level (defaults to medium)
    #[serde(default)]
    pub priority: Priority,
}

/// Response for the send endpoint
#[derive(Debug, Serialize)]
pub struct SendNotificationResponse {
    pub notification_id: Uuid,
    pub delivered: bool,
    pub channel_used: Option<ChannelKind>,
    pub total_attempts: u32,
    pub timestamp: DateTime<Utc>,
}

/// POST /api/v1/notifications/send - Dispatch a notification
///
/// A send where every channel fails, or where the user has no deliverable
/// channels, is still a successful request; the outcome is in the body.
#[tracing::instrument(
    name = "http.send_notification",
    skip(state, request),
    fields(user_name = %request.user_name)
)]
pub async fn send_notification(
    State(state): State<AppState>,
    Json(request): Json<SendNotificationRequest>,
) -> Result<Json<SendNotificationResponse>> {
    let result = state
        .dispatcher
        .send(&request.user_name, &request.message, request.priority)
        .await?;

    Ok(Json(SendNotificationResponse {
        notification_id: result.notification_id,
        delivered: result.delivered,
        channel_used: result.channel_used,
        total_attempts: result.total_attempts,
        timestamp: Utc::now(),
    }))
}

/// One delivery attempt in a history response
#[derive(Debug, Serialize)]
pub struct AttemptView {
    pub timestamp: DateTime<Utc>,
    pub notification_id: Uuid,
    pub user_name: String,
    pub channel: ChannelKind,
    pub message: String,
    pub priority: Priority,
    pub success: bool,
    pub attempt_number: u32,
}

impl From<DeliveryAttempt> for AttemptView {
    fn from(attempt: DeliveryAttempt) -> Self {
        Self {
            timestamp: attempt.timestamp,
            notification_id: attempt.notification_id,
            user_name: attempt.user_name,
            channel: attempt.channel,
            message: attempt.message,
            priority: attempt.priority,
            success: attempt.success,
            attempt_number: attempt.attempt_number,
        }
    }
}

/// Response for the delivery history endpoint
#[derive(Debug, Serialize)]
pub struct DeliveryHistoryResponse {
    pub user_name: String,
    pub attempts: Vec<AttemptView>,
    pub total: usize,
}

/// GET /api/v1/users/{name}/history - Delivery history for a user
///
/// Unknown users are a 404; a registered user with no attempts yet gets an
/// empty list.
#[tracing::instrument(name = "http.delivery_history", skip(state))]
pub async fn delivery_history(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeliveryHistoryResponse>> {
    if !state.users.exists(&name) {
        return Err(AppError::UserNotFound(name));
    }

    let attempts = state
        .ledger
        .query(&name)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let attempts: Vec<AttemptView> = attempts.into_iter().map(AttemptView::from).collect();
    let total = attempts.len();

    Ok(Json(DeliveryHistoryResponse {
        user_name: name,
        attempts,
        total,
    }))
}
