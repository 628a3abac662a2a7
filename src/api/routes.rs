use axum::{
    routing::{get, post},
    Router,
};

use crate::server::AppState;

use super::channels::list_channels;
use super::health::{health, stats};
use super::metrics::prometheus_metrics;
use super::notifications::{delivery_history, send_notification};
use super::users::{get_user, list_users, register_user};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health & Stats
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/metrics", get(prometheus_metrics))
        // Versioned API
        .nest(
            "/api/v1",
            Router::new()
                // Users
                .route("/users", post(register_user).get(list_users))
                .route("/users/{name}", get(get_user))
                .route("/users/{name}/history", get(delivery_history))
                // Channels
                .route("/channels", get(list_channels))
                // Dispatch
                .route("/notifications/send", post(send_notification)),
        )
}
