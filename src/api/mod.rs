//! API layer - HTTP endpoint handlers organized by domain.

mod channels;
mod health;
mod metrics;
mod notifications;
mod routes;
mod users;

// Re-export all handlers for use in server/app.rs
pub use channels::list_channels;
pub use health::{health, stats};
pub use metrics::prometheus_metrics;
pub use notifications::{delivery_history, send_notification};
pub use routes::api_routes;
pub use users::{get_user, list_users, register_user};
pub use users::{UserErrorInfo, UserErrorResponse};
