// Infrastructure layer (shared components)
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;

// Domain layer (business logic)
pub mod channel;
pub mod ledger;
pub mod notification;
pub mod users;

// Application layer
pub mod api;
pub mod server;
