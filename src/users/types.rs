//! User types and validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User operation errors
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid user name: {0}")]
    InvalidName(String),

    #[error("Invalid channel selection: {0}")]
    InvalidChannels(String),
}

/// Result type for user operations
pub type UserResult<T> = Result<T, UserError>;

/// A registered notification recipient.
///
/// Users are immutable once registered. Channel identifiers are stored as
/// given; resolution against the registered transports happens when the
/// fallback chain is built, so a user may carry identifiers the service
/// cannot currently deliver to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user name (1-64 characters, alphanumeric with `-` and `_`)
    pub name: String,
    /// Channel to try first when sending to this user
    pub preferred_channel: String,
    /// Channels this user can be reached on, in fallback order
    pub available_channels: Vec<String>,
    /// When the user was registered
    #[serde(default = "Utc::now")]
    pub registered_at: DateTime<Utc>,
}

impl User {
    /// Validate user fields.
    pub fn validate(&self) -> UserResult<()> {
        if self.name.is_empty() || self.name.len() > 64 {
            return Err(UserError::InvalidName(
                "Name must be between 1 and 64 characters".to_string(),
            ));
        }

        if !self
            .name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(UserError::InvalidName(
                "Name can only contain alphanumeric characters, hyphens, and underscores"
                    .to_string(),
            ));
        }

        if self.available_channels.is_empty() {
            return Err(UserError::InvalidChannels(
                "At least one available channel is required".to_string(),
            ));
        }

        if self.preferred_channel.is_empty() {
            return Err(UserError::InvalidChannels(
                "Preferred channel must not be empty".to_string(),
            ));
        }

        if !self.available_channels.contains(&self.preferred_channel) {
            return Err(UserError::InvalidChannels(format!(
                "Preferred channel '{}' is not among the available channels",
                self.preferred_channel
            )));
        }

        Ok(())
    }
}

/// Request to register a new user
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub preferred_channel: String,
    pub available_channels: Vec<String>,
}

impl From<RegisterUserRequest> for User {
    fn from(request: RegisterUserRequest) -> Self {
        User {
            name: request.name,
            preferred_channel: request.preferred_channel,
            available_channels: request.available_channels,
            registered_at: Utc::now(),
        }
    }
}

/// Response for the user list endpoint
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub total: usize,
}
