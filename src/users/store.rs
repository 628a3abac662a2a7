//! In-memory user registry.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::types::{User, UserError, UserResult};

/// Thread-safe registry of registered users.
pub struct UserRegistry {
    users: DashMap<String, User>,
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Register a new user.
    ///
    /// The name check and insert happen under one map entry lock, so two
    /// concurrent registrations of the same name cannot both succeed.
    pub fn register(&self, user: User) -> UserResult<User> {
        user.validate()?;

        match self.users.entry(user.name.clone()) {
            Entry::Occupied(_) => Err(UserError::AlreadyExists(user.name)),
            Entry::Vacant(slot) => {
                tracing::info!(
                    user_name = %user.name,
                    preferred_channel = %user.preferred_channel,
                    available_channels = user.available_channels.len(),
                    "Registered user"
                );
                let stored = user.clone();
                slot.insert(user);
                Ok(stored)
            }
        }
    }

    /// Look up a user by name.
    pub fn get(&self, name: &str) -> UserResult<User> {
        self.users
            .get(name)
            .map(|user| user.clone())
            .ok_or_else(|| UserError::NotFound(name.to_string()))
    }

    /// All registered users.
    pub fn list(&self) -> Vec<User> {
        self.users.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Whether a user is registered.
    pub fn exists(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    /// Number of registered users.
    pub fn count(&self) -> usize {
        self.users.len()
    }
}

/// Create a new shared user registry.
pub fn create_user_registry() -> Arc<UserRegistry> {
    Arc::new(UserRegistry::new())
}
