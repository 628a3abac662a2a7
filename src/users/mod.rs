//! User registration and lookup.

mod store;
mod types;

pub use store::{create_user_registry, UserRegistry};
pub use types::{RegisterUserRequest, User, UserError, UserListResponse, UserResult};
