//! User registration endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::metrics::UserMetrics;
use crate::server::AppState;
use crate::users::{RegisterUserRequest, User, UserError, UserListResponse};

/// Error response for user endpoints
#[derive(Debug, Serialize)]
pub struct UserErrorResponse {
    pub error: UserErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct UserErrorInfo {
    pub code: String,
    pub message: String,
}

impl From<UserError> for (StatusCode, Json<UserErrorResponse>) {
    fn from(err: UserError) -> Self {
        let (status, code) = match &err {
            UserError::NotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            UserError::AlreadyExists(_) => (StatusCode::CONFLICT, "USER_EXISTS"),
            UserError::InvalidName(_) => (StatusCode::BAD_REQUEST, "INVALID_NAME"),
            UserError::InvalidChannels(_) => (StatusCode::BAD_REQUEST, "INVALID_CHANNELS"),
        };

        (
            status,
            Json(UserErrorResponse {
                error: UserErrorInfo {
                    code: code.to_string(),
                    message: err.to_string(),
                },
            }),
        )
    }
}

/// POST /api/v1/users - Register a new user
#[tracing::instrument(
    name = "http.register_user",
    skip(state, request),
    fields(user_name = %request.name)
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), (StatusCode, Json<UserErrorResponse>)> {
    match state.users.register(request.into()) {
        Ok(user) => {
            UserMetrics::record_registration();
            Ok((StatusCode::CREATED, Json(user)))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /api/v1/users - List registered users
#[tracing::instrument(name = "http.list_users", skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Json<UserListResponse> {
    let users = state.users.list();
    let total = users.len();
    Json(UserListResponse { users, total })
}

/// GET /api/v1/users/{name} - Get a registered user
#[tracing::instrument(name = "http.get_user", skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<User>, (StatusCode, Json<UserErrorResponse>)> {
    match state.users.get(&name) {
        Ok(user) => Ok(Json(user)),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped(err: UserError) -> (StatusCode, String) {
        let (status, Json(body)): (StatusCode, Json<UserErrorResponse>) = err.into();
        (status, body.error.code)
    }

    #[test]
    fn test_user_error_status_mapping() {
        assert_eq!(
            mapped(UserError::NotFound("alice".to_string())),
            (StatusCode::NOT_FOUND, "USER_NOT_FOUND".to_string())
        );
        assert_eq!(
            mapped(UserError::AlreadyExists("alice".to_string())),
            (StatusCode::CONFLICT, "USER_EXISTS".to_string())
        );
        assert_eq!(
            mapped(UserError::InvalidName("too long".to_string())),
            (StatusCode::BAD_REQUEST, "INVALID_NAME".to_string())
        );
        assert_eq!(
            mapped(UserError::InvalidChannels("empty".to_string())),
            (StatusCode::BAD_REQUEST, "INVALID_CHANNELS".to_string())
        );
    }

    #[test]
    fn test_error_body_carries_detail() {
        let (_, Json(body)): (StatusCode, Json<UserErrorResponse>) =
            UserError::NotFound("bob".to_string()).into();
        assert!(body.error.message.contains("bob"));
    }
}
