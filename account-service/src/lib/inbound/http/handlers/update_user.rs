use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::register_user::UserResponseData;
use crate::domain::user::models::UpdateUserCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a user (raw JSON). Absent fields are kept.
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    if authenticated.payload.username != username {
        tracing::warn!(
            token_username = %authenticated.payload.username,
            target = %username,
            "Rejected update of another user's account"
        );
        return Err(ApiError::Forbidden(
            "cannot update other user's info".to_string(),
        ));
    }

    let ctx = state.request_token();
    let command = UpdateUserCommand {
        username,
        full_name: req.full_name,
        email: req.email,
        password: req.password,
    };

    state
        .user_service
        .update_user(&ctx, command)
        .await
        .map_err(ApiError::from)
        .map(|user| ApiSuccess::new(StatusCode::OK, UserResponseData { user }))
}
