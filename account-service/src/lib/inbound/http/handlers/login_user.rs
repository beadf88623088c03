use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::LoginUserCommand;
use crate::domain::user::models::UserView;
use crate::inbound::http::router::AppState;

pub async fn login_user(
    State(state): State<AppState>,
    Json(body): Json<LoginUserRequest>,
) -> Result<ApiSuccess<LoginUserResponseData>, ApiError> {
    let ctx = state.request_token();

    let user = state
        .user_service
        .login_user(
            &ctx,
            LoginUserCommand {
                username: body.username,
                password: body.password,
            },
        )
        .await?;

    let (access_token, payload) = state
        .token_maker
        .create_token(&user.username, state.access_token_duration)?;

    tracing::info!(username = %user.username, token_id = %payload.id, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginUserResponseData {
            access_token,
            access_token_expires_at: payload.expiration(),
            user,
        },
    ))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginUserRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginUserResponseData {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    pub user: UserView,
}
