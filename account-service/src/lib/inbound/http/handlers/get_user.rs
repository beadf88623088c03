use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::register_user::UserResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let ctx = state.request_token();

    state
        .user_service
        .get_user(&ctx, &username)
        .await
        .map_err(ApiError::from)
        .map(|user| ApiSuccess::new(StatusCode::OK, UserResponseData { user }))
}
