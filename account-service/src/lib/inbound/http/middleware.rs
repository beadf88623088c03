use auth::Payload;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Verified token payload, stored in request extensions by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub payload: Payload,
}

/// Middleware that verifies the bearer token and adds its payload to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let payload = state.token_maker.verify_token(token).map_err(|e| {
        tracing::warn!("Access token rejected: {}", e);
        ApiError::from(e).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { payload });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("authorization header is not provided"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("invalid authorization header"))?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("invalid authorization header format, expected: Bearer <token>"))
}

fn unauthorized(message: &str) -> Response {
    tracing::warn!("{}", message);
    ApiError::Unauthorized(message.to_string()).into_response()
}
