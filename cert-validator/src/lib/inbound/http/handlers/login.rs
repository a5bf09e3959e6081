use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::session_response;
use super::ApiError;
use super::SessionResponseData;
use super::WithCookie;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<WithCookie<SessionResponseData>, ApiError> {
    let Json(body) = body?;

    let session = state
        .auth_service
        .login(LoginCommand::new(body.email, body.password))
        .await?;

    Ok(session_response(StatusCode::OK, session, &state.session))
}

/// HTTP request body for logging in (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
