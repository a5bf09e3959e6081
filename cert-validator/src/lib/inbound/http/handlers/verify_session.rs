use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::cookies::session_token;
use crate::inbound::http::router::AppState;
use crate::user::errors::AuthError;

/// Resolve the current session from the cookie or a bearer token.
pub async fn verify_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<VerifySessionResponseData>, ApiError> {
    let token = session_token(&headers).ok_or(AuthError::NoToken)?;
    let user = state.auth_service.verify(&token).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        VerifySessionResponseData {
            user: (&user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifySessionResponseData {
    pub user: UserData,
}
