use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::with_cookie;
use super::ApiSuccess;
use super::WithCookie;
use crate::inbound::http::cookies::clear_session_cookie;
use crate::inbound::http::router::AppState;

/// Clear the session cookie. Tokens are not tracked server-side, so this
/// always succeeds.
pub async fn logout(State(state): State<AppState>) -> WithCookie<LogoutResponseData> {
    with_cookie(
        clear_session_cookie(state.session.cookie_secure),
        ApiSuccess::new(StatusCode::OK, LogoutResponseData {}),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {}
