use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;

use super::cookies::cookie_token;
use super::cookies::session_token;
use super::handlers::ApiError;
use crate::domain::session::GuardDecision;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::errors::AuthError;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub role: String,
}

impl AuthenticatedUser {
    /// Roles the server does not recognise never grant admin access.
    pub fn is_admin(&self) -> bool {
        self.role.parse::<Role>().is_ok_and(|role| role.is_admin())
    }
}

/// Middleware that validates the session token for API routes and adds the
/// caller to request extensions. Rejects with a 401 JSON body.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(req.headers()).ok_or(AuthError::NoToken)?;

    let claims = state.authenticator.validate_token(&token).map_err(|e| {
        tracing::warn!(error = %e, "Session token validation failed");
        AuthError::from(e)
    })?;

    let user_id = UserId::from_string(&claims.user_id).map_err(|e| {
        tracing::warn!(error = %e, "Session token carries a malformed user id");
        AuthError::SignatureInvalid
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Middleware that applies the route guard to every request.
///
/// Only the cookie is consulted: page navigations never carry a bearer
/// header. Rejections are bodiless 307 redirects.
pub async fn guard_routes(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let token = cookie_token(req.headers());

    match state
        .route_guard
        .evaluate(req.uri().path(), token.as_deref())
    {
        GuardDecision::Allow => next.run(req).await,
        GuardDecision::Redirect(location) => {
            tracing::debug!(path = req.uri().path(), location, "Route guard redirect");
            Redirect::temporary(location).into_response()
        }
    }
}
