use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::certificate::errors::CertificateError;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::inbound::http::cookies::session_cookie;
use crate::inbound::http::router::SessionSettings;
use crate::user::errors::AuthError;

pub mod certificates;
pub mod health;
pub mod login;
pub mod logout;
pub mod pages;
pub mod register;
pub mod stats;
pub mod verify_session;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
const INVALID_BODY_MESSAGE: &str = "Invalid request body";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Success response that also sets or clears the session cookie.
pub type WithCookie<T> = ([(HeaderName, String); 1], ApiSuccess<T>);

pub fn with_cookie<T: Serialize + PartialEq>(cookie: String, success: ApiSuccess<T>) -> WithCookie<T> {
    ([(header::SET_COOKIE, cookie)], success)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    PayloadTooLarge(String),
    UnsupportedMediaType(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        Self::BadRequest(INVALID_BODY_MESSAGE.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            ApiError::UnsupportedMediaType(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::SignatureInvalid
            | AuthError::Expired
            | AuthError::NoToken
            | AuthError::UserNotFound => ApiError::Unauthorized(err.to_string()),
            AuthError::UserExists(_) | AuthError::WeakPassword(_) | AuthError::InvalidInput(_) => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::Unauthorized(_) => ApiError::Forbidden(err.to_string()),
            AuthError::Internal(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<CertificateError> for ApiError {
    fn from(err: CertificateError) -> Self {
        match err {
            CertificateError::UnsupportedMediaType(_) => {
                ApiError::UnsupportedMediaType(err.to_string())
            }
            CertificateError::TooLarge { .. } => ApiError::PayloadTooLarge(err.to_string()),
            CertificateError::EmptyDocument | CertificateError::InvalidInput(_) => {
                ApiError::BadRequest(err.to_string())
            }
            CertificateError::Processing(_) | CertificateError::Store(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    #[serde(flatten)]
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Public projection of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            name: user.name.as_str().to_string(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub user: UserData,
    pub token: String,
}

/// Body and cookie for a freshly opened session.
fn session_response(
    status: StatusCode,
    session: AuthSession,
    settings: &SessionSettings,
) -> WithCookie<SessionResponseData> {
    let cookie = session_cookie(
        &session.token,
        settings.max_age_seconds,
        settings.cookie_secure,
    );
    with_cookie(
        cookie,
        ApiSuccess::new(
            status,
            SessionResponseData {
                user: (&session.user).into(),
                token: session.token,
            },
        ),
    )
}
