use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::user::models::Role;

/// Identity confirmed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifierError {
    #[error("Session check failed: {0}")]
    Transport(String),

    #[error("Unexpected status from session check: {0}")]
    UnexpectedStatus(u16),

    #[error("Malformed session response: {0}")]
    Decode(String),
}

/// Asks the server who the current session belongs to.
#[async_trait]
pub trait SessionVerifier: Send + Sync + 'static {
    /// `Ok(None)` means there is no valid session.
    async fn verify(&self) -> Result<Option<SessionUser>, VerifierError>;
}

/// `SessionVerifier` backed by `GET /auth/verify`.
///
/// Sends a bearer token when one is set; otherwise relies on the cookie
/// store of the supplied client.
#[derive(Debug, Clone)]
pub struct HttpSessionVerifier {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSessionVerifier {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

#[derive(Deserialize)]
struct VerifyResponse {
    user: SessionUser,
}

#[async_trait]
impl SessionVerifier for HttpSessionVerifier {
    async fn verify(&self) -> Result<Option<SessionUser>, VerifierError> {
        let mut request = self.client.get(format!("{}/auth/verify", self.base_url));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| VerifierError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Ok(None),
            status if status.is_success() => response
                .json::<VerifyResponse>()
                .await
                .map(|body| Some(body.user))
                .map_err(|e| VerifierError::Decode(e.to_string())),
            status => Err(VerifierError::UnexpectedStatus(status.as_u16())),
        }
    }
}
