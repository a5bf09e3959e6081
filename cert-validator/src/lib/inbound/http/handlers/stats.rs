use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::certificate::ports::CertificateServicePort;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::AuthError;

/// Dashboard counters. Admin only.
pub async fn stats(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<StatsResponseData>, ApiError> {
    if !user.is_admin() {
        tracing::warn!(user_id = %user.user_id, role = %user.role, "Stats requested without admin role");
        return Err(AuthError::Unauthorized("admin".to_string()).into());
    }

    let certificates = state.certificate_service.stats().await?;
    let total_users = state.auth_service.count_users().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        StatsResponseData {
            total_certificates: certificates.total,
            verified_certificates: certificates.verified,
            pending_certificates: certificates.pending,
            total_users,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponseData {
    pub total_certificates: usize,
    pub verified_certificates: usize,
    pub pending_certificates: usize,
    pub total_users: usize,
}
