use axum::body::Bytes;
use axum::extract::Query;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::certificate::models::CertificateQuery;
use crate::certificate::models::CertificateRecord;
use crate::certificate::models::CertificateStatus;
use crate::certificate::models::DocumentId;
use crate::certificate::models::ExtractedFields;
use crate::certificate::models::Upload;
use crate::certificate::ports::CertificateServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Upload a certificate as the raw request body.
pub async fn submit_certificate(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ApiSuccess<SubmitCertificateResponseData>, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    tracing::info!(
        user_id = %user.user_id,
        content_type,
        size = body.len(),
        "Certificate upload received"
    );

    let record = state
        .certificate_service
        .submit(Upload::new(body.to_vec(), content_type))
        .await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, record.into()))
}

pub async fn list_certificates(
    State(state): State<AppState>,
    Query(params): Query<ListCertificatesParams>,
) -> Result<ApiSuccess<ListCertificatesResponseData>, ApiError> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<CertificateStatus>)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let certificates = state
        .certificate_service
        .list(CertificateQuery {
            status,
            limit: params.limit,
        })
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ListCertificatesResponseData {
            count: certificates.len(),
            certificates,
        },
    ))
}

pub async fn verify_hash(
    State(state): State<AppState>,
    body: Result<Json<VerifyHashRequest>, JsonRejection>,
) -> Result<ApiSuccess<VerifyHashResponseData>, ApiError> {
    let Json(body) = body?;

    let verification = state.certificate_service.verify_hash(&body.hash).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        VerifyHashResponseData {
            hash: verification.hash,
            verified: verification.verified,
            timestamp: verification.checked_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCertificateResponseData {
    pub document_id: DocumentId,
    pub hash: String,
    pub extracted_fields: ExtractedFields,
    pub confidence: f64,
    pub status: CertificateStatus,
}

impl From<CertificateRecord> for SubmitCertificateResponseData {
    fn from(record: CertificateRecord) -> Self {
        Self {
            document_id: record.id,
            hash: record.hash,
            extracted_fields: record.extracted_fields,
            confidence: record.confidence,
            status: record.status,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCertificatesParams {
    status: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListCertificatesResponseData {
    pub certificates: Vec<CertificateRecord>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyHashRequest {
    hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyHashResponseData {
    pub hash: String,
    pub verified: bool,
    pub timestamp: DateTime<Utc>,
}
