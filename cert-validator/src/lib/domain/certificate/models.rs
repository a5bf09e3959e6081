use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Stored document identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Fields read off a certificate by the document processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    pub name: String,
    pub roll_no: String,
    pub certificate_id: String,
    pub marks: String,
    pub institution: String,
}

/// Output of a document processor run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedDocument {
    pub extracted_fields: ExtractedFields,
    /// Extraction confidence in percent
    pub confidence: f64,
}

/// Review status of a stored certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    Verified,
    Pending,
}

impl CertificateStatus {
    /// Confidence strictly above this value marks a certificate as verified.
    pub const VERIFIED_THRESHOLD: f64 = 80.0;

    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > Self::VERIFIED_THRESHOLD {
            CertificateStatus::Verified
        } else {
            CertificateStatus::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateStatus::Verified => "verified",
            CertificateStatus::Pending => "pending",
        }
    }
}

impl FromStr for CertificateStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verified" => Ok(CertificateStatus::Verified),
            "pending" => Ok(CertificateStatus::Pending),
            other => Err(format!("Unknown certificate status: {}", other)),
        }
    }
}

/// Record handed to the document store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCertificate {
    pub hash: String,
    pub extracted_fields: ExtractedFields,
    pub confidence: f64,
    pub status: CertificateStatus,
}

/// Stored certificate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    pub id: DocumentId,
    pub hash: String,
    pub extracted_fields: ExtractedFields,
    pub confidence: f64,
    pub status: CertificateStatus,
    pub uploaded_at: DateTime<Utc>,
}

/// Aggregate counts over the document store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CertificateStats {
    pub total: usize,
    pub verified: usize,
    pub pending: usize,
}

/// Result of looking up a fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct HashVerification {
    pub hash: String,
    pub verified: bool,
    pub checked_at: DateTime<Utc>,
}

/// Raw document submitted for processing.
pub struct Upload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl Upload {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("bytes", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// Filter for listing stored certificates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CertificateQuery {
    pub status: Option<CertificateStatus>,
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_threshold_is_exclusive() {
        assert_eq!(CertificateStatus::from_confidence(95.5), CertificateStatus::Verified);
        assert_eq!(CertificateStatus::from_confidence(80.0), CertificateStatus::Pending);
        assert_eq!(CertificateStatus::from_confidence(80.01), CertificateStatus::Verified);
    }

    #[test]
    fn test_extracted_fields_serialize_camel_case() {
        let fields = ExtractedFields {
            name: "John Smith".to_string(),
            roll_no: "CS2021001".to_string(),
            certificate_id: "CERT-2024-001".to_string(),
            marks: "85%".to_string(),
            institution: "University of Technology".to_string(),
        };

        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["rollNo"], "CS2021001");
        assert_eq!(json["certificateId"], "CERT-2024-001");
    }
}
