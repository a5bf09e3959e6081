use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sha2::Digest;
use sha2::Sha256;

use crate::certificate::errors::CertificateError;
use crate::certificate::models::CertificateQuery;
use crate::certificate::models::CertificateRecord;
use crate::certificate::models::CertificateStats;
use crate::certificate::models::CertificateStatus;
use crate::certificate::models::HashVerification;
use crate::certificate::models::NewCertificate;
use crate::certificate::models::Upload;
use crate::certificate::ports::CertificateServicePort;
use crate::certificate::ports::DocumentProcessor;
use crate::certificate::ports::DocumentStore;

/// Content types accepted for upload.
pub const ALLOWED_CONTENT_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "application/pdf"];

/// Largest accepted upload (10 MiB).
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Domain service for certificate submission and lookup.
pub struct CertificateService<P, S>
where
    P: DocumentProcessor,
    S: DocumentStore,
{
    processor: Arc<P>,
    store: Arc<S>,
}

impl<P, S> CertificateService<P, S>
where
    P: DocumentProcessor,
    S: DocumentStore,
{
    pub fn new(processor: Arc<P>, store: Arc<S>) -> Self {
        Self { processor, store }
    }
}

/// Hex-encoded SHA-256 of the document bytes.
pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn validate_upload(upload: &Upload) -> Result<(), CertificateError> {
    // Parameters such as `; charset=` are ignored
    let media_type = upload
        .content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if !ALLOWED_CONTENT_TYPES.contains(&media_type.as_str()) {
        return Err(CertificateError::UnsupportedMediaType(
            upload.content_type.clone(),
        ));
    }
    if upload.bytes.is_empty() {
        return Err(CertificateError::EmptyDocument);
    }
    if upload.bytes.len() > MAX_DOCUMENT_BYTES {
        return Err(CertificateError::TooLarge {
            max: MAX_DOCUMENT_BYTES,
            actual: upload.bytes.len(),
        });
    }
    Ok(())
}

#[async_trait]
impl<P, S> CertificateServicePort for CertificateService<P, S>
where
    P: DocumentProcessor,
    S: DocumentStore,
{
    async fn submit(&self, upload: Upload) -> Result<CertificateRecord, CertificateError> {
        validate_upload(&upload)?;

        let hash = fingerprint(&upload.bytes);
        let processed = self.processor.process_document(&upload.bytes).await?;

        let record = self
            .store
            .store(NewCertificate {
                hash,
                status: CertificateStatus::from_confidence(processed.confidence),
                extracted_fields: processed.extracted_fields,
                confidence: processed.confidence,
            })
            .await?;

        tracing::info!(
            document_id = %record.id,
            hash = %record.hash,
            status = record.status.as_str(),
            "Certificate stored"
        );

        Ok(record)
    }

    async fn verify_hash(&self, hash: &str) -> Result<HashVerification, CertificateError> {
        let hash = hash.trim();
        if hash.is_empty() {
            return Err(CertificateError::InvalidInput(
                "Hash is required".to_string(),
            ));
        }

        let verified = self.store.exists(hash).await?;
        tracing::debug!(hash, verified, "Fingerprint lookup");

        Ok(HashVerification {
            hash: hash.to_string(),
            verified,
            checked_at: Utc::now(),
        })
    }

    async fn list(&self, query: CertificateQuery) -> Result<Vec<CertificateRecord>, CertificateError> {
        Ok(self.store.list(query).await?)
    }

    async fn stats(&self) -> Result<CertificateStats, CertificateError> {
        Ok(self.store.stats().await?)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::certificate::errors::DocumentStoreError;
    use crate::certificate::errors::ProcessorError;
    use crate::certificate::models::DocumentId;
    use crate::certificate::models::ExtractedFields;
    use crate::certificate::models::ProcessedDocument;

    mock! {
        pub TestProcessor {}

        #[async_trait]
        impl DocumentProcessor for TestProcessor {
            async fn process_document(&self, bytes: &[u8]) -> Result<ProcessedDocument, ProcessorError>;
        }
    }

    mock! {
        pub TestStore {}

        #[async_trait]
        impl DocumentStore for TestStore {
            async fn store(&self, certificate: NewCertificate) -> Result<CertificateRecord, DocumentStoreError>;
            async fn exists(&self, hash: &str) -> Result<bool, DocumentStoreError>;
            async fn list(&self, query: CertificateQuery) -> Result<Vec<CertificateRecord>, DocumentStoreError>;
            async fn stats(&self) -> Result<CertificateStats, DocumentStoreError>;
        }
    }

    fn fields() -> ExtractedFields {
        ExtractedFields {
            name: "John Smith".to_string(),
            roll_no: "CS2021001".to_string(),
            certificate_id: "CERT-2024-001".to_string(),
            marks: "85%".to_string(),
            institution: "University of Technology".to_string(),
        }
    }

    fn processor_with_confidence(confidence: f64) -> MockTestProcessor {
        let mut processor = MockTestProcessor::new();
        processor.expect_process_document().returning(move |_| {
            Ok(ProcessedDocument {
                extracted_fields: fields(),
                confidence,
            })
        });
        processor
    }

    fn echoing_store() -> MockTestStore {
        let mut store = MockTestStore::new();
        store.expect_store().returning(|certificate| {
            Ok(CertificateRecord {
                id: DocumentId::new(),
                hash: certificate.hash,
                extracted_fields: certificate.extracted_fields,
                confidence: certificate.confidence,
                status: certificate.status,
                uploaded_at: Utc::now(),
            })
        });
        store
    }

    fn service(
        processor: MockTestProcessor,
        store: MockTestStore,
    ) -> CertificateService<MockTestProcessor, MockTestStore> {
        CertificateService::new(Arc::new(processor), Arc::new(store))
    }

    #[test]
    fn test_fingerprint_is_sha256_hex() {
        assert_eq!(
            fingerprint(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_submit_stores_verified_record() {
        let service = service(processor_with_confidence(95.5), echoing_store());

        let record = service
            .submit(Upload::new(b"abc".to_vec(), "image/png"))
            .await
            .unwrap();

        assert_eq!(record.hash, fingerprint(b"abc"));
        assert_eq!(record.status, CertificateStatus::Verified);
        assert_eq!(record.extracted_fields, fields());
    }

    #[tokio::test]
    async fn test_submit_low_confidence_is_pending() {
        let service = service(processor_with_confidence(62.0), echoing_store());

        let record = service
            .submit(Upload::new(b"scan".to_vec(), "application/pdf"))
            .await
            .unwrap();

        assert_eq!(record.status, CertificateStatus::Pending);
    }

    #[tokio::test]
    async fn test_submit_accepts_content_type_parameters() {
        let service = service(processor_with_confidence(95.5), echoing_store());

        let result = service
            .submit(Upload::new(b"scan".to_vec(), "Image/JPEG; charset=binary"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_submit_rejects_unsupported_type() {
        let mut processor = MockTestProcessor::new();
        processor.expect_process_document().times(0);
        let mut store = MockTestStore::new();
        store.expect_store().times(0);
        let service = service(processor, store);

        let result = service
            .submit(Upload::new(b"hello".to_vec(), "text/plain"))
            .await;

        assert!(matches!(
            result,
            Err(CertificateError::UnsupportedMediaType(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_and_oversized() {
        let service = service(MockTestProcessor::new(), MockTestStore::new());

        let empty = service.submit(Upload::new(Vec::new(), "image/png")).await;
        assert_eq!(empty.unwrap_err(), CertificateError::EmptyDocument);

        let oversized = service
            .submit(Upload::new(vec![0u8; MAX_DOCUMENT_BYTES + 1], "image/png"))
            .await;
        assert_eq!(
            oversized.unwrap_err(),
            CertificateError::TooLarge {
                max: MAX_DOCUMENT_BYTES,
                actual: MAX_DOCUMENT_BYTES + 1,
            }
        );
    }

    #[tokio::test]
    async fn test_submit_processor_failure() {
        let mut processor = MockTestProcessor::new();
        processor
            .expect_process_document()
            .returning(|_| Err(ProcessorError::Unreadable("blurred".to_string())));
        let mut store = MockTestStore::new();
        store.expect_store().times(0);
        let service = service(processor, store);

        let result = service.submit(Upload::new(b"scan".to_vec(), "image/png")).await;

        assert!(matches!(result, Err(CertificateError::Processing(_))));
    }

    #[tokio::test]
    async fn test_verify_hash_reports_presence() {
        let mut store = MockTestStore::new();
        store
            .expect_exists()
            .with(eq("abc123"))
            .times(1)
            .returning(|_| Ok(true));
        let service = service(MockTestProcessor::new(), store);

        let verification = service.verify_hash(" abc123 ").await.unwrap();

        assert!(verification.verified);
        assert_eq!(verification.hash, "abc123");
    }

    #[tokio::test]
    async fn test_verify_hash_rejects_blank() {
        let mut store = MockTestStore::new();
        store.expect_exists().times(0);
        let service = service(MockTestProcessor::new(), store);

        let result = service.verify_hash("  ").await;

        assert!(matches!(result, Err(CertificateError::InvalidInput(_))));
    }
}
