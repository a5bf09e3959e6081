use async_trait::async_trait;

use crate::certificate::errors::CertificateError;
use crate::certificate::errors::DocumentStoreError;
use crate::certificate::errors::ProcessorError;
use crate::certificate::models::CertificateQuery;
use crate::certificate::models::CertificateRecord;
use crate::certificate::models::CertificateStats;
use crate::certificate::models::HashVerification;
use crate::certificate::models::NewCertificate;
use crate::certificate::models::ProcessedDocument;
use crate::certificate::models::Upload;

/// Port for certificate service operations.
#[async_trait]
pub trait CertificateServicePort: Send + Sync + 'static {
    /// Fingerprint, process and store an uploaded document.
    ///
    /// # Errors
    /// * `UnsupportedMediaType` - Content type is not an accepted image or PDF
    /// * `EmptyDocument` - Upload has no bytes
    /// * `TooLarge` - Upload exceeds the size limit
    async fn submit(&self, upload: Upload) -> Result<CertificateRecord, CertificateError>;

    /// Check whether a fingerprint belongs to a stored document.
    ///
    /// # Errors
    /// * `InvalidInput` - Hash is blank
    async fn verify_hash(&self, hash: &str) -> Result<HashVerification, CertificateError>;

    /// Stored certificates, newest first.
    async fn list(&self, query: CertificateQuery) -> Result<Vec<CertificateRecord>, CertificateError>;

    async fn stats(&self) -> Result<CertificateStats, CertificateError>;
}

/// Extracts certificate fields from raw document bytes.
#[async_trait]
pub trait DocumentProcessor: Send + Sync + 'static {
    async fn process_document(&self, bytes: &[u8]) -> Result<ProcessedDocument, ProcessorError>;
}

/// Persistence for processed certificates.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    async fn store(&self, certificate: NewCertificate) -> Result<CertificateRecord, DocumentStoreError>;

    async fn exists(&self, hash: &str) -> Result<bool, DocumentStoreError>;

    /// Stored records matching the query, newest first.
    async fn list(&self, query: CertificateQuery) -> Result<Vec<CertificateRecord>, DocumentStoreError>;

    async fn stats(&self) -> Result<CertificateStats, DocumentStoreError>;
}
