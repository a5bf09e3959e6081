use thiserror::Error;

/// Failures raised by a document processor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessorError {
    #[error("Document could not be processed: {0}")]
    Unreadable(String),
}

/// Failures raised by a document store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentStoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for certificate operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CertificateError {
    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    #[error("No file uploaded")]
    EmptyDocument,

    #[error("File too large: maximum {max} bytes, got {actual}")]
    TooLarge { max: usize, actual: usize },

    #[error("{0}")]
    InvalidInput(String),

    // Infrastructure errors
    #[error("Processing failed: {0}")]
    Processing(String),

    #[error("Storage failed: {0}")]
    Store(String),
}

impl From<ProcessorError> for CertificateError {
    fn from(err: ProcessorError) -> Self {
        CertificateError::Processing(err.to_string())
    }
}

impl From<DocumentStoreError> for CertificateError {
    fn from(err: DocumentStoreError) -> Self {
        CertificateError::Store(err.to_string())
    }
}
