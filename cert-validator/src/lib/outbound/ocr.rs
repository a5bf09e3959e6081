use async_trait::async_trait;

use crate::certificate::errors::ProcessorError;
use crate::certificate::models::ExtractedFields;
use crate::certificate::models::ProcessedDocument;
use crate::certificate::ports::DocumentProcessor;

/// Stand-in for a real OCR engine.
///
/// Every document yields the same fixture fields and confidence.
#[derive(Debug, Clone, Default)]
pub struct FixtureDocumentProcessor;

impl FixtureDocumentProcessor {
    pub const CONFIDENCE: f64 = 95.5;

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentProcessor for FixtureDocumentProcessor {
    async fn process_document(&self, bytes: &[u8]) -> Result<ProcessedDocument, ProcessorError> {
        tracing::debug!(size = bytes.len(), "Processing document with fixture OCR");

        Ok(ProcessedDocument {
            extracted_fields: ExtractedFields {
                name: "John Smith".to_string(),
                roll_no: "CS2021001".to_string(),
                certificate_id: "CERT-2024-001".to_string(),
                marks: "85%".to_string(),
                institution: "University of Technology".to_string(),
            },
            confidence: Self::CONFIDENCE,
        })
    }
}
