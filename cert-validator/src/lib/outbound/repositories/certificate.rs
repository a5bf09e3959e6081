use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::certificate::errors::DocumentStoreError;
use crate::certificate::models::CertificateQuery;
use crate::certificate::models::CertificateRecord;
use crate::certificate::models::CertificateStats;
use crate::certificate::models::CertificateStatus;
use crate::certificate::models::DocumentId;
use crate::certificate::models::NewCertificate;
use crate::certificate::ports::DocumentStore;

/// Process-local document store. Records are kept in upload order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    records: Arc<RwLock<Vec<CertificateRecord>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn store(&self, certificate: NewCertificate) -> Result<CertificateRecord, DocumentStoreError> {
        let record = CertificateRecord {
            id: DocumentId::new(),
            hash: certificate.hash,
            extracted_fields: certificate.extracted_fields,
            confidence: certificate.confidence,
            status: certificate.status,
            uploaded_at: Utc::now(),
        };

        self.records.write().await.push(record.clone());

        Ok(record)
    }

    async fn exists(&self, hash: &str) -> Result<bool, DocumentStoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .any(|record| record.hash == hash))
    }

    async fn list(&self, query: CertificateQuery) -> Result<Vec<CertificateRecord>, DocumentStoreError> {
        let records = self.records.read().await;

        Ok(records
            .iter()
            .rev()
            .filter(|record| query.status.map_or(true, |status| record.status == status))
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn stats(&self) -> Result<CertificateStats, DocumentStoreError> {
        let records = self.records.read().await;
        let verified = records
            .iter()
            .filter(|record| record.status == CertificateStatus::Verified)
            .count();

        Ok(CertificateStats {
            total: records.len(),
            verified,
            pending: records.len() - verified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::models::ExtractedFields;

    fn certificate(hash: &str, status: CertificateStatus) -> NewCertificate {
        NewCertificate {
            hash: hash.to_string(),
            extracted_fields: ExtractedFields {
                name: "John Smith".to_string(),
                roll_no: "CS2021001".to_string(),
                certificate_id: "CERT-2024-001".to_string(),
                marks: "85%".to_string(),
                institution: "University of Technology".to_string(),
            },
            confidence: 95.5,
            status,
        }
    }

    #[tokio::test]
    async fn test_list_newest_first_with_filter_and_limit() {
        let store = InMemoryDocumentStore::new();
        store.store(certificate("a", CertificateStatus::Verified)).await.unwrap();
        store.store(certificate("b", CertificateStatus::Pending)).await.unwrap();
        store.store(certificate("c", CertificateStatus::Verified)).await.unwrap();

        let all = store.list(CertificateQuery::default()).await.unwrap();
        let hashes: Vec<_> = all.iter().map(|r| r.hash.as_str()).collect();
        assert_eq!(hashes, ["c", "b", "a"]);

        let verified = store
            .list(CertificateQuery {
                status: Some(CertificateStatus::Verified),
                limit: Some(1),
            })
            .await
            .unwrap();
        assert_eq!(verified.len(), 1);
        assert_eq!(verified[0].hash, "c");
    }

    #[tokio::test]
    async fn test_exists_and_stats() {
        let store = InMemoryDocumentStore::new();
        store.store(certificate("a", CertificateStatus::Verified)).await.unwrap();
        store.store(certificate("b", CertificateStatus::Pending)).await.unwrap();

        assert!(store.exists("a").await.unwrap());
        assert!(!store.exists("z").await.unwrap());
        assert_eq!(
            store.stats().await.unwrap(),
            CertificateStats {
                total: 2,
                verified: 1,
                pending: 1,
            }
        );
    }
}
