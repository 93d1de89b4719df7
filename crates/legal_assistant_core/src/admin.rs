//! crates/legal_assistant_core/src/admin.rs
//!
//! State behind the operator view: document uploads, the list of indexed
//! collections, and backend health. Each concern runs on its own `AsyncTask`
//! so the three never wait on one another.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::domain::{
    DocumentRecord, HealthRecord, HealthStatus, UploadFile, UploadReceipt, UploadRequest,
};
use crate::domains::{self, Domain};
use crate::ports::LegalBackendService;
use crate::task::{AsyncTask, TaskError};

/// Reported before any health check has completed.
pub const HEALTH_UNAVAILABLE_TEXT: &str = "Health status not available";

/// Aggregates over the current document snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStats {
    pub total_documents: usize,
    pub total_vectors: u64,
    /// Number of collections per legal domain prefix.
    pub domain_stats: BTreeMap<String, usize>,
    pub documents: Vec<DocumentRecord>,
}

/// What the operator view shows about backend health.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthView {
    pub record: HealthRecord,
    pub is_healthy: bool,
}

pub struct AdminOrchestrator {
    backend: Arc<dyn LegalBackendService>,
    selected_domain: Mutex<&'static Domain>,
    uploads_in_flight: AtomicUsize,
    initialized: AtomicBool,
    upload_task: AsyncTask<UploadReceipt>,
    documents_task: AsyncTask<Vec<DocumentRecord>>,
    health_task: AsyncTask<HealthRecord>,
}

impl AdminOrchestrator {
    pub fn new(backend: Arc<dyn LegalBackendService>) -> Self {
        Self {
            backend,
            selected_domain: Mutex::new(domains::default_domain()),
            uploads_in_flight: AtomicUsize::new(0),
            initialized: AtomicBool::new(false),
            upload_task: AsyncTask::new("upload"),
            documents_task: AsyncTask::new("documents"),
            health_task: AsyncTask::new("health"),
        }
    }

    /// Loads the document list and checks health, concurrently.
    ///
    /// Only the first call does anything; returns whether this call did the work.
    pub async fn initialize(&self) -> bool {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return false;
        }
        info!("Initializing admin view.");
        let (documents, health) = futures::join!(self.refresh_documents(), self.check_health());
        if let Err(e) = documents {
            warn!("Initial document fetch failed: {}", e);
        }
        info!(status = health.record.status.as_str(), "Initial health check done.");
        true
    }

    /// Uploads `file` into `domain`.
    ///
    /// A successful upload is followed by a document refresh before returning.
    /// The refresh is best effort and never changes the upload's result.
    pub async fn upload_file(
        &self,
        file: UploadFile,
        domain: &str,
    ) -> Result<UploadReceipt, TaskError> {
        let request = UploadRequest {
            file,
            domain: domain.to_string(),
        };
        info!(
            file = %request.file.file_name,
            domain = %request.domain,
            bytes = request.file.bytes.len(),
            "Uploading document."
        );

        self.uploads_in_flight.fetch_add(1, Ordering::SeqCst);
        let backend = self.backend.clone();
        let outcome = self
            .upload_task
            .run(move || async move { backend.upload_document(request).await })
            .await;

        let result = match outcome {
            Ok(receipt) => {
                if let Err(e) = self.refresh_documents().await {
                    warn!("Document refresh after upload failed: {}", e);
                }
                Ok(receipt)
            }
            Err(e) => {
                error!("Upload failed: {}", e);
                Err(e)
            }
        };
        // Stays raised through the follow-up refresh.
        self.uploads_in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    /// Replaces the document list with a fresh snapshot from the backend.
    ///
    /// On failure the previous list is kept and the error is recorded.
    pub async fn refresh_documents(&self) -> Result<Vec<DocumentRecord>, TaskError> {
        let backend = self.backend.clone();
        let outcome = self
            .documents_task
            .run(move || async move { backend.list_documents().await })
            .await;
        if let Ok(documents) = &outcome {
            info!(count = documents.len(), "Document list refreshed.");
        }
        outcome
    }

    /// Probes the backend and returns the resulting view.
    pub async fn check_health(&self) -> HealthView {
        let backend = self.backend.clone();
        if let Err(e) = self
            .health_task
            .run(move || async move { backend.health().await })
            .await
        {
            warn!("Health check failed: {}", e);
        }
        self.health_status().await
    }

    /// The current health view without contacting the backend.
    ///
    /// A check that never completed reads as unknown; a latest check that
    /// failed reads as unhealthy with the failure as its message.
    pub async fn health_status(&self) -> HealthView {
        let state = self.health_task.snapshot().await;
        let record = match (state.error, state.data) {
            (Some(message), _) => HealthRecord {
                status: HealthStatus::Unhealthy,
                message: Some(message),
                timestamp: Utc::now(),
                version: None,
                uptime_seconds: None,
            },
            (None, Some(record)) => record,
            (None, None) => HealthRecord {
                status: HealthStatus::Unknown,
                message: Some(HEALTH_UNAVAILABLE_TEXT.to_string()),
                timestamp: Utc::now(),
                version: None,
                uptime_seconds: None,
            },
        };
        HealthView {
            is_healthy: record.status == HealthStatus::Healthy,
            record,
        }
    }

    /// Totals over the current snapshot, recomputed on every call.
    pub async fn document_stats(&self) -> DocumentStats {
        let documents = self.documents().await;
        let total_vectors = documents.iter().map(|d| d.vector_count).sum();
        let mut domain_stats = BTreeMap::new();
        for document in &documents {
            *domain_stats.entry(document.domain_key().to_string()).or_insert(0) += 1;
        }
        DocumentStats {
            total_documents: documents.len(),
            total_vectors,
            domain_stats,
            documents,
        }
    }

    pub async fn documents(&self) -> Vec<DocumentRecord> {
        self.documents_task.data().await.unwrap_or_default()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploads_in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn upload_error(&self) -> Option<String> {
        self.upload_task.error().await
    }

    pub async fn documents_loading(&self) -> bool {
        self.documents_task.is_loading().await
    }

    pub async fn documents_error(&self) -> Option<String> {
        self.documents_task.error().await
    }

    pub async fn health_loading(&self) -> bool {
        self.health_task.is_loading().await
    }

    pub async fn health_error(&self) -> Option<String> {
        self.health_task.error().await
    }

    /// The domain new uploads are filed under by default.
    pub async fn selected_domain(&self) -> &'static Domain {
        *self.selected_domain.lock().await
    }

    /// Changes the default upload domain. Unknown values leave it unchanged.
    pub async fn set_domain(&self, value: &str) -> Option<&'static Domain> {
        let domain = domains::find(value)?;
        *self.selected_domain.lock().await = domain;
        Some(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PortError;
    use crate::testing::{doc, ScriptedBackend};
    use bytes::Bytes;

    fn view() -> (Arc<ScriptedBackend>, AdminOrchestrator) {
        let backend = Arc::new(ScriptedBackend::new());
        let admin = AdminOrchestrator::new(backend.clone());
        (backend, admin)
    }

    fn pdf() -> UploadFile {
        UploadFile {
            file_name: "ipc.pdf".into(),
            bytes: Bytes::from_static(b"%PDF-1.7"),
        }
    }

    fn healthy() -> HealthRecord {
        HealthRecord {
            status: HealthStatus::Healthy,
            message: Some("vera-backend".into()),
            timestamp: Utc::now(),
            version: Some("1.0.0".into()),
            uptime_seconds: Some(42),
        }
    }

    #[tokio::test]
    async fn refresh_replaces_list_wholesale() {
        let (backend, admin) = view();
        backend.documents.ok(vec![doc("a_one", 1), doc("b_two", 2)]);
        backend.documents.ok(vec![doc("c_three", 3)]);

        admin.refresh_documents().await.unwrap();
        admin.refresh_documents().await.unwrap();

        assert_eq!(admin.documents().await, vec![doc("c_three", 3)]);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_list() {
        let (backend, admin) = view();
        backend.documents.ok(vec![doc("tax_act", 5)]);
        backend.documents.err(PortError::Backend("Failed to get indexed docs".into()));

        admin.refresh_documents().await.unwrap();
        let result = admin.refresh_documents().await;

        assert!(result.is_err());
        assert_eq!(admin.documents().await, vec![doc("tax_act", 5)]);
        assert_eq!(
            admin.documents_error().await.as_deref(),
            Some("Failed to get indexed docs")
        );
    }

    #[tokio::test]
    async fn document_stats_group_by_prefix() {
        let (backend, admin) = view();
        backend
            .documents
            .ok(vec![doc("criminal_x", 10), doc("tax_y", 5)]);
        admin.refresh_documents().await.unwrap();

        let stats = admin.document_stats().await;

        assert_eq!(stats.total_documents, 2);
        assert_eq!(stats.total_vectors, 15);
        assert_eq!(stats.domain_stats.get("criminal"), Some(&1));
        assert_eq!(stats.domain_stats.get("tax"), Some(&1));
        assert_eq!(stats.domain_stats.len(), 2);
    }

    #[tokio::test]
    async fn collections_without_prefix_count_as_general() {
        let (backend, admin) = view();
        backend
            .documents
            .ok(vec![doc("constitution", 3), doc("_orphan", 1), doc("it_act_2000", 2)]);
        admin.refresh_documents().await.unwrap();

        let stats = admin.document_stats().await;

        assert_eq!(stats.domain_stats.get("general"), Some(&2));
        assert_eq!(stats.domain_stats.get("it"), Some(&1));
    }

    #[tokio::test]
    async fn stats_follow_each_refresh() {
        let (backend, admin) = view();
        backend.documents.ok(vec![doc("tax_y", 5)]);
        backend.documents.ok(vec![]);

        admin.refresh_documents().await.unwrap();
        assert_eq!(admin.document_stats().await.total_documents, 1);
        admin.refresh_documents().await.unwrap();
        assert_eq!(admin.document_stats().await.total_documents, 0);
    }

    #[tokio::test]
    async fn successful_upload_refreshes_documents() {
        let (backend, admin) = view();
        backend.uploads.ok(UploadReceipt {
            message: Some("chunks_stored_successfully".into()),
            total_chunks: Some(12),
        });
        backend.documents.ok(vec![doc("criminal_ipc", 12)]);

        let receipt = admin.upload_file(pdf(), "criminal").await.unwrap();

        assert_eq!(receipt.total_chunks, Some(12));
        assert_eq!(admin.documents().await, vec![doc("criminal_ipc", 12)]);
        let uploads = backend.seen_uploads.lock().unwrap();
        assert_eq!(uploads[0].domain, "criminal");
        assert_eq!(uploads[0].file.file_name, "ipc.pdf");
        assert!(!admin.is_uploading());
    }

    #[tokio::test]
    async fn uploading_flag_covers_follow_up_refresh() {
        let (backend, admin) = view();
        backend.uploads.ok(UploadReceipt::default());
        let refresh_gate = backend.documents.gate();

        tokio::join!(admin.upload_file(pdf(), "general"), async {
            while !admin.documents_loading().await {
                tokio::task::yield_now().await;
            }
            assert!(admin.is_uploading());
            refresh_gate.send(Ok(vec![doc("general_notes", 2)])).unwrap();
        });

        assert!(!admin.is_uploading());
        assert_eq!(admin.documents().await, vec![doc("general_notes", 2)]);
    }

    #[tokio::test]
    async fn upload_success_survives_refresh_failure() {
        let (backend, admin) = view();
        backend.uploads.ok(UploadReceipt::default());
        backend.documents.err(PortError::Timeout);

        let result = admin.upload_file(pdf(), "general").await;

        assert!(result.is_ok());
        assert_eq!(admin.documents_error().await.as_deref(), Some("Request timed out"));
    }

    #[tokio::test]
    async fn failed_upload_leaves_documents_alone() {
        let (backend, admin) = view();
        backend.documents.ok(vec![doc("tax_y", 5)]);
        admin.refresh_documents().await.unwrap();
        backend
            .uploads
            .err(PortError::Backend("Failed to ingest document: bad pdf".into()));

        let result = admin.upload_file(pdf(), "tax").await;

        assert_eq!(result.unwrap_err().message, "Failed to ingest document: bad pdf");
        assert_eq!(admin.documents().await, vec![doc("tax_y", 5)]);
        assert_eq!(
            admin.upload_error().await.as_deref(),
            Some("Failed to ingest document: bad pdf")
        );
    }

    #[tokio::test]
    async fn health_starts_unknown() {
        let (_, admin) = view();

        let view = admin.health_status().await;

        assert_eq!(view.record.status, HealthStatus::Unknown);
        assert_eq!(view.record.message.as_deref(), Some(HEALTH_UNAVAILABLE_TEXT));
        assert!(!view.is_healthy);
    }

    #[tokio::test]
    async fn healthy_backend_reports_healthy() {
        let (backend, admin) = view();
        backend.health.ok(healthy());

        let view = admin.check_health().await;

        assert!(view.is_healthy);
        assert_eq!(view.record.version.as_deref(), Some("1.0.0"));
        assert_eq!(view.record.uptime_seconds, Some(42));
    }

    #[tokio::test]
    async fn failing_check_is_never_healthy() {
        let (backend, admin) = view();
        backend.health.err(PortError::Transport("connection refused".into()));
        backend.health.ok(healthy());
        backend.health.err(PortError::Timeout);

        let first = admin.check_health().await;
        assert_eq!(first.record.status, HealthStatus::Unhealthy);
        assert!(!first.is_healthy);

        assert!(admin.check_health().await.is_healthy);

        let after_recovery = admin.check_health().await;
        assert_eq!(after_recovery.record.status, HealthStatus::Unhealthy);
        assert_eq!(after_recovery.record.message.as_deref(), Some("Request timed out"));
        assert!(!after_recovery.is_healthy);
    }

    #[tokio::test]
    async fn unhealthy_status_from_backend_is_not_healthy() {
        let (backend, admin) = view();
        backend.health.ok(HealthRecord {
            status: HealthStatus::Unhealthy,
            ..healthy()
        });

        assert!(!admin.check_health().await.is_healthy);
    }

    #[tokio::test]
    async fn initialize_runs_once_and_fetches_both() {
        let (backend, admin) = view();
        backend.documents.ok(vec![doc("family_hma", 7)]);
        backend.health.ok(healthy());

        assert!(admin.initialize().await);
        assert!(!admin.initialize().await);

        assert_eq!(admin.documents().await.len(), 1);
        assert!(admin.health_status().await.is_healthy);
    }

    #[tokio::test]
    async fn initialize_does_not_order_its_calls() {
        let (backend, admin) = view();
        let documents_gate = backend.documents.gate();
        backend.health.ok(healthy());

        tokio::join!(admin.initialize(), async {
            while !admin.health_status().await.is_healthy {
                tokio::task::yield_now().await;
            }
            assert!(admin.documents_loading().await);
            documents_gate.send(Ok(vec![doc("labor_ida", 1)])).unwrap();
        });

        assert_eq!(admin.documents().await.len(), 1);
    }

    #[tokio::test]
    async fn upload_domain_selection_is_validated() {
        let (_, admin) = view();

        assert_eq!(admin.selected_domain().await.value, "general");
        assert!(admin.set_domain("maritime").await.is_none());
        assert_eq!(admin.set_domain("property").await.map(|d| d.value), Some("property"));
        assert_eq!(admin.selected_domain().await.value, "property");
    }
}
