//! In-memory backend used by the unit tests of the orchestrators.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::domain::{
    DocumentRecord, HealthRecord, QueryRequest, QueryResult, UploadReceipt, UploadRequest,
};
use crate::ports::{LegalBackendService, PortError, PortResult};

enum Reply<T> {
    Ready(PortResult<T>),
    Gated(oneshot::Receiver<PortResult<T>>),
}

/// A queue of canned replies, consumed one per call.
pub(crate) struct Script<T> {
    replies: Mutex<VecDeque<Reply<T>>>,
}

impl<T> Script<T> {
    fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
        }
    }

    pub(crate) fn ok(&self, value: T) {
        self.replies.lock().unwrap().push_back(Reply::Ready(Ok(value)));
    }

    pub(crate) fn err(&self, error: PortError) {
        self.replies.lock().unwrap().push_back(Reply::Ready(Err(error)));
    }

    /// Queues a reply that only resolves once the returned sender fires.
    pub(crate) fn gate(&self) -> oneshot::Sender<PortResult<T>> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(Reply::Gated(rx));
        tx
    }

    async fn next(&self) -> PortResult<T> {
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(PortError::Unexpected("gate dropped".into()))),
            None => Err(PortError::Unexpected("no scripted reply".into())),
        }
    }
}

pub(crate) struct ScriptedBackend {
    pub(crate) queries: Script<QueryResult>,
    pub(crate) health: Script<HealthRecord>,
    pub(crate) uploads: Script<UploadReceipt>,
    pub(crate) documents: Script<Vec<DocumentRecord>>,
    pub(crate) seen_queries: Mutex<Vec<QueryRequest>>,
    pub(crate) seen_uploads: Mutex<Vec<UploadRequest>>,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self {
            queries: Script::new(),
            health: Script::new(),
            uploads: Script::new(),
            documents: Script::new(),
            seen_queries: Mutex::new(Vec::new()),
            seen_uploads: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LegalBackendService for ScriptedBackend {
    async fn query(&self, request: &QueryRequest) -> PortResult<QueryResult> {
        self.seen_queries.lock().unwrap().push(request.clone());
        self.queries.next().await
    }

    async fn health(&self) -> PortResult<HealthRecord> {
        self.health.next().await
    }

    async fn upload_document(&self, request: UploadRequest) -> PortResult<UploadReceipt> {
        self.seen_uploads.lock().unwrap().push(request);
        self.uploads.next().await
    }

    async fn list_documents(&self) -> PortResult<Vec<DocumentRecord>> {
        self.documents.next().await
    }
}

pub(crate) fn answer(text: &str) -> QueryResult {
    QueryResult {
        answer: Some(text.to_string()),
        ..Default::default()
    }
}

pub(crate) fn doc(collection: &str, vectors: u64) -> DocumentRecord {
    DocumentRecord {
        collection: collection.to_string(),
        vector_count: vectors,
        indexed_at: None,
    }
}
