//! services/client/src/adapters/protocol.rs
//!
//! JSON bodies exchanged with the VERA backend, and their conversion into
//! the core domain types.

use chrono::{DateTime, Utc};
use legal_assistant_core::domain::{
    Citation, DocumentRecord, HealthRecord, HealthStatus, QueryRequest, QueryResult,
    UploadReceipt,
};
use legal_assistant_core::ports::PortError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const SERVICE_STATUS_TEXT: &str = "Service status";
const REPORTED_ERROR_TEXT: &str = "The server reported an error";

/// A payload that may carry `status: "error"` despite a 2xx response.
fn reported_error(status: Option<&str>, message: Option<&str>) -> Option<PortError> {
    match status {
        Some(s) if s.eq_ignore_ascii_case("error") => Some(PortError::Backend(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(REPORTED_ERROR_TEXT)
                .to_string(),
        )),
        _ => None,
    }
}

//=========================================================================================
// Query
//=========================================================================================

#[derive(Serialize, Debug)]
pub struct QueryBody<'a> {
    pub query: &'a str,
    pub domain: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'a str>,
}

impl<'a> From<&'a QueryRequest> for QueryBody<'a> {
    fn from(request: &'a QueryRequest) -> Self {
        Self {
            query: &request.query,
            domain: &request.domain,
            language: request.language.as_deref(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CitationBody {
    #[serde(default)]
    act: String,
    section: Option<String>,
    source_file: Option<String>,
    page: Option<u32>,
}

impl CitationBody {
    fn to_domain(self) -> Citation {
        Citation {
            act: self.act,
            section: self.section,
            source_file: self.source_file,
            page: self.page,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct QueryResponseBody {
    answer: Option<String>,
    #[serde(default)]
    citations: Vec<CitationBody>,
    retrieved_chunks: Option<u32>,
    generation_model: Option<String>,
    embedding_model: Option<String>,
    vector_db: Option<String>,
    status: Option<String>,
    message: Option<String>,
}

impl QueryResponseBody {
    pub fn to_domain(self) -> Result<QueryResult, PortError> {
        if let Some(e) = reported_error(self.status.as_deref(), self.message.as_deref()) {
            return Err(e);
        }
        Ok(QueryResult {
            answer: self.answer,
            citations: self.citations.into_iter().map(CitationBody::to_domain).collect(),
            retrieved_chunks: self.retrieved_chunks,
            generation_model: self.generation_model,
            embedding_model: self.embedding_model,
            vector_store: self.vector_db,
        })
    }
}

//=========================================================================================
// Health
//=========================================================================================

#[derive(Deserialize, Debug)]
pub struct HealthBody {
    status: String,
    service: Option<String>,
    version: Option<String>,
    uptime_seconds: Option<u64>,
}

impl HealthBody {
    pub fn to_domain(self) -> HealthRecord {
        let status = match self.status.to_ascii_lowercase().as_str() {
            "healthy" => HealthStatus::Healthy,
            "unhealthy" => HealthStatus::Unhealthy,
            _ => HealthStatus::Unknown,
        };
        HealthRecord {
            status,
            message: Some(self.service.unwrap_or_else(|| SERVICE_STATUS_TEXT.to_string())),
            timestamp: Utc::now(),
            version: self.version,
            uptime_seconds: self.uptime_seconds,
        }
    }
}

//=========================================================================================
// Documents
//=========================================================================================

#[derive(Deserialize, Debug)]
pub struct DocumentBody {
    collection: String,
    #[serde(default)]
    vectors: u64,
    indexed_at: Option<String>,
}

impl DocumentBody {
    fn to_domain(self) -> DocumentRecord {
        let indexed_at = self.indexed_at.and_then(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| debug!("Ignoring unparseable indexed_at '{}': {}", raw, e))
                .ok()
        });
        DocumentRecord {
            collection: self.collection,
            vector_count: self.vectors,
            indexed_at,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct DocumentsBody {
    #[serde(default)]
    documents: Vec<DocumentBody>,
    status: Option<String>,
    message: Option<String>,
}

impl DocumentsBody {
    pub fn to_domain(self) -> Result<Vec<DocumentRecord>, PortError> {
        if let Some(e) = reported_error(self.status.as_deref(), self.message.as_deref()) {
            return Err(e);
        }
        Ok(self.documents.into_iter().map(DocumentBody::to_domain).collect())
    }
}

#[derive(Deserialize, Debug)]
pub struct UploadBody {
    status: Option<String>,
    message: Option<String>,
    total_chunks: Option<u64>,
}

impl UploadBody {
    pub fn to_domain(self) -> Result<UploadReceipt, PortError> {
        if let Some(e) = reported_error(self.status.as_deref(), self.message.as_deref()) {
            return Err(e);
        }
        Ok(UploadReceipt {
            message: self.message,
            total_chunks: self.total_chunks,
        })
    }
}

//=========================================================================================
// Errors
//=========================================================================================

/// Picks the human-readable message out of an error response body.
///
/// Looks at `message`, then `detail` (a string, or a list of `{msg}` objects),
/// and returns `None` when neither is usable.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    if let Some(message) = value.get("message").and_then(Value::as_str) {
        if !message.trim().is_empty() {
            return Some(message.to_string());
        }
    }
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}
