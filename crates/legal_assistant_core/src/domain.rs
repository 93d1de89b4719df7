//! crates/legal_assistant_core/src/domain.rs
//!
//! Defines the pure, core data structures for the client.
//! These structs are independent of any transport or serialization format.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Shown when the backend answered but produced no text.
pub const NO_ANSWER_TEXT: &str =
    "I apologize, but I could not generate a response. Please try again.";

/// Shown when the query call failed for any reason.
pub const QUERY_FAILED_TEXT: &str = "I apologize, but I encountered an error while processing \
     your request. Please check your connection and try again.";

/// Placeholder for model names the backend did not report.
pub const UNKNOWN_MODEL: &str = "unknown";

//=========================================================================================
// Conversation
//=========================================================================================

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A reference into the legal corpus backing an assistant answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub act: String,
    pub section: Option<String>,
    pub source_file: Option<String>,
    pub page: Option<u32>,
}

/// Retrieval details reported alongside an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    pub retrieved_chunks: u32,
    pub generation_model: String,
    pub embedding_model: String,
    pub vector_store: String,
}

/// One entry of a chat transcript. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub citations: Option<Vec<Citation>>,
    pub metadata: Option<ResponseMetadata>,
}

impl Message {
    /// Creates the optimistic entry for text the user just sent.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            citations: None,
            metadata: None,
        }
    }

    /// Builds the assistant reply for a completed query.
    pub fn from_query_result(result: QueryResult) -> Self {
        let content = match result.answer {
            Some(answer) if !answer.trim().is_empty() => answer,
            _ => NO_ANSWER_TEXT.to_string(),
        };
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content,
            timestamp: Utc::now(),
            citations: Some(result.citations),
            metadata: Some(ResponseMetadata {
                retrieved_chunks: result.retrieved_chunks.unwrap_or(0),
                generation_model: result
                    .generation_model
                    .unwrap_or_else(|| UNKNOWN_MODEL.to_string()),
                embedding_model: result
                    .embedding_model
                    .unwrap_or_else(|| UNKNOWN_MODEL.to_string()),
                vector_store: result
                    .vector_store
                    .unwrap_or_else(|| UNKNOWN_MODEL.to_string()),
            }),
        }
    }

    /// Builds the apology appended when a query fails.
    pub fn query_failed() -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content: QUERY_FAILED_TEXT.to_string(),
            timestamp: Utc::now(),
            citations: None,
            metadata: None,
        }
    }
}

/// A question sent to the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub query: String,
    pub domain: String,
    pub language: Option<String>,
}

/// What the backend returned for a question. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    pub answer: Option<String>,
    pub citations: Vec<Citation>,
    pub retrieved_chunks: Option<u32>,
    pub generation_model: Option<String>,
    pub embedding_model: Option<String>,
    pub vector_store: Option<String>,
}

//=========================================================================================
// Administration
//=========================================================================================

/// One indexed corpus (vector collection) on the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub collection: String,
    pub vector_count: u64,
    pub indexed_at: Option<DateTime<Utc>>,
}

impl DocumentRecord {
    /// The legal domain a collection belongs to, taken from the text before
    /// the first `_` in its name.
    pub fn domain_key(&self) -> &str {
        match self.collection.split_once('_') {
            Some((prefix, _)) if !prefix.is_empty() => prefix,
            _ => "general",
        }
    }
}

/// A file selected for ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// A document upload routed to a legal domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: UploadFile,
    pub domain: String,
}

/// The backend's acknowledgement of an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReceipt {
    pub message: Option<String>,
    pub total_chunks: Option<u64>,
}

/// Coarse backend status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Unknown,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy => "unhealthy",
            HealthStatus::Unknown => "unknown",
        }
    }
}

/// The result of one health probe, replaced wholesale on every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthRecord {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub version: Option<String>,
    pub uptime_seconds: Option<u64>,
}
