//! crates/legal_assistant_core/src/ports.rs
//!
//! Defines the service contract for the legal assistant backend.
//! The orchestrators only talk to this trait, so the core stays independent
//! of the HTTP client that implements it.

use async_trait::async_trait;

use crate::domain::{
    DocumentRecord, HealthRecord, QueryRequest, QueryResult, UploadReceipt, UploadRequest,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// The `Display` output is what ends up in an `AsyncTask` error, so variants
/// carrying a message render it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// The backend answered, but reported a failure.
    #[error("{0}")]
    Backend(String),
    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
    #[error("Request timed out")]
    Timeout,
    /// The response body could not be understood.
    #[error("Invalid response from server: {0}")]
    Decode(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait LegalBackendService: Send + Sync {
    /// Asks the assistant a question within a legal domain.
    async fn query(&self, request: &QueryRequest) -> PortResult<QueryResult>;

    /// Probes the backend's health endpoint.
    async fn health(&self) -> PortResult<HealthRecord>;

    /// Sends a document for ingestion into the given domain.
    async fn upload_document(&self, request: UploadRequest) -> PortResult<UploadReceipt>;

    /// Lists every indexed collection.
    async fn list_documents(&self) -> PortResult<Vec<DocumentRecord>>;
}
