pub mod admin;
pub mod conversation;
pub mod domain;
pub mod domains;
pub mod ports;
pub mod task;

#[cfg(test)]
mod testing;

pub use admin::{AdminOrchestrator, DocumentStats, HealthView};
pub use conversation::{ChatStats, ConversationOrchestrator, UnknownDomain};
pub use domain::{
    Citation, DocumentRecord, HealthRecord, HealthStatus, Message, QueryRequest, QueryResult,
    ResponseMetadata, Role, UploadFile, UploadReceipt, UploadRequest,
};
pub use domains::Domain;
pub use ports::{LegalBackendService, PortError, PortResult};
pub use task::{AsyncTask, TaskError, TaskState};
