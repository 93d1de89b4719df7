//! crates/legal_assistant_core/src/conversation.rs
//!
//! Owns one chat session: the ordered transcript, the selected legal domain
//! and the task that carries queries to the backend.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::{Message, QueryRequest, QueryResult, Role};
use crate::domains::{self, Domain};
use crate::ports::LegalBackendService;
use crate::task::AsyncTask;

/// Language sent with every query unless configured otherwise.
pub const DEFAULT_LANGUAGE: &str = "en";

/// How many messages `recent_messages` returns when asked for the default window.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Message counts derived from the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatStats {
    pub user_messages: usize,
    pub assistant_messages: usize,
    pub total_messages: usize,
    pub has_messages: bool,
}

/// Returned by `set_domain` when the value is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown legal domain: {0}")]
pub struct UnknownDomain(pub String);

pub struct ConversationOrchestrator {
    backend: Arc<dyn LegalBackendService>,
    language: String,
    messages: Mutex<Vec<Message>>,
    selected_domain: Mutex<&'static Domain>,
    query_task: AsyncTask<QueryResult>,
}

impl ConversationOrchestrator {
    /// Starts an empty session on the catalog's default domain.
    pub fn new(backend: Arc<dyn LegalBackendService>) -> Self {
        Self::with_language(backend, DEFAULT_LANGUAGE)
    }

    pub fn with_language(
        backend: Arc<dyn LegalBackendService>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            language: language.into(),
            messages: Mutex::new(Vec::new()),
            selected_domain: Mutex::new(domains::default_domain()),
            query_task: AsyncTask::new("query"),
        }
    }

    /// Sends `text` to the assistant.
    ///
    /// The user message is appended before the backend is called and is kept
    /// whatever the outcome. Returns the assistant reply that was appended, or
    /// `None` when the input was blank and nothing happened.
    ///
    /// Overlapping calls each append their user message immediately; their
    /// replies are appended in the order the backend resolves them.
    pub async fn send_message(&self, text: &str) -> Option<Message> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.messages.lock().await.push(Message::user(text));

        let request = QueryRequest {
            query: text.to_string(),
            domain: self.selected_domain.lock().await.value.to_string(),
            language: Some(self.language.clone()),
        };
        info!(domain = %request.domain, "Sending query to the assistant.");

        let backend = self.backend.clone();
        let reply = match self
            .query_task
            .run(move || async move { backend.query(&request).await })
            .await
        {
            Ok(result) => Message::from_query_result(result),
            Err(e) => {
                warn!("Query failed: {}", e);
                Message::query_failed()
            }
        };

        self.messages.lock().await.push(reply.clone());
        Some(reply)
    }

    /// Drops the whole transcript. The domain and task state are left alone.
    pub async fn clear_conversation(&self) {
        self.messages.lock().await.clear();
        info!("Conversation cleared.");
    }

    /// Switches the domain used by subsequent queries.
    ///
    /// Values outside the catalog are refused and the current selection stays.
    pub async fn set_domain(&self, value: &str) -> Result<&'static Domain, UnknownDomain> {
        let domain = domains::find(value).ok_or_else(|| UnknownDomain(value.to_string()))?;
        *self.selected_domain.lock().await = domain;
        Ok(domain)
    }

    pub async fn selected_domain(&self) -> &'static Domain {
        *self.selected_domain.lock().await
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.messages.lock().await.clone()
    }

    /// The last `count` messages, oldest first.
    pub async fn recent_messages(&self, count: usize) -> Vec<Message> {
        let messages = self.messages.lock().await;
        let start = messages.len().saturating_sub(count);
        messages[start..].to_vec()
    }

    pub async fn stats(&self) -> ChatStats {
        let messages = self.messages.lock().await;
        let user_messages = messages.iter().filter(|m| m.role == Role::User).count();
        let assistant_messages = messages.iter().filter(|m| m.role == Role::Assistant).count();
        ChatStats {
            user_messages,
            assistant_messages,
            total_messages: messages.len(),
            has_messages: !messages.is_empty(),
        }
    }

    pub async fn is_loading(&self) -> bool {
        self.query_task.is_loading().await
    }

    pub async fn last_error(&self) -> Option<String> {
        self.query_task.error().await
    }
}
