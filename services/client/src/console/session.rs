//! services/client/src/console/session.rs
//!
//! Maps parsed commands onto the chat and admin orchestrators of one
//! terminal session.

use std::sync::Arc;

use bytes::Bytes;
use legal_assistant_core::domain::UploadFile;
use legal_assistant_core::ports::LegalBackendService;
use legal_assistant_core::{AdminOrchestrator, ConversationOrchestrator};
use tracing::info;

use super::command::{Command, HELP_TEXT};
use super::render;
use crate::config::Config;
use crate::error::ClientError;

/// What the prompt loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text (possibly empty) and read the next line.
    Continue(String),
    Quit,
}

/// One user's chat and admin views, created together and dropped together.
pub struct ConsoleSession {
    chat: ConversationOrchestrator,
    admin: AdminOrchestrator,
    history_window: usize,
}

impl ConsoleSession {
    pub fn new(backend: Arc<dyn LegalBackendService>, config: &Config) -> Self {
        Self {
            chat: ConversationOrchestrator::with_language(
                backend.clone(),
                config.query_language.clone(),
            ),
            admin: AdminOrchestrator::new(backend),
            history_window: config.history_window,
        }
    }

    pub fn chat(&self) -> &ConversationOrchestrator {
        &self.chat
    }

    pub fn admin(&self) -> &AdminOrchestrator {
        &self.admin
    }

    /// Loads the admin view's documents and health status.
    pub async fn start(&self) -> String {
        self.admin.initialize().await;
        render::health(&self.admin.health_status().await)
    }

    pub async fn handle(&self, command: Command) -> Result<Outcome, ClientError> {
        let text = match command {
            Command::Ask(text) => match self.chat.send_message(&text).await {
                Some(reply) => render::message(&reply),
                None => String::new(),
            },
            Command::ShowDomain => {
                let domain = self.chat.selected_domain().await;
                format!("Current domain: {} ({})", domain.label, domain.value)
            }
            Command::SetDomain(value) => match self.chat.set_domain(&value).await {
                Ok(domain) => format!("Domain set to {}.", domain.label),
                Err(e) => format!("{}. Use /domains to see the options.", e),
            },
            Command::ListDomains => render::domain_list(self.chat.selected_domain().await),
            Command::Clear => {
                self.chat.clear_conversation().await;
                "Conversation cleared.".to_string()
            }
            Command::Stats => render::chat_stats(&self.chat.stats().await),
            Command::History(count) => {
                let count = count.unwrap_or(self.history_window);
                self.chat
                    .recent_messages(count)
                    .await
                    .iter()
                    .map(render::message)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Command::Upload { path, domain } => {
                let bytes = tokio::fs::read(&path).await?;
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .ok_or_else(|| {
                        ClientError::Internal(format!("{} is not a file", path.display()))
                    })?;
                let domain = match domain {
                    Some(domain) => domain,
                    None => self.admin.selected_domain().await.value.to_string(),
                };
                let size = bytes.len() as u64;
                let file = UploadFile {
                    file_name,
                    bytes: Bytes::from(bytes),
                };
                match self.admin.upload_file(file, &domain).await {
                    Ok(receipt) => {
                        info!(path = %path.display(), "Upload accepted.");
                        let mut out = format!(
                            "Uploaded {} ({}) to {}.",
                            path.display(),
                            render::format_file_size(size),
                            domain
                        );
                        if let Some(chunks) = receipt.total_chunks {
                            out.push_str(&format!(" {} chunks stored.", chunks));
                        }
                        out
                    }
                    Err(e) => format!("Upload failed: {}", e),
                }
            }
            Command::UploadDomain(None) => {
                let domain = self.admin.selected_domain().await;
                format!("Upload domain: {} ({})", domain.label, domain.value)
            }
            Command::UploadDomain(Some(value)) => match self.admin.set_domain(&value).await {
                Some(domain) => format!("Upload domain set to {}.", domain.label),
                None => format!(
                    "Unknown legal domain: {}. Use /domains to see the options.",
                    value
                ),
            },
            Command::Documents => render::document_stats(&self.admin.document_stats().await),
            Command::Refresh => match self.admin.refresh_documents().await {
                Ok(_) => render::document_stats(&self.admin.document_stats().await),
                Err(e) => format!("Could not refresh documents: {}", e),
            },
            Command::Health => render::health(&self.admin.check_health().await),
            Command::Help => HELP_TEXT.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Continue(text))
    }
}
