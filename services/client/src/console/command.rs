//! services/client/src/console/command.rs
//!
//! The commands a user can type at the `vera` prompt.
//!
//! Any line that does not start with `/` is a question for the assistant.

use std::path::PathBuf;

/// One parsed line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send the text to the assistant.
    Ask(String),
    /// Show the chat's current domain.
    ShowDomain,
    /// Switch the chat to another legal domain.
    SetDomain(String),
    ListDomains,
    /// Empty the transcript.
    Clear,
    Stats,
    /// Print the last messages; uses the configured window when no count is given.
    History(Option<usize>),
    /// Upload a file, into the admin view's selected domain unless one is given.
    Upload { path: PathBuf, domain: Option<String> },
    /// Show or change the admin view's default upload domain.
    UploadDomain(Option<String>),
    /// Show the indexed collections and their totals.
    Documents,
    Refresh,
    Health,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: /{0} (try /help)")]
    Unknown(String),
    #[error("/{0} needs an argument: {1}")]
    MissingArgument(&'static str, &'static str),
    #[error("Invalid argument for /{0}: {1}")]
    InvalidArgument(&'static str, String),
}

pub const HELP_TEXT: &str = "\
Type a question to ask the assistant, or one of:
  /domain [value]         show or change the chat's legal domain
  /domains                list the legal domains
  /history [count]        show the most recent messages
  /stats                  message counts for this conversation
  /clear                  clear the conversation
  /upload <path> [domain] upload a document for indexing
  /upload-domain [value]  show or change the default upload domain
  /docs                   list indexed documents
  /refresh                reload the document list
  /health                 check the backend
  /help                   show this help
  /quit                   exit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Ok(Command::Ask(trimmed.to_string()));
        };

        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or_default();
        let command = match name {
            "domain" => match words.next() {
                Some(value) => Command::SetDomain(value.to_string()),
                None => Command::ShowDomain,
            },
            "domains" => Command::ListDomains,
            "clear" => Command::Clear,
            "stats" => Command::Stats,
            "history" => match words.next() {
                Some(raw) => Command::History(Some(
                    raw.parse()
                        .map_err(|_| CommandError::InvalidArgument("history", raw.to_string()))?,
                )),
                None => Command::History(None),
            },
            "upload" => {
                let path = words
                    .next()
                    .ok_or(CommandError::MissingArgument("upload", "<path> [domain]"))?;
                Command::Upload {
                    path: PathBuf::from(path),
                    domain: words.next().map(str::to_string),
                }
            }
            "upload-domain" => Command::UploadDomain(words.next().map(str::to_string)),
            "docs" | "documents" => Command::Documents,
            "refresh" => Command::Refresh,
            "health" => Command::Health,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}
