//! crates/legal_assistant_core/src/task.rs
//!
//! A lifecycle wrapper around one asynchronous backend call.
//!
//! `AsyncTask` records the last result, a loading flag and the last error so
//! callers never have to juggle those flags themselves. Runs on the same
//! instance are not serialized: when two calls overlap, whichever resolves
//! last writes the final state, and a completion arriving after `reset()`
//! still lands.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::ports::PortResult;

/// Used when a failure carries no description of its own.
pub const UNKNOWN_ERROR_TEXT: &str = "An unknown error occurred";

/// The message of a failed `AsyncTask::run`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TaskError {
    pub message: String,
}

/// Observable state of an `AsyncTask`.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for TaskState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Tracks the lifecycle of calls that produce a `T`.
///
/// Cloning yields a handle onto the same state.
pub struct AsyncTask<T> {
    name: &'static str,
    state: Arc<Mutex<TaskState<T>>>,
}

impl<T> Clone for AsyncTask<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            state: self.state.clone(),
        }
    }
}

impl<T: Clone + Send> AsyncTask<T> {
    /// Creates an idle task. `name` only shows up in logs.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Arc::new(Mutex::new(TaskState::default())),
        }
    }

    /// Runs `operation` and folds its outcome into the task state.
    ///
    /// The loading flag is raised before the operation is first polled. On
    /// failure the previous `data` is kept.
    pub async fn run<F, Fut>(&self, operation: F) -> Result<T, TaskError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = PortResult<T>>,
    {
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
        }
        debug!(task = self.name, "Task started.");

        let outcome = operation().await;

        let mut state = self.state.lock().await;
        match outcome {
            Ok(data) => {
                state.data = Some(data.clone());
                state.loading = false;
                state.error = None;
                debug!(task = self.name, "Task succeeded.");
                Ok(data)
            }
            Err(e) => {
                let message = match e.to_string() {
                    m if m.trim().is_empty() => UNKNOWN_ERROR_TEXT.to_string(),
                    m => m,
                };
                state.loading = false;
                state.error = Some(message.clone());
                debug!(task = self.name, error = %message, "Task failed.");
                Err(TaskError { message })
            }
        }
    }

    /// Returns the task to idle. Does not cancel a call already in flight.
    pub async fn reset(&self) {
        *self.state.lock().await = TaskState::default();
    }

    pub async fn snapshot(&self) -> TaskState<T> {
        self.state.lock().await.clone()
    }

    pub async fn data(&self) -> Option<T> {
        self.state.lock().await.data.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }
}
