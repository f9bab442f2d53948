//! Execution context for background work
//!
//! Store mutations and playlist selection never run on the caller that
//! drives the UI. They are handed to a [`Dispatcher`], which is a tokio
//! runtime handle in production and an inline executor in tests.

use std::future::Future;

use tokio::runtime::Handle;

/// Failure to get a result back from the execution context
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("background task was cancelled")]
    Cancelled,
    #[error("background task panicked")]
    Panicked,
}

/// Where suspending operations execute
#[derive(Debug, Clone)]
pub enum Dispatcher {
    /// Spawn onto a runtime and await the join handle
    Runtime(Handle),
    /// Poll the future on the calling task
    Inline,
}

impl Dispatcher {
    /// Dispatcher bound to the runtime of the calling task.
    /// Falls back to inline execution outside a runtime.
    pub fn background() -> Self {
        match Handle::try_current() {
            Ok(handle) => Self::Runtime(handle),
            Err(_) => {
                tracing::warn!("No tokio runtime available, dispatching inline");
                Self::Inline
            }
        }
    }

    pub fn from_handle(handle: Handle) -> Self {
        Self::Runtime(handle)
    }

    pub fn inline() -> Self {
        Self::Inline
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline)
    }

    /// Run a future on this context and wait for its output
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, DispatchError>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        match self {
            Self::Inline => Ok(fut.await),
            Self::Runtime(handle) => handle.spawn(fut).await.map_err(|e| {
                if e.is_panic() {
                    tracing::error!("Dispatched task panicked");
                    DispatchError::Panicked
                } else {
                    DispatchError::Cancelled
                }
            }),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::background()
    }
}
