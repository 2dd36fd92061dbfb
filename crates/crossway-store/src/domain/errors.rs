//! Error types for the store subsystem.
//!
//! Only backend failures are errors here. Gas exhaustion unwinds with a
//! typed panic payload (see [`crate::domain::gas::OutOfGas`]) and iterator
//! misuse aborts outright; neither is representable as a `StoreError`.

use thiserror::Error;

/// All errors a store operation can report.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The underlying storage backend failed.
    #[error("storage backend failure: {message}")]
    Backend {
        /// Backend-supplied description of the failure.
        message: String,
    },
}

impl StoreError {
    /// Wrap a backend failure description.
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }
}
