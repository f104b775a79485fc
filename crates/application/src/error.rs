//! Application error types

use thiserror::Error;

use crate::ports::StorageError;

/// Errors raised by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A credential store operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The logout redirect URL could not be parsed.
    #[error("invalid redirect URL: {0}")]
    InvalidRedirect(String),
}
