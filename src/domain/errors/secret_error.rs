//! Credential storage error types.

use thiserror::Error;

/// Credential storage error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum SecretError {
    #[error("failed to access credential storage: {0}")]
    AccessFailed(String),

    #[error("failed to retrieve credential: {0}")]
    RetrievalFailed(String),

    #[error("failed to store credential: {0}")]
    StorageFailed(String),

    #[error("failed to delete credential: {0}")]
    DeletionFailed(String),

    #[error("credential storage not available: {0}")]
    NotAvailable(String),

    #[error("stored credential is unreadable: {0}")]
    Corrupted(String),
}
