//! Cancellation scopes tied to screen lifetime.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::domain::errors::ApiError;

/// Cloneable handle that abandons in-flight work once cancelled.
#[derive(Clone, Debug)]
pub struct CancellationScope {
    cancelled: Arc<watch::Sender<bool>>,
}

impl CancellationScope {
    /// Creates a live scope.
    #[must_use]
    pub fn new() -> Self {
        let (cancelled, _) = watch::channel(false);
        Self {
            cancelled: Arc::new(cancelled),
        }
    }

    /// Cancels the scope. Idempotent.
    pub fn cancel(&self) {
        if !self.cancelled.send_replace(true) {
            debug!("Cancellation scope cancelled");
        }
    }

    /// Whether the scope was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Resolves once the scope is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.cancelled.subscribe();
        // The sender lives in `self`, so this only returns on cancellation.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Runs `work` unless the scope is cancelled first, in which case the
    /// future is dropped and [`ApiError::Cancelled`] returned.
    ///
    /// # Errors
    /// Returns the error from `work`, or `Cancelled`.
    pub async fn run<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        tokio::select! {
            biased;
            () = self.cancelled() => Err(ApiError::Cancelled),
            result = work => result,
        }
    }
}

impl Default for CancellationScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns a scope for as long as a screen is mounted and cancels it on drop.
#[derive(Debug, Default)]
pub struct ScreenLifetime {
    scope: CancellationScope,
}

impl ScreenLifetime {
    /// Starts a new lifetime.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for requests bound to this lifetime.
    #[must_use]
    pub fn scope(&self) -> CancellationScope {
        self.scope.clone()
    }
}

impl Drop for ScreenLifetime {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
