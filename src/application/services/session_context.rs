//! Injectable holder of the session credential.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use crate::domain::entities::AuthToken;
use crate::domain::errors::SecretError;
use crate::domain::ports::TokenStoragePort;
use crate::domain::session::{SessionEvent, SessionState};

/// Owns the single credential slot.
///
/// Every access goes through an async mutex so a read, write or clear never
/// interleaves with another. Changes are published on a watch channel.
pub struct SessionContext {
    storage: Arc<dyn TokenStoragePort>,
    slot: Mutex<()>,
    events: watch::Sender<SessionEvent>,
}

impl SessionContext {
    /// Creates a context over the given storage.
    #[must_use]
    pub fn new(storage: Arc<dyn TokenStoragePort>) -> Self {
        let (events, _) = watch::channel(SessionEvent::Idle);
        Self {
            storage,
            slot: Mutex::new(()),
            events,
        }
    }

    /// Returns the stored credential. Storage failures read as absent.
    pub async fn token(&self) -> Option<AuthToken> {
        let _guard = self.slot.lock().await;

        match self.storage.get_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to retrieve the token");
                None
            }
        }
    }

    /// Current session state derived from credential presence.
    pub async fn state(&self) -> SessionState {
        if self.token().await.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// Persists the credential, replacing any previous one.
    ///
    /// # Errors
    /// Returns the storage error; the slot is left unchanged.
    pub async fn store(&self, token: &AuthToken) -> Result<(), SecretError> {
        let _guard = self.slot.lock().await;

        self.storage.store_token(token).await.map_err(|e| {
            warn!(error = %e, "Failed to store the token");
            e
        })?;

        info!(token = %token, "Session credential stored");
        self.events.send_replace(SessionEvent::SignedIn);
        Ok(())
    }

    /// Removes the credential. Removing an absent credential succeeds.
    ///
    /// # Errors
    /// Returns the storage error if deletion fails.
    pub async fn clear(&self) -> Result<(), SecretError> {
        let _guard = self.slot.lock().await;

        self.storage.delete_token().await.map_err(|e| {
            warn!(error = %e, "Failed to remove the token");
            e
        })?;

        debug!("Session credential removed");
        self.events.send_replace(SessionEvent::SignedOut);
        Ok(())
    }

    /// Drops a credential the backend rejected and publishes
    /// [`SessionEvent::Expired`].
    ///
    /// Only `rejected` is removed. A credential stored after the rejected
    /// request was sent is kept and nothing is published.
    pub async fn expire(&self, rejected: &AuthToken) {
        let _guard = self.slot.lock().await;

        match self.storage.get_token().await {
            Ok(Some(current)) if current != *rejected => {
                debug!("Credential replaced since the rejected request, keeping it");
                return;
            }
            Ok(None) => {
                debug!("Rejected credential already removed");
                return;
            }
            Ok(Some(_)) => {}
            Err(e) => warn!(error = %e, "Failed to read credential before expiring it"),
        }

        if let Err(e) = self.storage.delete_token().await {
            warn!(error = %e, "Failed to remove rejected token");
        }

        info!("Session credential rejected by backend");
        self.events.send_replace(SessionEvent::Expired);
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Most recent session change.
    #[must_use]
    pub fn last_event(&self) -> SessionEvent {
        *self.events.borrow()
    }
}
