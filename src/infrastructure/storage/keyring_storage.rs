//! Session credential in the operating system's secure store.
//!
//! Built without the `keyring` feature, the adapter holds nothing and
//! refuses to store, so `--token-backend file` or `memory` must be used.

use async_trait::async_trait;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::{CREDENTIAL_KEY, stored_credential};
use crate::domain::entities::AuthToken;
use crate::domain::errors::SecretError;
use crate::domain::ports::TokenStoragePort;

/// OS keyring adapter. The credential lives under service `airsense`,
/// account `access_token`.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringTokenStorage;

impl KeyringTokenStorage {
    /// Creates the adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(feature = "keyring")]
mod secure_store {
    use keyring::{Entry, Error};
    use tracing::{debug, warn};
    use zeroize::Zeroizing;

    use super::CREDENTIAL_KEY;
    use crate::domain::errors::SecretError;
    use crate::infrastructure::config::app_config::APP_NAME;

    /// Keyring calls block on D-Bus or the platform API, so they run on the
    /// blocking pool.
    async fn blocking<T, F>(op: F) -> Result<T, SecretError>
    where
        F: FnOnce(Entry) -> Result<T, SecretError> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(APP_NAME, CREDENTIAL_KEY).map_err(access_error)?;
            op(entry)
        })
        .await
        .map_err(|e| SecretError::AccessFailed(format!("keyring task failed: {e}")))?
    }

    fn access_error(e: Error) -> SecretError {
        match e {
            Error::NoStorageAccess(_) | Error::PlatformFailure(_) => {
                SecretError::NotAvailable(e.to_string())
            }
            other => SecretError::AccessFailed(other.to_string()),
        }
    }

    pub(super) async fn read() -> Result<Option<String>, SecretError> {
        blocking(|entry| match entry.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(Error::NoEntry) => Ok(None),
            Err(e @ (Error::BadEncoding(_) | Error::Ambiguous(_))) => {
                warn!(error = %e, "Keyring entry is unusable");
                Err(SecretError::Corrupted(e.to_string()))
            }
            Err(e) => Err(match access_error(e) {
                SecretError::AccessFailed(msg) => SecretError::RetrievalFailed(msg),
                other => other,
            }),
        })
        .await
    }

    pub(super) async fn write(secret: Zeroizing<String>) -> Result<(), SecretError> {
        blocking(move |entry| {
            entry
                .set_password(&secret)
                .map_err(|e| SecretError::StorageFailed(e.to_string()))
        })
        .await
    }

    pub(super) async fn remove() -> Result<(), SecretError> {
        blocking(|entry| match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(Error::NoEntry) => {
                debug!("Keyring entry already absent");
                Ok(())
            }
            Err(e) => Err(SecretError::DeletionFailed(e.to_string())),
        })
        .await
    }
}

#[cfg(not(feature = "keyring"))]
mod secure_store {
    use zeroize::Zeroizing;

    use crate::domain::errors::SecretError;

    pub(super) async fn read() -> Result<Option<String>, SecretError> {
        Ok(None)
    }

    pub(super) async fn write(_secret: Zeroizing<String>) -> Result<(), SecretError> {
        Err(SecretError::NotAvailable(
            "built without keyring support; use --token-backend file".to_string(),
        ))
    }

    pub(super) async fn remove() -> Result<(), SecretError> {
        Ok(())
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, SecretError> {
        let raw = secure_store::read()
            .await
            .inspect_err(|e| warn!(error = %e, "Keyring read failed"))?;
        debug!(key = CREDENTIAL_KEY, present = raw.is_some(), "Read keyring entry");
        stored_credential(raw)
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), SecretError> {
        secure_store::write(Zeroizing::new(token.as_str().to_owned()))
            .await
            .inspect_err(|e| warn!(error = %e, "Keyring write failed"))?;
        debug!(key = CREDENTIAL_KEY, "Stored keyring entry");
        Ok(())
    }

    async fn delete_token(&self) -> Result<(), SecretError> {
        secure_store::remove()
            .await
            .inspect_err(|e| warn!(error = %e, "Keyring delete failed"))
    }
}
