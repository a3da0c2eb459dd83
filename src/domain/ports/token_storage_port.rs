//! Token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::AuthToken;
use crate::domain::errors::SecretError;

/// Port for persisting the single session credential.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Retrieves stored token. Absence is `Ok(None)`, not an error.
    async fn get_token(&self) -> Result<Option<AuthToken>, SecretError>;

    /// Stores token, overwriting any previous one.
    async fn store_token(&self, token: &AuthToken) -> Result<(), SecretError>;

    /// Deletes stored token. Deleting a missing token succeeds.
    async fn delete_token(&self) -> Result<(), SecretError>;

    /// Checks if token exists.
    async fn has_token(&self) -> Result<bool, SecretError> {
        Ok(self.get_token().await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    /// Mock token storage for testing.
    pub struct MockTokenStorage {
        token: Arc<RwLock<Option<AuthToken>>>,
        failing: Arc<AtomicBool>,
    }

    impl MockTokenStorage {
        /// Creates empty mock storage.
        pub fn new() -> Self {
            Self {
                token: Arc::new(RwLock::new(None)),
                failing: Arc::new(AtomicBool::new(false)),
            }
        }

        /// Creates mock storage with token.
        pub fn with_token(token: AuthToken) -> Self {
            Self {
                token: Arc::new(RwLock::new(Some(token))),
                failing: Arc::new(AtomicBool::new(false)),
            }
        }

        /// Makes every operation fail with a storage error.
        pub fn set_failing(&self, value: bool) {
            self.failing.store(value, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), SecretError> {
            if self.failing.load(Ordering::SeqCst) {
                Err(SecretError::AccessFailed("mock failure".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl Default for MockTokenStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl TokenStoragePort for MockTokenStorage {
        async fn get_token(&self) -> Result<Option<AuthToken>, SecretError> {
            self.check()?;
            Ok(self.token.read().await.clone())
        }

        async fn store_token(&self, token: &AuthToken) -> Result<(), SecretError> {
            self.check()?;
            *self.token.write().await = Some(token.clone());
            Ok(())
        }

        async fn delete_token(&self) -> Result<(), SecretError> {
            self.check()?;
            *self.token.write().await = None;
            Ok(())
        }
    }
}
