//! Process-local token storage.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::AuthToken;
use crate::domain::errors::SecretError;
use crate::domain::ports::TokenStoragePort;

/// Keeps the credential in memory only; it is lost when the process exits.
#[derive(Default)]
pub struct MemoryTokenStorage {
    token: RwLock<Option<AuthToken>>,
}

impl MemoryTokenStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage holding a token.
    #[must_use]
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

#[async_trait]
impl TokenStoragePort for MemoryTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, SecretError> {
        Ok(self.token.read().await.clone())
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), SecretError> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn delete_token(&self) -> Result<(), SecretError> {
        *self.token.write().await = None;
        Ok(())
    }
}
