//! Plain key-value file token storage.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use toml::{Table, Value};
use tracing::{debug, warn};

use crate::domain::entities::AuthToken;
use crate::domain::errors::SecretError;
use crate::domain::ports::TokenStoragePort;
use crate::infrastructure::config::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};

use super::{CREDENTIAL_KEY, stored_credential};

const CREDENTIAL_FILE_NAME: &str = "session.toml";

/// Stores the credential under a fixed key in a TOML file.
///
/// The file is replaced atomically and, on unix, only readable by the owner.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Creates storage in the user data directory.
    ///
    /// # Errors
    /// Returns error if the data directory cannot be determined.
    pub fn new() -> Result<Self, SecretError> {
        let path = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join(CREDENTIAL_FILE_NAME))
            .ok_or_else(|| SecretError::NotAvailable("no data directory".to_string()))?;

        Ok(Self { path })
    }

    /// Creates storage at a specific path.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the credential file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, contents: &Table) -> Result<(), SecretError> {
        let content = toml::to_string(contents)
            .map_err(|e| SecretError::StorageFailed(e.to_string()))?;

        let parent = self
            .path
            .parent()
            .ok_or_else(|| SecretError::StorageFailed("invalid credential path".to_string()))?;
        fs::create_dir_all(parent).map_err(|e| SecretError::StorageFailed(e.to_string()))?;

        // NamedTempFile is created owner-only; persisting keeps the mode.
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| SecretError::StorageFailed(e.to_string()))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| SecretError::StorageFailed(e.to_string()))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| SecretError::StorageFailed(e.error.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl TokenStoragePort for FileTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, SecretError> {
        debug!(path = %self.path.display(), "Retrieving token from file");

        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No credential file");
                return Ok(None);
            }
            Err(e) => {
                warn!(error = %e, "Failed to read credential file");
                return Err(SecretError::RetrievalFailed(e.to_string()));
            }
        };

        let mut file: Table = toml::from_str(&content).map_err(|e| {
            warn!(error = %e, "Malformed credential file");
            SecretError::Corrupted(e.to_string())
        })?;

        let raw = match file.remove(CREDENTIAL_KEY) {
            None => None,
            Some(Value::String(raw)) => Some(raw),
            Some(other) => {
                return Err(SecretError::Corrupted(format!(
                    "{CREDENTIAL_KEY} is a {}, not a string",
                    other.type_str()
                )));
            }
        };
        stored_credential(raw)
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), SecretError> {
        debug!(path = %self.path.display(), "Storing token in file");

        let mut file = Table::new();
        file.insert(
            CREDENTIAL_KEY.to_string(),
            Value::String(token.as_str().to_string()),
        );
        self.write(&file)
    }

    async fn delete_token(&self) -> Result<(), SecretError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Credential file removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No credential file to remove");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to remove credential file");
                Err(SecretError::DeletionFailed(e.to_string()))
            }
        }
    }
}
