//! Token storage adapters.

mod file_storage;
mod keyring_storage;
mod memory_storage;

pub use file_storage::FileTokenStorage;
pub use keyring_storage::KeyringTokenStorage;
pub use memory_storage::MemoryTokenStorage;

use crate::domain::entities::AuthToken;
use crate::domain::errors::SecretError;

/// Key the session credential is stored under, in every backend.
pub(crate) const CREDENTIAL_KEY: &str = "access_token";

/// Validates a raw stored value. A value that is present but not a usable
/// credential is reported as [`SecretError::Corrupted`].
fn stored_credential(raw: Option<String>) -> Result<Option<AuthToken>, SecretError> {
    match raw {
        None => Ok(None),
        Some(raw) => AuthToken::new(raw)
            .map(Some)
            .ok_or_else(|| SecretError::Corrupted(format!("{CREDENTIAL_KEY} is blank"))),
    }
}
