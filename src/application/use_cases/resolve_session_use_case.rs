//! Session resolution at startup.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::services::SessionContext;
use crate::domain::session::SessionState;

/// Decides the initial session state from credential presence.
pub struct ResolveSessionUseCase {
    session: Arc<SessionContext>,
}

impl ResolveSessionUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(session: Arc<SessionContext>) -> Self {
        Self { session }
    }

    /// Checks storage for a credential. Storage failures count as signed out.
    pub async fn execute(&self) -> SessionState {
        debug!("Checking storage for session credential");
        match self.session.token().await {
            Some(token) => {
                info!(token = %token, "Found stored session credential");
                SessionState::Authenticated
            }
            None => {
                debug!("No session credential found");
                SessionState::Unauthenticated
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuthToken;
    use crate::domain::ports::mocks::MockTokenStorage;

    #[tokio::test]
    async fn test_stored_token_authenticates() {
        let storage = Arc::new(MockTokenStorage::with_token(AuthToken::new_unchecked("t")));
        let use_case = ResolveSessionUseCase::new(Arc::new(SessionContext::new(storage)));

        assert_eq!(use_case.execute().await, SessionState::Authenticated);
    }

    #[tokio::test]
    async fn test_no_token_found() {
        let storage = Arc::new(MockTokenStorage::new());
        let use_case = ResolveSessionUseCase::new(Arc::new(SessionContext::new(storage)));

        assert_eq!(use_case.execute().await, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_storage_failure_is_unauthenticated() {
        let storage = Arc::new(MockTokenStorage::with_token(AuthToken::new_unchecked("t")));
        storage.set_failing(true);
        let use_case = ResolveSessionUseCase::new(Arc::new(SessionContext::new(storage)));

        assert_eq!(use_case.execute().await, SessionState::Unauthenticated);
    }
}
