//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{LoginRequest, LoginResponse};
use crate::application::services::{SessionContext, sanitize_email, sanitize_input};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AirQualityPort, Credentials};

/// Handles user authentication workflow.
#[derive(Clone)]
pub struct LoginUseCase {
    api: Arc<dyn AirQualityPort>,
    session: Arc<SessionContext>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(api: Arc<dyn AirQualityPort>, session: Arc<SessionContext>) -> Self {
        Self { api, session }
    }

    /// Signs in, stores the credential and optionally registers a push token.
    ///
    /// # Errors
    /// Returns error if the backend rejects the credentials or the credential
    /// cannot be stored.
    pub async fn execute(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let credentials = Credentials {
            email: sanitize_email(&request.email),
            password: sanitize_input(&request.password),
        };

        debug!(email = %credentials.email, "Attempting login");

        let token = self.api.login(&credentials).await.map_err(|e| {
            warn!(error = %e, "Login failed");
            e
        })?;

        self.session.store(&token).await?;

        info!(email = %credentials.email, "Successfully authenticated");

        let push_token_registered = match request.push_token {
            Some(push_token) => match self.api.register_push_token(&push_token).await {
                Ok(()) => {
                    info!("Push token registered");
                    true
                }
                Err(e) => {
                    warn!(error = %e, "Failed to register push token");
                    false
                }
            },
            None => {
                debug!("No push token configured, skipping registration");
                false
            }
        };

        Ok(LoginResponse {
            push_token_registered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuthToken;
    use crate::domain::ports::TokenStoragePort;
    use crate::domain::ports::mocks::{MockAirQualityPort, MockTokenStorage};

    fn session(storage: &Arc<MockTokenStorage>) -> Arc<SessionContext> {
        Arc::new(SessionContext::new(storage.clone()))
    }

    #[tokio::test]
    async fn test_successful_login_stores_token() {
        let mut api = MockAirQualityPort::new();
        api.expect_login()
            .withf(|c| c.email == "user@example.com" && c.password == "secret")
            .times(1)
            .returning(|_| Ok(AuthToken::new_unchecked("issued")));
        api.expect_register_push_token().never();

        let storage = Arc::new(MockTokenStorage::new());
        let use_case = LoginUseCase::new(Arc::new(api), session(&storage));

        let response = use_case
            .execute(LoginRequest::new(" User@Example.com ", "secret"))
            .await
            .unwrap();

        assert!(!response.push_token_registered);
        let stored = storage.get_token().await.unwrap().unwrap();
        assert_eq!(stored.as_str(), "issued");
    }

    #[tokio::test]
    async fn test_rejected_login_keeps_storage_empty() {
        let mut api = MockAirQualityPort::new();
        api.expect_login()
            .returning(|_| Err(ApiError::status(401, Some("Invalid credentials".to_string()))));

        let storage = Arc::new(MockTokenStorage::new());
        let use_case = LoginUseCase::new(Arc::new(api), session(&storage));

        let result = use_case
            .execute(LoginRequest::new("user@example.com", "wrong"))
            .await;

        let error = result.unwrap_err();
        assert_eq!(error.user_message("Invalid credentials"), "Invalid credentials");
        assert!(!storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_push_token_registered_after_login() {
        let mut api = MockAirQualityPort::new();
        api.expect_login()
            .returning(|_| Ok(AuthToken::new_unchecked("issued")));
        api.expect_register_push_token()
            .withf(|t| t == "ExponentPushToken[abc]")
            .times(1)
            .returning(|_| Ok(()));

        let storage = Arc::new(MockTokenStorage::new());
        let use_case = LoginUseCase::new(Arc::new(api), session(&storage));

        let request = LoginRequest::new("user@example.com", "secret")
            .with_push_token(Some("ExponentPushToken[abc]".to_string()));
        let response = use_case.execute(request).await.unwrap();

        assert!(response.push_token_registered);
    }

    #[tokio::test]
    async fn test_push_registration_failure_is_not_fatal() {
        let mut api = MockAirQualityPort::new();
        api.expect_login()
            .returning(|_| Ok(AuthToken::new_unchecked("issued")));
        api.expect_register_push_token()
            .returning(|_| Err(ApiError::network("offline")));

        let storage = Arc::new(MockTokenStorage::new());
        let use_case = LoginUseCase::new(Arc::new(api), session(&storage));

        let request = LoginRequest::new("user@example.com", "secret")
            .with_push_token(Some("push".to_string()));
        let response = use_case.execute(request).await.unwrap();

        assert!(!response.push_token_registered);
        assert!(storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_storage_failure_fails_login() {
        let mut api = MockAirQualityPort::new();
        api.expect_login()
            .returning(|_| Ok(AuthToken::new_unchecked("issued")));

        let storage = Arc::new(MockTokenStorage::new());
        storage.set_failing(true);
        let use_case = LoginUseCase::new(Arc::new(api), session(&storage));

        let result = use_case
            .execute(LoginRequest::new("user@example.com", "secret"))
            .await;

        assert!(matches!(result, Err(ApiError::Storage(_))));
    }
}
