//! Registration use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{RegisterOutcome, RegisterRequest};
use crate::application::services::{SessionContext, sanitize_email, sanitize_input};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AirQualityPort, Credentials, Registration};

/// Creates accounts.
#[derive(Clone)]
pub struct RegisterUseCase {
    api: Arc<dyn AirQualityPort>,
    session: Arc<SessionContext>,
}

impl RegisterUseCase {
    /// Creates new registration use case.
    #[must_use]
    pub const fn new(api: Arc<dyn AirQualityPort>, session: Arc<SessionContext>) -> Self {
        Self { api, session }
    }

    /// Registers the account and stores the credential if one was issued.
    ///
    /// # Errors
    /// Returns error if the backend refuses the registration or the issued
    /// credential cannot be stored.
    pub async fn execute(&self, request: RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        let registration = Registration {
            credentials: Credentials {
                email: sanitize_email(&request.email),
                password: sanitize_input(&request.password),
            },
            username: request
                .username
                .as_deref()
                .map(sanitize_input)
                .filter(|name| !name.is_empty()),
        };

        debug!(email = %registration.credentials.email, "Attempting registration");

        let token = self.api.register(&registration).await.map_err(|e| {
            warn!(error = %e, "Registration failed");
            e
        })?;

        match token {
            Some(token) => {
                self.session.store(&token).await?;
                info!("Registered and signed in");
                Ok(RegisterOutcome::SignedIn)
            }
            None => {
                info!("Registered, email confirmation pending");
                Ok(RegisterOutcome::ConfirmationRequired)
            }
        }
    }
}
