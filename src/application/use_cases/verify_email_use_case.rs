//! Email verification use case.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::errors::ApiError;
use crate::domain::ports::AirQualityPort;

/// Confirms an email address from a verification link token.
#[derive(Clone)]
pub struct VerifyEmailUseCase {
    api: Arc<dyn AirQualityPort>,
}

impl VerifyEmailUseCase {
    /// Creates new verification use case.
    #[must_use]
    pub const fn new(api: Arc<dyn AirQualityPort>) -> Self {
        Self { api }
    }

    /// Verifies the email address.
    ///
    /// # Errors
    /// Returns [`ApiError::MissingVerificationToken`] when no token is given,
    /// or the backend error.
    pub async fn execute(&self, token: Option<&str>) -> Result<(), ApiError> {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            warn!("No verification token provided");
            return Err(ApiError::MissingVerificationToken);
        };

        self.api.verify_email(token).await.map_err(|e| {
            warn!(error = %e, "Verification error");
            e
        })?;

        info!("Email verified");
        Ok(())
    }
}
